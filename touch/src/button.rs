use crate::action::{ActionSink, ButtonId};
use crate::config::{TimingConfig, DEFAULT_TIMING_CONFIG};
use crate::edge::{build_bitfield, ActivityBitfield, EdgeClassifier, EdgeEvent, EdgeKind};
use crate::engine::{SensingEngine, WidgetId};
use crate::timing::ButtonTimingState;

/// Turns per-scan button activity into touchdown, hold and lift-off actions for `N`
/// buttons.
///
/// Only one button is handled at a time. While more than one is active, no actions
/// are produced; when activity drops back to a single button it gets a fresh
/// touchdown.
pub struct ButtonPipeline<'a, const N: usize> {
    /// Engine widget for each button
    pub widgets: [WidgetId; N],
    pub config: &'a TimingConfig,
    edges: EdgeClassifier,
    timing: [ButtonTimingState; N],
}

impl<'a, const N: usize> ButtonPipeline<'a, N> {
    const FITS_BITFIELD: () = assert!(N <= ActivityBitfield::BITS);

    pub fn new(widgets: [WidgetId; N], config: Option<&'a TimingConfig>) -> Self {
        let () = Self::FITS_BITFIELD;
        Self {
            widgets,
            config: config.unwrap_or(&DEFAULT_TIMING_CONFIG),
            edges: EdgeClassifier::new(),
            timing: [ButtonTimingState::new(); N],
        }
    }

    /// Bitfield seen on the previous cycle
    pub fn previous(&self) -> ActivityBitfield {
        self.edges.previous()
    }

    pub fn timing(&self, button: ButtonId) -> Option<&ButtonTimingState> {
        self.timing.get(button)
    }

    /// Process the latest scan. Returns the activity bitfield for this cycle.
    pub fn push<E: SensingEngine, S: ActionSink>(&mut self, engine: &E, sink: &mut S) -> ActivityBitfield {
        let (bits, count) = if engine.is_any_widget_active() {
            build_bitfield(engine, &self.widgets)
        } else {
            (ActivityBitfield::EMPTY, 0)
        };

        if let Some(event) = self.edges.classify(bits, count) {
            self.dispatch(event, sink);
        }

        bits
    }

    /// Run a classified event through the target button's timers
    pub fn dispatch<S: ActionSink>(&mut self, event: EdgeEvent, sink: &mut S) {
        let Some(button) = event.target() else {
            trace!("Dropped {:?} for buttons {}", event.kind, event.bits.0);
            return;
        };
        let Some(state) = self.timing.get_mut(button) else {
            warn!("Ignoring event for unknown button {}", button);
            return;
        };

        match event.kind {
            EdgeKind::Touchdown => {
                debug!("Button {} touchdown", button);
                sink.button_action(button, state.touchdown(self.config));
            }
            EdgeKind::Hold => {
                for action in state.hold(self.config) {
                    debug!("Button {} {:?}", button, action);
                    sink.button_action(button, action);
                }
            }
            EdgeKind::LiftOff => {
                debug!("Button {} lift-off", button);
                sink.button_action(button, state.lift_off());
            }
        }
    }
}

#[cfg(test)]
pub mod test {
    use super::*;
    use crate::action::{ButtonAction, SliderAction, SliderId};
    use crate::engine::TouchPosition;

    struct Widgets(u32);

    impl SensingEngine for Widgets {
        fn is_widget_active(&self, widget: WidgetId) -> bool {
            self.0 & (1 << widget) != 0
        }

        fn is_any_widget_active(&self) -> bool {
            self.0 != 0
        }

        fn touch_position(&self, _widget: WidgetId) -> TouchPosition {
            TouchPosition::default()
        }
    }

    #[derive(Default)]
    struct Recorder(std::vec::Vec<(ButtonId, ButtonAction)>);

    impl ActionSink for Recorder {
        fn button_action(&mut self, button: ButtonId, action: ButtonAction) {
            self.0.push((button, action));
        }

        fn slider_action(&mut self, _slider: SliderId, _action: SliderAction, _position: u16) {
            panic!("No sliders here");
        }
    }

    #[test]
    pub fn test_button_press() {
        let config = TimingConfig {
            hold: 3,
            repeat: 1,
            long_hold: 100,
            long_hold_hysteresis: 0,
        };
        // Buttons live at engine widgets 2 and 3
        let mut buttons = ButtonPipeline::new([2, 3], Some(&config));
        let mut sink = Recorder::default();

        assert_eq!(buttons.push(&Widgets(0), &mut sink), ActivityBitfield(0));
        assert_eq!(buttons.push(&Widgets(1 << 3), &mut sink), ActivityBitfield(0b10));
        for _ in 0..6 {
            buttons.push(&Widgets(1 << 3), &mut sink);
        }
        buttons.push(&Widgets(0), &mut sink);

        assert_eq!(
            sink.0,
            [
                (1, ButtonAction::Touchdown),
                (1, ButtonAction::ShortHold),
                (1, ButtonAction::Repeat),
                (1, ButtonAction::LiftOff),
            ]
        );
        assert_eq!(buttons.previous(), ActivityBitfield::EMPTY);
        assert_eq!(buttons.timing(0), Some(&ButtonTimingState::new()));
    }

    #[test]
    pub fn test_multi_key_lockout() {
        let mut buttons = ButtonPipeline::new([0, 1], None);
        let mut sink = Recorder::default();

        buttons.push(&Widgets(0b11), &mut sink);
        buttons.push(&Widgets(0b11), &mut sink);
        assert!(sink.0.is_empty());

        buttons.push(&Widgets(0b01), &mut sink);
        buttons.push(&Widgets(0b01), &mut sink);
        buttons.push(&Widgets(0b11), &mut sink);
        buttons.push(&Widgets(0), &mut sink);
        assert_eq!(sink.0, [(0, ButtonAction::Touchdown)]);
    }

    #[test]
    pub fn test_unknown_button_ignored() {
        let mut buttons = ButtonPipeline::new([0, 1], None);
        let mut sink = Recorder::default();

        let event = EdgeEvent {
            kind: EdgeKind::Touchdown,
            bits: ActivityBitfield(1 << 20),
            active_count: 1,
        };
        buttons.dispatch(event, &mut sink);
        assert!(sink.0.is_empty());
    }

    #[test]
    pub fn test_button_ignores_other_widgets() {
        let mut buttons = ButtonPipeline::new([0, 1], None);
        let mut sink = Recorder::default();

        // Something else (a slider, say) is active, but none of our buttons
        assert_eq!(buttons.push(&Widgets(1 << 6), &mut sink), ActivityBitfield::EMPTY);
        assert!(sink.0.is_empty());
    }
}
