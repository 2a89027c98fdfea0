use crate::action::{ActionSink, SliderAction, SliderId};
use crate::config::{SliderConfig, DEFAULT_SLIDER_CONFIG};
use crate::engine::{SensingEngine, WidgetId};

/// Tracked position of one linear slider
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SliderSample {
    pub current_value: u16,
    /// Last position reported to the sink
    pub previous_value: u16,
    /// Scan count when `current_value` was last read
    pub last_update_cycle: u32,
    pub touch_active: bool,
}

impl SliderSample {
    pub const fn new() -> Self {
        Self {
            current_value: 0,
            previous_value: 0,
            last_update_cycle: 0,
            touch_active: false,
        }
    }
}

/// Reports touchdown, movement and lift-off for `M` linear sliders.
///
/// Only one slider is tracked at a time. When none is active, sliders are checked in
/// table order and the first one touched becomes the active slider; the others are
/// not looked at again until it lifts off.
pub struct SliderPipeline<'a, const M: usize> {
    /// Engine widget for each slider, in priority order
    pub widgets: [WidgetId; M],
    pub config: &'a SliderConfig,
    samples: [SliderSample; M],
    active: Option<SliderId>,
    scan_counter: u32,
}

impl<'a, const M: usize> SliderPipeline<'a, M> {
    pub fn new(widgets: [WidgetId; M], config: Option<&'a SliderConfig>) -> Self {
        Self {
            widgets,
            config: config.unwrap_or(&DEFAULT_SLIDER_CONFIG),
            samples: [SliderSample::new(); M],
            active: None,
            scan_counter: 0,
        }
    }

    /// The slider currently being tracked
    pub fn active(&self) -> Option<SliderId> {
        self.active
    }

    pub fn sample(&self, slider: SliderId) -> Option<&SliderSample> {
        self.samples.get(slider)
    }

    /// Number of scans processed so far
    pub fn scan_count(&self) -> u32 {
        self.scan_counter
    }

    /// Process the latest scan. Returns the active slider after this cycle.
    pub fn push<E: SensingEngine, S: ActionSink>(&mut self, engine: &E, sink: &mut S) -> Option<SliderId> {
        self.scan_counter = self.scan_counter.wrapping_add(1);

        match self.active {
            Some(slider) => self.track(slider, engine, sink),
            None => self.arbitrate(engine, sink),
        }

        self.active
    }

    fn track<E: SensingEngine, S: ActionSink>(&mut self, slider: SliderId, engine: &E, sink: &mut S) {
        let widget = self.widgets[slider];
        let sample = &mut self.samples[slider];

        if !engine.is_any_widget_active() || !engine.is_widget_active(widget) {
            debug!("Slider {} lift-off at {}", slider, sample.current_value);
            sample.touch_active = false;
            self.active = None;
            sink.slider_action(slider, SliderAction::LiftOff, sample.current_value);
            return;
        }

        sample.current_value = engine.touch_position(widget).x;
        sample.last_update_cycle = self.scan_counter;

        if self.config.change_policy.reports(sample.previous_value, sample.current_value) {
            let delta = sample.current_value as i32 - sample.previous_value as i32;
            sample.previous_value = sample.current_value;
            trace!("Slider {} moved {} to {}", slider, delta, sample.current_value);
            sink.slider_action(slider, SliderAction::Moved(delta), sample.current_value);
        }
    }

    fn arbitrate<E: SensingEngine, S: ActionSink>(&mut self, engine: &E, sink: &mut S) {
        if !engine.is_any_widget_active() {
            return;
        }

        for slider in 0..M {
            let widget = self.widgets[slider];
            if !engine.is_widget_active(widget) {
                continue;
            }

            let position = engine.touch_position(widget).x;
            let sample = &mut self.samples[slider];
            sample.current_value = position;
            sample.previous_value = position;
            sample.last_update_cycle = self.scan_counter;
            sample.touch_active = true;
            self.active = Some(slider);

            debug!("Slider {} touchdown at {}", slider, position);
            sink.slider_action(slider, SliderAction::Touchdown, position);
            break;
        }
    }
}
