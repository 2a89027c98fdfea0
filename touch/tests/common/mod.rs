#![allow(dead_code)]

use touch_events::{ActionSink, ButtonAction, ButtonId, SensingEngine, SliderAction, SliderId, TouchPosition, WidgetId};

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

pub const MAX_WIDGETS: usize = 8;

/// A sensing engine whose state is set directly by the test
#[derive(Clone, Copy, Debug, Default)]
pub struct MockEngine {
    pub positions: [Option<u16>; MAX_WIDGETS],
}

impl MockEngine {
    pub fn idle() -> Self {
        Self::default()
    }

    /// Engine with the given widgets touched at position 0
    pub fn touching(widgets: &[WidgetId]) -> Self {
        let mut engine = Self::default();
        for w in widgets {
            engine.positions[*w as usize] = Some(0);
        }
        engine
    }

    pub fn at(mut self, widget: WidgetId, position: u16) -> Self {
        self.positions[widget as usize] = Some(position);
        self
    }
}

impl SensingEngine for MockEngine {
    fn is_widget_active(&self, widget: WidgetId) -> bool {
        self.positions[widget as usize].is_some()
    }

    fn is_any_widget_active(&self) -> bool {
        self.positions.iter().any(|p| p.is_some())
    }

    fn touch_position(&self, widget: WidgetId) -> TouchPosition {
        TouchPosition {
            x: self.positions[widget as usize].unwrap_or(0),
            quality: Some(100),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recorded {
    Button(ButtonId, ButtonAction),
    Slider(SliderId, SliderAction, u16),
}

/// Sink which records every action along with the cycle it arrived in
#[derive(Debug, Default)]
pub struct Recorder {
    pub cycle: u32,
    pub actions: Vec<(u32, Recorded)>,
}

impl Recorder {
    pub fn buttons(&self, button: ButtonId) -> Vec<(u32, ButtonAction)> {
        self.actions
            .iter()
            .filter_map(|(cycle, r)| match r {
                Recorded::Button(b, a) if *b == button => Some((*cycle, *a)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, action: ButtonAction) -> usize {
        self.actions
            .iter()
            .filter(|(_, r)| matches!(r, Recorded::Button(_, a) if *a == action))
            .count()
    }

    pub fn sliders(&self) -> Vec<Recorded> {
        self.actions
            .iter()
            .filter(|(_, r)| matches!(r, Recorded::Slider(..)))
            .map(|(_, r)| *r)
            .collect()
    }
}

impl ActionSink for Recorder {
    fn button_action(&mut self, button: ButtonId, action: ButtonAction) {
        self.actions.push((self.cycle, Recorded::Button(button, action)));
    }

    fn slider_action(&mut self, slider: SliderId, action: SliderAction, position: u16) {
        self.actions.push((self.cycle, Recorded::Slider(slider, action, position)));
    }
}
