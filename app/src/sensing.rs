use touch_events::{SensingEngine, TouchPosition, WidgetId};

pub const FULL_SCALE: u16 = 1024;

/// Channel order of each scan: two buttons, then the slider segments left to right
pub const NUM_CHANNELS: usize = 5;
const SLIDER_SEGMENTS: core::ops::Range<usize> = 2..NUM_CHANNELS;

pub const BUTTON0_WIDGET: WidgetId = 0;
pub const BUTTON1_WIDGET: WidgetId = 1;
pub const SLIDER0_WIDGET: WidgetId = 2;

/// Threshold detection on raw TSC counts.
///
/// Touching an electrode lowers its count. The first scan after power-up is taken as
/// the untouched reference; there is no drift compensation after that.
pub struct BoardSensing {
    reference: Option<[u16; NUM_CHANNELS]>,
    deltas: [u16; NUM_CHANNELS],
    detect_threshold: u16,
}

impl BoardSensing {
    pub const fn new(detect_threshold: u16) -> Self {
        Self {
            reference: None,
            deltas: [0; NUM_CHANNELS],
            detect_threshold,
        }
    }

    /// Input the counts of a completed scan
    pub fn update(&mut self, counts: [u16; NUM_CHANNELS]) {
        let reference = *self.reference.get_or_insert(counts);
        for i in 0..NUM_CHANNELS {
            self.deltas[i] = reference[i].saturating_sub(counts[i]);
        }
    }

    fn channel_active(&self, channel: usize) -> bool {
        self.deltas[channel] >= self.detect_threshold
    }
}

impl SensingEngine for BoardSensing {
    fn is_widget_active(&self, widget: WidgetId) -> bool {
        match widget {
            BUTTON0_WIDGET => self.channel_active(0),
            BUTTON1_WIDGET => self.channel_active(1),
            SLIDER0_WIDGET => SLIDER_SEGMENTS.into_iter().any(|c| self.channel_active(c)),
            _ => false,
        }
    }

    fn is_any_widget_active(&self) -> bool {
        (0..NUM_CHANNELS).any(|c| self.channel_active(c))
    }

    /// Centroid of the segment deltas, scaled to `0..FULL_SCALE`
    fn touch_position(&self, widget: WidgetId) -> TouchPosition {
        if widget != SLIDER0_WIDGET {
            return TouchPosition::default();
        }

        let step = (FULL_SCALE as u32 - 1) / (SLIDER_SEGMENTS.len() as u32 - 1);
        let mut weighted: u32 = 0;
        let mut total: u32 = 0;
        for (i, c) in SLIDER_SEGMENTS.enumerate() {
            let delta = self.deltas[c] as u32;
            weighted += delta * step * i as u32;
            total += delta;
        }

        if total == 0 {
            return TouchPosition::default();
        }

        TouchPosition {
            x: (weighted / total) as u16,
            quality: Some(total.min(u16::MAX as u32) as u16),
        }
    }
}
