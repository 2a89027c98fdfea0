use core::sync::atomic::{AtomicBool, Ordering};

use crate::action::{ActionSink, SliderId};
use crate::button::ButtonPipeline;
use crate::edge::ActivityBitfield;
use crate::engine::SensingEngine;
use crate::linear::SliderPipeline;

/// Scan-complete flag, set from the sensing interrupt and consumed by the main loop.
///
/// Only loads and stores are used, so this also works on cores without atomic
/// read-modify-write (Cortex-M0). There must be a single consumer.
pub struct ScanFlag(AtomicBool);

impl ScanFlag {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Mark a scan as complete. Safe to call from an interrupt.
    pub fn signal(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Returns true, clearing the flag, if a scan completed since the last call
    pub fn take(&self) -> bool {
        if self.0.load(Ordering::Acquire) {
            self.0.store(false, Ordering::Release);
            true
        } else {
            false
        }
    }
}

impl Default for ScanFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// What a single scan cycle produced
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanReport {
    pub buttons: ActivityBitfield,
    pub active_slider: Option<SliderId>,
}

/// Runs the slider and button pipelines once per scan cycle
pub struct TouchProcessor<'a, const B: usize, const S: usize> {
    pub buttons: ButtonPipeline<'a, B>,
    pub sliders: SliderPipeline<'a, S>,
}

impl<'a, const B: usize, const S: usize> TouchProcessor<'a, B, S> {
    pub fn new(buttons: ButtonPipeline<'a, B>, sliders: SliderPipeline<'a, S>) -> Self {
        Self { buttons, sliders }
    }

    /// Process one completed scan
    pub fn process<E: SensingEngine, K: ActionSink>(&mut self, engine: &E, sink: &mut K) -> ScanReport {
        let active_slider = self.sliders.push(engine, sink);
        let buttons = self.buttons.push(engine, sink);
        ScanReport {
            buttons,
            active_slider,
        }
    }

    /// Process a scan only if `flag` says one has completed
    pub fn poll<E: SensingEngine, K: ActionSink>(
        &mut self,
        flag: &ScanFlag,
        engine: &E,
        sink: &mut K,
    ) -> Option<ScanReport> {
        if flag.take() {
            Some(self.process(engine, sink))
        } else {
            None
        }
    }
}

#[cfg(test)]
pub mod test {
    use super::*;

    #[test]
    fn test_scan_flag() {
        static FLAG: ScanFlag = ScanFlag::new();

        assert!(!FLAG.take());
        FLAG.signal();
        FLAG.signal();
        assert!(FLAG.is_set());
        assert!(FLAG.take());
        assert!(!FLAG.take());
    }
}
