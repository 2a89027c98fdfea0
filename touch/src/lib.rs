#![cfg_attr(not(test), no_std)]

// This must go first, so the logging macros are visible to the other modules.
mod fmt;

pub mod action;
pub mod button;
pub mod config;
pub mod edge;
pub mod engine;
pub mod linear;
pub mod queue;
pub mod scan;
pub mod timing;

pub use action::{ActionSink, ActionTable, ButtonAction, ButtonId, SliderAction, SliderId};
pub use button::ButtonPipeline;
pub use config::{ChangePolicy, SliderConfig, TimingConfig, DEFAULT_SLIDER_CONFIG, DEFAULT_TIMING_CONFIG};
pub use engine::{SensingEngine, TouchPosition, WidgetId};
pub use linear::SliderPipeline;
pub use queue::{ActionQueue, TouchEvent};
pub use scan::{ScanFlag, ScanReport, TouchProcessor};
