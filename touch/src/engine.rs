//! Interface to the sensing engine which scans the electrodes.
//!
//! The event logic in this crate never touches hardware. Once per scan cycle it asks
//! the engine which widgets are active and where a slider is being touched; the
//! engine is expected to have already done acquisition, filtering and debouncing.

/// The sensing engine's index for a widget
pub type WidgetId = u8;

/// A touch position reported by the engine for a slider widget
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchPosition {
    pub x: u16,
    /// Signal strength of the touch, if the engine measures one
    pub quality: Option<u16>,
}

impl TouchPosition {
    pub const fn new(x: u16) -> Self {
        Self { x, quality: None }
    }
}

pub trait SensingEngine {
    /// Is `widget` reporting a touch in the latest scan
    fn is_widget_active(&self, widget: WidgetId) -> bool;

    /// Is any widget reporting a touch in the latest scan
    fn is_any_widget_active(&self) -> bool;

    /// Latest touch position of `widget`. Only meaningful while it is active.
    fn touch_position(&self, widget: WidgetId) -> TouchPosition;
}
