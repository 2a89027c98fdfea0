use crate::action::ButtonId;
use crate::engine::{SensingEngine, WidgetId};

/// One bit per button, set while that button is active
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActivityBitfield(pub u32);

impl ActivityBitfield {
    pub const EMPTY: Self = Self(0);
    /// Number of buttons a bitfield can hold
    pub const BITS: usize = u32::BITS as usize;

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn contains(&self, button: ButtonId) -> bool {
        button < Self::BITS && self.0 & (1 << button) != 0
    }

    /// The button id if exactly one bit is set
    pub const fn single(&self) -> Option<ButtonId> {
        if self.0.is_power_of_two() {
            Some(self.0.trailing_zeros() as ButtonId)
        } else {
            None
        }
    }
}

/// Query the engine for every button widget and build the activity bitfield.
///
/// `widgets[i]` is the engine widget for button `i`. Returns the bitfield and the
/// number of active buttons.
pub fn build_bitfield<E: SensingEngine>(engine: &E, widgets: &[WidgetId]) -> (ActivityBitfield, u32) {
    let mut bits = 0u32;
    let mut count = 0u32;

    for (i, widget) in widgets.iter().take(ActivityBitfield::BITS).enumerate() {
        if engine.is_widget_active(*widget) {
            bits |= 1 << i;
            count += 1;
        }
    }

    (ActivityBitfield(bits), count)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeKind {
    /// The set of active buttons changed to a new non-empty set
    Touchdown,
    /// The same set of buttons is still active
    Hold,
    /// All buttons were released
    LiftOff,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EdgeEvent {
    pub kind: EdgeKind,
    pub bits: ActivityBitfield,
    /// Active button count. Forced to 1 for holds and 0 for lift-offs.
    pub active_count: u32,
}

impl EdgeEvent {
    /// The single button this event applies to.
    ///
    /// Returns None when more than one button was active (multi-key lockout), or the
    /// bitfield doesn't name exactly one button.
    pub fn target(&self) -> Option<ButtonId> {
        if self.active_count > 1 {
            None
        } else {
            self.bits.single()
        }
    }
}

/// Compares each cycle's bitfield against the previous one
#[derive(Clone, Copy, Debug, Default)]
pub struct EdgeClassifier {
    previous: ActivityBitfield,
}

impl EdgeClassifier {
    pub const fn new() -> Self {
        Self {
            previous: ActivityBitfield::EMPTY,
        }
    }

    pub fn previous(&self) -> ActivityBitfield {
        self.previous
    }

    /// Classify a new bitfield, updating the stored previous bitfield
    pub fn classify(&mut self, bits: ActivityBitfield, active_count: u32) -> Option<EdgeEvent> {
        if !bits.is_empty() {
            if bits != self.previous {
                self.previous = bits;
                Some(EdgeEvent {
                    kind: EdgeKind::Touchdown,
                    bits,
                    active_count,
                })
            } else {
                Some(EdgeEvent {
                    kind: EdgeKind::Hold,
                    bits: self.previous,
                    active_count: 1,
                })
            }
        } else if !self.previous.is_empty() {
            let bits = self.previous;
            self.previous = ActivityBitfield::EMPTY;
            Some(EdgeEvent {
                kind: EdgeKind::LiftOff,
                bits,
                active_count: 0,
            })
        } else {
            None
        }
    }
}
