use heapless::Vec;

use crate::action::ButtonAction;
use crate::config::TimingConfig;

/// Enumeration of hold phases for a single button
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HoldPhase {
    Idle,
    Touched,
    ShortHoldExpired,
    Repeating,
    LongHoldExpired,
}

/// Actions a single hold cycle can produce: a short hold or repeat, then a long hold
pub type HoldActions = Vec<ButtonAction, 2>;

/// Hold timers for one button.
///
/// Only updated on cycles where this button is the sole active button; the state is
/// re-initialized on every touchdown, so nothing needs clearing on lift-off.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonTimingState {
    /// Hold cycles since touchdown, or since the last long hold
    pub scan_counter: u32,
    pub repeat_counter: u32,
    pub short_hold_expired: bool,
    pub long_hold_expired: bool,
    pub long_hold_threshold: u32,
    pub pressed: bool,
    pub repeating: bool,
}

impl ButtonTimingState {
    pub const fn new() -> Self {
        Self {
            scan_counter: 0,
            repeat_counter: 0,
            short_hold_expired: false,
            long_hold_expired: false,
            long_hold_threshold: 0,
            pressed: false,
            repeating: false,
        }
    }

    pub fn phase(&self) -> HoldPhase {
        if !self.pressed {
            HoldPhase::Idle
        } else if self.long_hold_expired {
            HoldPhase::LongHoldExpired
        } else if self.repeating {
            HoldPhase::Repeating
        } else if self.short_hold_expired {
            HoldPhase::ShortHoldExpired
        } else {
            HoldPhase::Touched
        }
    }

    pub fn touchdown(&mut self, config: &TimingConfig) -> ButtonAction {
        self.scan_counter = 0;
        self.long_hold_threshold = config.long_hold;
        self.short_hold_expired = false;
        self.long_hold_expired = false;
        self.pressed = true;
        self.repeating = false;
        ButtonAction::Touchdown
    }

    /// Advance the hold timers by one scan cycle
    pub fn hold(&mut self, config: &TimingConfig) -> HoldActions {
        let mut actions = HoldActions::new();
        self.scan_counter = self.scan_counter.saturating_add(1);

        if self.scan_counter > config.hold && !self.long_hold_expired {
            if !self.short_hold_expired {
                self.short_hold_expired = true;
                self.repeat_counter = 0;
                actions.push(ButtonAction::ShortHold).ok();
            } else {
                self.repeat_counter += 1;
                if self.repeat_counter > config.repeat {
                    self.repeat_counter = 0;
                    self.repeating = true;
                    actions.push(ButtonAction::Repeat).ok();
                }
            }
        }

        if self.scan_counter > self.long_hold_threshold {
            self.long_hold_threshold = config.long_hold_rearm();
            self.scan_counter = 0;
            self.long_hold_expired = true;
            actions.push(ButtonAction::LongHold).ok();
        }

        actions
    }

    pub fn lift_off(&mut self) -> ButtonAction {
        self.pressed = false;
        ButtonAction::LiftOff
    }
}
