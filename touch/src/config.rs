/// Hold timing for buttons, in scan cycles.
///
/// All comparisons against these values are strict, so a threshold of `n` fires on
/// the `n + 1`th hold cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingConfig {
    /// Hold cycles before the short hold action fires
    pub hold: u32,
    /// Hold cycles between repeat actions, once the short hold has fired
    pub repeat: u32,
    /// Hold cycles before the first long hold action fires
    pub long_hold: u32,
    /// Extra cycles added to `long_hold` before the long hold fires again. The hold
    /// counter restarts when the long hold fires, so a continued hold must last
    /// `long_hold + long_hold_hysteresis` further cycles.
    pub long_hold_hysteresis: u32,
}

impl TimingConfig {
    const fn default() -> Self {
        Self {
            hold: 800,
            repeat: 200,
            long_hold: 5000,
            long_hold_hysteresis: 5000,
        }
    }

    /// Convert millisecond durations to scan cycle counts, assuming every scan takes
    /// `scan_period_ms`. Division truncates.
    pub const fn from_millis(
        scan_period_ms: u32,
        hold_ms: u32,
        repeat_ms: u32,
        long_hold_ms: u32,
        long_hold_hysteresis_ms: u32,
    ) -> Self {
        assert!(scan_period_ms > 0);
        Self {
            hold: hold_ms / scan_period_ms,
            repeat: repeat_ms / scan_period_ms,
            long_hold: long_hold_ms / scan_period_ms,
            long_hold_hysteresis: long_hold_hysteresis_ms / scan_period_ms,
        }
    }

    /// Threshold used once the long hold has fired
    pub const fn long_hold_rearm(&self) -> u32 {
        self.long_hold.saturating_add(self.long_hold_hysteresis)
    }
}

/// When a slider position change is reported as a move
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChangePolicy {
    /// Any difference from the last reported position
    AnyChange,
    /// Only differences larger than the given magnitude. Smaller changes accumulate
    /// against the last reported position until they cross it.
    Threshold(u16),
}

impl ChangePolicy {
    /// Returns true if moving from `previous` to `current` should be reported
    pub fn reports(&self, previous: u16, current: u16) -> bool {
        match *self {
            ChangePolicy::AnyChange => current != previous,
            ChangePolicy::Threshold(t) => current.abs_diff(previous) > t,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SliderConfig {
    pub change_policy: ChangePolicy,
}

impl SliderConfig {
    const fn default() -> Self {
        Self {
            change_policy: ChangePolicy::AnyChange,
        }
    }
}

pub const DEFAULT_TIMING_CONFIG: TimingConfig = TimingConfig::default();
pub const DEFAULT_SLIDER_CONFIG: SliderConfig = SliderConfig::default();

#[cfg(test)]
pub mod test {
    use super::*;

    #[test]
    fn test_from_millis_truncates() {
        let config = TimingConfig::from_millis(30, 800, 200, 5000, 1000);
        assert_eq!(config.hold, 26);
        assert_eq!(config.repeat, 6);
        assert_eq!(config.long_hold, 166);
        assert_eq!(config.long_hold_hysteresis, 33);
        assert_eq!(config.long_hold_rearm(), 199);
    }

    #[test]
    fn test_default_matches_one_ms_scans() {
        assert_eq!(
            TimingConfig::from_millis(1, 800, 200, 5000, 5000),
            DEFAULT_TIMING_CONFIG
        );
    }

    #[test]
    fn test_change_policy() {
        assert!(!ChangePolicy::AnyChange.reports(100, 100));
        assert!(ChangePolicy::AnyChange.reports(100, 101));
        assert!(ChangePolicy::AnyChange.reports(101, 100));

        let policy = ChangePolicy::Threshold(25);
        assert!(!policy.reports(100, 125));
        assert!(policy.reports(100, 126));
        assert!(!policy.reports(100, 75));
        assert!(policy.reports(100, 74));
    }
}
