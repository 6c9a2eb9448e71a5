//! Timer periods

use core::fmt;

use crate::{FsmError, FsmResult};

/// Counter clock of the reference timer hardware, in Hz
///
/// The prescaler is set so that the counter runs at 10 kHz, which makes one
/// millisecond equal to ten counter ticks.
pub const REFERENCE_TICK_HZ: u32 = 10_000;

/// Expiry period of a logical timer, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    millis: u32,
}

impl Period {
    /// Zero period; rejected by timer drivers
    pub const ZERO: Self = Self { millis: 0 };

    /// Create a period from milliseconds
    pub const fn from_millis(millis: u32) -> Self {
        Self { millis }
    }

    /// Create a period from seconds
    pub const fn from_secs(secs: u32) -> Self {
        Self { millis: secs.saturating_mul(1000) }
    }

    /// Create a period, rejecting zero
    pub const fn try_from_millis(millis: u32) -> FsmResult<Self> {
        if millis == 0 {
            Err(FsmError::InvalidPeriod)
        } else {
            Ok(Self { millis })
        }
    }

    /// Get the period in milliseconds
    pub const fn as_millis(self) -> u32 {
        self.millis
    }

    /// Check if the period is zero
    pub const fn is_zero(self) -> bool {
        self.millis == 0
    }

    /// Number of counter ticks in this period for a counter clocked at
    /// `tick_hz`, saturating at `u32::MAX`
    pub const fn ticks_at(self, tick_hz: u32) -> u32 {
        let ticks = self.millis as u64 * tick_hz as u64 / 1000;
        if ticks > u32::MAX as u64 {
            u32::MAX
        } else {
            ticks as u32
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.millis)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Period {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}ms", self.millis);
    }
}

/// Build a [`Period`] from a literal with a unit
///
/// ```
/// use fsm_core::{period, Period};
///
/// assert_eq!(period!(500 ms), Period::from_millis(500));
/// assert_eq!(period!(2 s), Period::from_millis(2000));
/// ```
#[macro_export]
macro_rules! period {
    ($value:literal ms) => {
        $crate::Period::from_millis($value)
    };
    ($value:literal s) => {
        $crate::Period::from_secs($value)
    };
}
