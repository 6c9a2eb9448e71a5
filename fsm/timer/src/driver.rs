//! Hardware timer channel contract

use fsm_core::Period;
use thiserror::Error;

/// Errors a hardware timer channel can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DriverError {
    /// Invalid parameter provided, e.g. a period the prescaler cannot reach
    #[error("invalid parameter")]
    InvalidParameter,
    /// Operation not supported by this channel
    #[error("operation not supported")]
    NotSupported,
    /// Channel is busy
    #[error("timer busy")]
    Busy,
    /// Hardware error occurred
    #[error("hardware error")]
    HardwareError,
    /// Vendor-specific error code
    #[error("vendor error code: {0}")]
    Vendor(i32),
}

#[cfg(feature = "defmt")]
impl defmt::Format for DriverError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidParameter => defmt::write!(fmt, "InvalidParameter"),
            Self::NotSupported => defmt::write!(fmt, "NotSupported"),
            Self::Busy => defmt::write!(fmt, "Busy"),
            Self::HardwareError => defmt::write!(fmt, "HardwareError"),
            Self::Vendor(code) => defmt::write!(fmt, "Vendor({})", code),
        }
    }
}

/// Result type for timer driver operations
pub type DriverResult<T> = Result<T, DriverError>;

/// One hardware timer channel
///
/// Register-level setup (clock tree, prescaler, NVIC priority) happens before
/// the channel is handed to the service. The channel only has to honour these
/// operations afterwards and raise its update interrupt once per period.
pub trait TimerDriver {
    /// Load the auto-reload value for a periodic update every `period`
    fn configure(&mut self, period: Period) -> DriverResult<()>;

    /// Enable the update interrupt and let the counter run
    fn start(&mut self) -> DriverResult<()>;

    /// Disable the update interrupt and halt the counter
    fn stop(&mut self) -> DriverResult<()>;

    /// Set the counter back to zero
    fn reset_counter(&mut self) -> DriverResult<()>;

    /// Clear a pending update flag so a stale expiry does not fire
    fn clear_pending(&mut self) -> DriverResult<()>;
}
