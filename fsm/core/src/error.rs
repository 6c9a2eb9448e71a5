//! Construction-time errors.
//!
//! The runtime paths (enqueue, expiry routing, dispatch, timer start/stop)
//! never fail: every fault there degrades to a no-op. Only wiring mistakes made
//! while the binding tables are assembled are reported, before the main loop
//! starts.

use thiserror::Error;

/// Result type used by the table-building APIs
pub type FsmResult<T> = Result<T, FsmError>;

/// Errors raised while wiring timers, routes and machines together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FsmError {
    /// A fixed-capacity binding table has no free slot left
    #[error("binding table is full")]
    TableFull,
    /// The logical timer is already bound to a hardware channel or route
    #[error("timer {0} is already bound")]
    AlreadyBound(&'static str),
    /// The hardware source already has an expiry route
    #[error("hardware source {0:#010x} is already routed")]
    DuplicateRoute(u32),
    /// A timer period of zero was requested
    #[error("timer period must be non-zero")]
    InvalidPeriod,
}

#[cfg(feature = "defmt")]
impl defmt::Format for FsmError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            FsmError::TableFull => defmt::write!(fmt, "TableFull"),
            FsmError::AlreadyBound(name) => defmt::write!(fmt, "AlreadyBound({=str})", name),
            FsmError::DuplicateRoute(source) => defmt::write!(fmt, "DuplicateRoute({=u32:#x})", source),
            FsmError::InvalidPeriod => defmt::write!(fmt, "InvalidPeriod"),
        }
    }
}
