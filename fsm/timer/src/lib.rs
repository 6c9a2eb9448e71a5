#![no_std]
#![forbid(unsafe_code)]

//! # fsm-timer
//!
//! Glue between hardware timer channels and the event FIFO.
//!
//! - [`TimerDriver`] is the narrow contract a hardware timer channel offers.
//! - [`TimerService`] binds each logical timer to one driver and implements
//!   [`TimerControl`](fsm_core::TimerControl) for state actions.
//! - [`ExpiryRoutes`] is the static table the interrupt handlers consult to
//!   turn a hardware expiry into an event.

pub mod driver;
pub mod routes;
pub mod service;

pub use driver::{DriverError, DriverResult, TimerDriver};
pub use routes::{ExpiryRoutes, HwSource, Route};
pub use service::TimerService;

/// Maximum number of hardware channels a service binds by default
pub const DEFAULT_MAX_CHANNELS: usize = 8;
