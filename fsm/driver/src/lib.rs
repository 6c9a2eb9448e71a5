#![no_std]
#![forbid(unsafe_code)]

//! # FSM Driver
//!
//! The main polling loop. An [`EventContext`] owns the event FIFO and the
//! expiry routes and is shared by reference between interrupt handlers and
//! the loop; a [`Driver`] starts every machine, then drains the FIFO and
//! dispatches each event to the machine list, running an idle hook whenever
//! nothing is pending.

pub mod config;
pub mod context;
pub mod driver;

pub use config::{DriverConfig, DriverConfigBuilder};
pub use context::EventContext;
pub use driver::Driver;

#[cfg(test)]
mod tests;
