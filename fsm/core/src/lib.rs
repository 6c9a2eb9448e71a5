#![no_std]
#![forbid(unsafe_code)]

//! # fsm-core
//!
//! Vocabulary shared by every layer of the event-driven control loop: the
//! closed set of [`Event`] tags that interrupts produce, the closed set of
//! logical timers ([`TimerId`]) that state machines arm, the [`Period`] a
//! timer runs at, and the [`TimerControl`] seam through which entry and
//! transition actions reach the hardware.

pub mod error;
pub mod events;
pub mod time;
pub mod timers;

pub use error::{FsmError, FsmResult};
pub use events::{Event, Signal};
pub use time::{Period, REFERENCE_TICK_HZ};
pub use timers::{TimerControl, TimerId};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
