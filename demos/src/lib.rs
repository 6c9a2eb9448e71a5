//! Host build of the rover timer demo
//!
//! [`app`] holds the board-level wiring: events, logical timers, the expiry
//! route table and the two machines. [`sim`] stands in for the timer
//! peripherals, with a ticker thread playing the part of interrupt context.

pub mod app;
pub mod sim;

pub use app::{AppEvent, AppMachines, AppTimer, Board, CONTEXT, ROUTES};
pub use sim::{SimTimer, SimTimerBank, Ticker};
