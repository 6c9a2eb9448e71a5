#![no_std]
#![forbid(unsafe_code)]

//! # FSM Engine
//!
//! Flat, table-driven state machines:
//! - one static state table per machine, indexed by a tagged state id
//! - entry and exit actions, transition actions as plain `fn` pointers
//! - unmatched events ignored without side effects
//! - optional eventless successor per state
//! - machine lists sharing one event stream

pub mod dispatch;
pub mod machine;
pub mod table;

mod macros;

pub use dispatch::Dispatch;
pub use machine::{Machine, Outcome, MAX_EVENTLESS_CHAIN};
pub use table::{noop, MachineDef, Reaction, StateDef, StateId};

#[cfg(test)]
extern crate std;

#[cfg(test)]
mod tests;
