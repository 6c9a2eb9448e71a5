#![no_std]
#![forbid(unsafe_code)]

//! # fsm-fifo
//!
//! Fixed-capacity circular buffer that carries [`Event`](fsm_core::Event)
//! tags from interrupt handlers to the main polling loop.
//!
//! The buffer reserves one slot to tell "full" from "empty", so a FIFO with
//! `N` slots holds at most `N - 1` pending events. Events that arrive while
//! the FIFO is full are dropped without any signal to the producer.
//!
//! The producer owns `tail` and the consumer owns `head`. Only the producer
//! side runs inside a critical section; the consumer never masks interrupts.

pub mod queue;
pub mod split;

pub use queue::EventFifo;
pub use split::{Consumer, EventSource, Producer};

/// Slot count of the FIFO emitted for generated machines
pub const DEFAULT_FIFO_CAPACITY: usize = 100;

/// FIFO with the default slot count
pub type DefaultEventFifo<E> = EventFifo<E, DEFAULT_FIFO_CAPACITY>;
