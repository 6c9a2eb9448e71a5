//! Role-typed handles onto an [`EventFifo`]

use core::convert::Infallible;

use fsm_core::Event;

use crate::EventFifo;

/// Producer half, handed to interrupt handlers
///
/// Copyable: several interrupt levels may produce into the same FIFO, since
/// every enqueue runs inside a critical section.
pub struct Producer<'a, E: Event, const N: usize> {
    fifo: &'a EventFifo<E, N>,
}

impl<'a, E: Event, const N: usize> Producer<'a, E, N> {
    pub(crate) fn new(fifo: &'a EventFifo<E, N>) -> Self {
        Self { fifo }
    }

    /// Append an event, dropping it silently if the FIFO is full
    #[inline]
    pub fn enqueue(&self, event: E) {
        self.fifo.enqueue(event);
    }

    /// Check if the next enqueue would be dropped
    pub fn is_full(&self) -> bool {
        self.fifo.is_full()
    }
}

/// Any shared reference may produce; only the consumer side is unique.
impl<'a, E: Event, const N: usize> From<&'a EventFifo<E, N>> for Producer<'a, E, N> {
    fn from(fifo: &'a EventFifo<E, N>) -> Self {
        Self::new(fifo)
    }
}

impl<E: Event, const N: usize> Clone for Producer<'_, E, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: Event, const N: usize> Copy for Producer<'_, E, N> {}

/// Consumer half, owned by the main polling loop
///
/// Not `Clone`: dequeueing takes `&mut self`, and a FIFO hands out at most
/// one consumer at a time, either for the lifetime of a split or until a
/// claimed consumer is dropped.
pub struct Consumer<'a, E: Event, const N: usize> {
    fifo: &'a EventFifo<E, N>,
    claimed: bool,
}

impl<'a, E: Event, const N: usize> Consumer<'a, E, N> {
    pub(crate) fn new(fifo: &'a EventFifo<E, N>) -> Self {
        Self {
            fifo,
            claimed: false,
        }
    }

    pub(crate) fn claimed(fifo: &'a EventFifo<E, N>) -> Self {
        Self {
            fifo,
            claimed: true,
        }
    }

    /// Take the oldest event, `None` when the FIFO is empty
    #[inline]
    pub fn dequeue(&mut self) -> Option<E> {
        self.fifo.dequeue()
    }

    /// Check if the FIFO is empty
    pub fn is_empty(&self) -> bool {
        self.fifo.is_empty()
    }

    /// Get the number of pending events
    pub fn len(&self) -> usize {
        self.fifo.len()
    }
}

impl<E: Event, const N: usize> Drop for Consumer<'_, E, N> {
    fn drop(&mut self) {
        if self.claimed {
            self.fifo.release_consumer();
        }
    }
}

/// Non-blocking source of events for a dispatch loop
///
/// `WouldBlock` means "nothing pending right now, poll again"; there is no
/// error case.
pub trait EventSource<E: Event> {
    /// Read the next pending event
    fn read(&mut self) -> nb::Result<E, Infallible>;
}

impl<E: Event, const N: usize> EventSource<E> for Consumer<'_, E, N> {
    fn read(&mut self) -> nb::Result<E, Infallible> {
        self.dequeue().ok_or(nb::Error::WouldBlock)
    }
}
