//! Event FIFO shared between interrupt context and the main loop

use core::marker::PhantomData;
use core::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};

use fsm_core::{Event, Signal};

#[allow(clippy::declare_interior_mutable_const)]
const VACANT: AtomicU8 = AtomicU8::new(0);

/// Bounded FIFO of event tags
///
/// Slots hold raw [`Signal`] values in atomics so that the FIFO can live in a
/// `static` and be reached by `&` from both concurrency domains.
///
/// `enqueue` may be called from any interrupt level through a shared
/// reference. Events are only ever taken out through the single
/// [`Consumer`](crate::Consumer): borrowed exclusively with
/// [`EventFifo::split`], or claimed once from a `static` FIFO with
/// [`EventFifo::take_consumer`].
pub struct EventFifo<E: Event, const N: usize> {
    slots: [AtomicU8; N],
    /// Next slot to read, written only by the consumer
    head: AtomicUsize,
    /// Next free slot, written only by the producer
    tail: AtomicUsize,
    /// Set while a claimed consumer is alive
    claimed: AtomicBool,
    _event: PhantomData<fn() -> E>,
}

impl<E: Event, const N: usize> EventFifo<E, N> {
    const SLOTS_OK: () = assert!(N >= 2, "an event FIFO needs at least two slots");

    /// Create a new empty FIFO
    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::SLOTS_OK;
        Self {
            slots: [VACANT; N],
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
            claimed: AtomicBool::new(false),
            _event: PhantomData,
        }
    }

    /// Append an event, dropping it silently if the FIFO is full
    ///
    /// The full check and the tail update run inside a critical section so
    /// that a higher-priority interrupt producing into the same FIFO cannot
    /// interleave with them.
    pub fn enqueue(&self, event: E) {
        let stored = critical_section::with(|_| {
            let tail = self.tail.load(Ordering::Relaxed);
            let next = Self::advance(tail);
            if next == self.head.load(Ordering::Acquire) {
                return false;
            }
            self.slots[tail].store(event.signal().raw(), Ordering::Relaxed);
            self.tail.store(next, Ordering::Release);
            true
        });

        if !stored {
            log::trace!("fifo full, dropped {}", event.name());
        }
    }

    /// Take the oldest event, `None` when the FIFO is empty
    ///
    /// Reached only through the [`Consumer`](crate::Consumer). Never masks
    /// interrupts: the producer never writes `head`, so the consumer's
    /// read-modify-write of it cannot race.
    pub(crate) fn dequeue(&self) -> Option<E> {
        let head = self.head.load(Ordering::Relaxed);
        if head == self.tail.load(Ordering::Acquire) {
            return None;
        }
        let raw = self.slots[head].load(Ordering::Relaxed);
        self.head.store(Self::advance(head), Ordering::Release);
        // Only signals of `E` are ever stored, so this always maps back.
        E::from_signal(Signal::new(raw))
    }

    /// Check if the FIFO is empty
    pub fn is_empty(&self) -> bool {
        self.head.load(Ordering::Acquire) == self.tail.load(Ordering::Acquire)
    }

    /// Check if the next enqueue would be dropped
    pub fn is_full(&self) -> bool {
        Self::advance(self.tail.load(Ordering::Acquire)) == self.head.load(Ordering::Acquire)
    }

    /// Get the number of pending events
    pub fn len(&self) -> usize {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Acquire);
        if tail >= head {
            tail - head
        } else {
            N - head + tail
        }
    }

    /// Get the number of events the FIFO can hold, one less than its slots
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    /// Claim the consumer of a shared FIFO, `None` while another claimed
    /// consumer is alive
    ///
    /// For FIFOs that live in a `static` next to the interrupt handlers.
    pub fn take_consumer(&self) -> Option<crate::Consumer<'_, E, N>> {
        if self.claimed.swap(true, Ordering::AcqRel) {
            return None;
        }
        Some(crate::Consumer::claimed(self))
    }

    pub(crate) fn release_consumer(&self) {
        self.claimed.store(false, Ordering::Release);
    }

    /// Split into a copyable producer handle and a unique consumer handle
    pub fn split(&mut self) -> (crate::Producer<'_, E, N>, crate::Consumer<'_, E, N>) {
        let fifo: &Self = self;
        (crate::Producer::new(fifo), crate::Consumer::new(fifo))
    }

    #[inline]
    const fn advance(index: usize) -> usize {
        if index + 1 == N {
            0
        } else {
            index + 1
        }
    }
}

impl<E: Event, const N: usize> Default for EventFifo<E, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fsm_core::define_events! {
        enum TestEvent {
            Ten,
            Twenty,
            Thirty,
        }
    }

    fn cursors<const N: usize>(fifo: &EventFifo<TestEvent, N>) -> (usize, usize) {
        (
            fifo.head.load(Ordering::Relaxed),
            fifo.tail.load(Ordering::Relaxed),
        )
    }

    #[test]
    fn test_event_fifo_order() {
        let fifo: EventFifo<TestEvent, 4> = EventFifo::new();

        assert!(fifo.is_empty());
        assert_eq!(fifo.len(), 0);

        fifo.enqueue(TestEvent::Ten);
        fifo.enqueue(TestEvent::Twenty);
        fifo.enqueue(TestEvent::Thirty);

        assert_eq!(fifo.len(), 3);
        assert!(fifo.is_full());

        assert_eq!(fifo.dequeue(), Some(TestEvent::Ten));
        assert_eq!(fifo.dequeue(), Some(TestEvent::Twenty));
        assert_eq!(fifo.dequeue(), Some(TestEvent::Thirty));
        assert_eq!(fifo.dequeue(), None);

        assert!(fifo.is_empty());
    }

    #[test]
    fn test_full_fifo_drops_without_touching_cursors() {
        let fifo: EventFifo<TestEvent, 3> = EventFifo::new();

        fifo.enqueue(TestEvent::Ten);
        fifo.enqueue(TestEvent::Twenty);
        let before = cursors(&fifo);

        fifo.enqueue(TestEvent::Thirty);

        assert_eq!(cursors(&fifo), before);
        assert_eq!(fifo.dequeue(), Some(TestEvent::Ten));
        assert_eq!(fifo.dequeue(), Some(TestEvent::Twenty));
        assert_eq!(fifo.dequeue(), None);
    }

    #[test]
    fn test_empty_dequeue_mutates_nothing() {
        let fifo: EventFifo<TestEvent, 4> = EventFifo::new();
        fifo.enqueue(TestEvent::Ten);
        assert_eq!(fifo.dequeue(), Some(TestEvent::Ten));

        let before = cursors(&fifo);
        assert_eq!(fifo.dequeue(), None);
        assert_eq!(cursors(&fifo), before);
    }

    #[test]
    fn test_fill_then_drain_leaves_cursors_equal() {
        let fifo: EventFifo<TestEvent, 5> = EventFifo::new();

        for _ in 0..fifo.capacity() {
            fifo.enqueue(TestEvent::Twenty);
        }
        assert!(fifo.is_full());
        while fifo.dequeue().is_some() {}

        let (head, tail) = cursors(&fifo);
        assert_eq!(head, tail);
        assert!(fifo.is_empty());
    }

    #[test]
    fn test_len_across_wrap() {
        let fifo: EventFifo<TestEvent, 4> = EventFifo::new();

        fifo.enqueue(TestEvent::Ten);
        fifo.enqueue(TestEvent::Ten);
        fifo.enqueue(TestEvent::Ten);
        fifo.dequeue();
        fifo.dequeue();
        // tail wraps to slot 0
        fifo.enqueue(TestEvent::Thirty);
        fifo.enqueue(TestEvent::Twenty);

        assert_eq!(cursors(&fifo), (2, 1));
        assert_eq!(fifo.len(), 3);
        assert_eq!(fifo.dequeue(), Some(TestEvent::Ten));
        assert_eq!(fifo.dequeue(), Some(TestEvent::Thirty));
        assert_eq!(fifo.dequeue(), Some(TestEvent::Twenty));
    }

    #[test]
    fn test_capacity_reserves_one_slot() {
        let fifo: EventFifo<TestEvent, 100> = EventFifo::new();
        assert_eq!(fifo.capacity(), 99);
    }
}
