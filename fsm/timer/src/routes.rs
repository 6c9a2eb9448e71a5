//! Interrupt-side expiry routing

use core::fmt;

use fsm_core::{Event, FsmError, FsmResult, TimerId};
use fsm_fifo::EventFifo;

/// Identity of a hardware timer instance, usually its peripheral base address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HwSource(pub u32);

impl fmt::Display for HwSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for HwSource {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=u32:#x}", self.0);
    }
}

/// One row of the routing table: hardware source → logical timer → event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route<T, E> {
    pub source: HwSource,
    pub timer: T,
    pub event: E,
}

impl<T, E> Route<T, E> {
    pub const fn new(source: HwSource, timer: T, event: E) -> Self {
        Self {
            source,
            timer,
            event,
        }
    }
}

/// Static routing table consulted by timer interrupt handlers
///
/// The table is plain `'static` data so it can be built in a `static` next
/// to the vector table and shared with interrupt handlers without locking.
pub struct ExpiryRoutes<T: 'static, E: 'static> {
    table: &'static [Route<T, E>],
}

impl<T: TimerId, E: Event> ExpiryRoutes<T, E> {
    /// Wrap a routing table; call [`validate`](Self::validate) before the
    /// first interrupt is enabled
    pub const fn new(table: &'static [Route<T, E>]) -> Self {
        Self { table }
    }

    /// Check that every source and every logical timer appears at most once
    pub fn validate(&self) -> FsmResult<()> {
        for (i, route) in self.table.iter().enumerate() {
            for other in &self.table[i + 1..] {
                if other.source == route.source {
                    return Err(FsmError::DuplicateRoute(route.source.0));
                }
                if other.timer == route.timer {
                    return Err(FsmError::AlreadyBound(route.timer.name()));
                }
            }
        }
        Ok(())
    }

    /// Event bound to a hardware source
    pub fn event_for(&self, source: HwSource) -> Option<E> {
        self.table
            .iter()
            .find(|route| route.source == source)
            .map(|route| route.event)
    }

    /// Event bound to a logical timer
    pub fn event_for_timer(&self, timer: T) -> Option<E> {
        self.table
            .iter()
            .find(|route| route.timer == timer)
            .map(|route| route.event)
    }

    /// Interrupt callback: enqueue the event bound to `source`
    ///
    /// Unknown sources are ignored.
    pub fn on_expiry<const N: usize>(&self, source: HwSource, fifo: &EventFifo<E, N>) {
        match self.event_for(source) {
            Some(event) => fifo.enqueue(event),
            None => log::trace!("expiry from unrouted source {}", source),
        }
    }

    /// Interrupt callback addressed by logical timer instead of hardware
    /// source; unrouted timers are ignored
    pub fn on_timer_expiry<const N: usize>(&self, timer: T, fifo: &EventFifo<E, N>) {
        match self.event_for_timer(timer) {
            Some(event) => fifo.enqueue(event),
            None => log::trace!("expiry from unrouted timer {}", timer.name()),
        }
    }

    /// Get the routing table
    pub fn table(&self) -> &'static [Route<T, E>] {
        self.table
    }
}
