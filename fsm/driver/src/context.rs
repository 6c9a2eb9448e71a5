//! State shared between interrupt handlers and the main loop

use fsm_core::{Event, FsmResult, TimerId};
use fsm_fifo::{Consumer, EventFifo, Producer};
use fsm_timer::{ExpiryRoutes, HwSource, Route};

/// Event FIFO plus the static expiry routes feeding it
///
/// Meant to live in a `static`: interrupt handlers call
/// [`on_expiry`](Self::on_expiry) through a shared reference while the main
/// loop drains the FIFO through the one [`consumer`](Self::consumer).
pub struct EventContext<T: TimerId, E: Event, const N: usize> {
    fifo: EventFifo<E, N>,
    routes: ExpiryRoutes<T, E>,
}

impl<T: TimerId, E: Event, const N: usize> EventContext<T, E, N> {
    /// Create a context with an empty FIFO
    pub const fn new(routes: &'static [Route<T, E>]) -> Self {
        Self {
            fifo: EventFifo::new(),
            routes: ExpiryRoutes::new(routes),
        }
    }

    /// Check the routing table; call once before enabling timer interrupts
    pub fn validate(&self) -> FsmResult<()> {
        self.routes.validate()
    }

    /// Timer interrupt entry point, keyed by hardware source
    #[inline]
    pub fn on_expiry(&self, source: HwSource) {
        self.routes.on_expiry(source, &self.fifo);
    }

    /// Timer interrupt entry point, keyed by logical timer
    #[inline]
    pub fn on_timer_expiry(&self, timer: T) {
        self.routes.on_timer_expiry(timer, &self.fifo);
    }

    /// Producer handle for interrupt sources other than timers
    pub fn producer(&self) -> Producer<'_, E, N> {
        Producer::from(&self.fifo)
    }

    /// Claim the FIFO's consumer for the main loop, `None` while it is
    /// already claimed
    pub fn consumer(&self) -> Option<Consumer<'_, E, N>> {
        self.fifo.take_consumer()
    }

    /// Get the event FIFO
    pub fn fifo(&self) -> &EventFifo<E, N> {
        &self.fifo
    }

    /// Get the expiry routes
    pub fn routes(&self) -> &ExpiryRoutes<T, E> {
        &self.routes
    }
}
