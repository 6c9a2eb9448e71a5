//! The polling main loop

use core::marker::PhantomData;

use fsm_core::Event;
use fsm_engine::Dispatch;
use fsm_fifo::EventSource;

use crate::config::DriverConfig;

/// Single-threaded dispatcher: event source in, machine list out
///
/// `M` is a [`Machine`](fsm_engine::Machine) or a tuple of machines sharing
/// the event set `E` and the action context `C`. The context is borrowed for
/// the driver's lifetime and handed to every action.
pub struct Driver<'a, E, M, S, C>
where
    E: Event,
    M: Dispatch<E, C>,
    S: EventSource<E>,
    C: ?Sized,
{
    config: DriverConfig,
    source: S,
    machines: M,
    ctx: &'a mut C,
    dispatched: u32,
    _event: PhantomData<fn() -> E>,
}

impl<'a, E, M, S, C> Driver<'a, E, M, S, C>
where
    E: Event,
    M: Dispatch<E, C>,
    S: EventSource<E>,
    C: ?Sized,
{
    /// Construct every machine (running initial entries in declaration
    /// order) and attach the event source
    pub fn start(config: DriverConfig, source: S, ctx: &'a mut C) -> Self {
        log::debug!("{}: starting machines", config.name);
        let machines = M::start_all(ctx);
        Self {
            config,
            source,
            machines,
            ctx,
            dispatched: 0,
            _event: PhantomData,
        }
    }

    /// Dispatch at most one pending event
    ///
    /// Returns `false` when nothing was pending.
    pub fn run_once(&mut self) -> bool {
        match self.source.read() {
            Ok(event) => {
                log::trace!("{}: dispatch {}", self.config.name, event.name());
                self.machines.dispatch(event, &mut *self.ctx);
                self.dispatched = self.dispatched.wrapping_add(1);
                true
            }
            Err(nb::Error::WouldBlock) => false,
            Err(nb::Error::Other(never)) => match never {},
        }
    }

    /// Dispatch until the source is empty, then run the idle hook once
    ///
    /// Returns the number of events dispatched.
    pub fn run_until_idle(&mut self) -> usize {
        let mut count = 0;
        while self.run_once() {
            count += 1;
        }
        if let Some(hook) = self.config.idle_hook {
            hook();
        }
        count
    }

    /// Poll forever
    ///
    /// An empty poll runs the idle hook, or a spin-loop hint without one;
    /// the loop never sleeps or waits for an interrupt.
    pub fn run(&mut self) -> ! {
        log::debug!("{}: entering main loop", self.config.name);
        loop {
            if !self.run_once() {
                self.idle();
            }
        }
    }

    fn idle(&self) {
        match self.config.idle_hook {
            Some(hook) => hook(),
            None => core::hint::spin_loop(),
        }
    }

    /// Get the machine list
    pub fn machines(&self) -> &M {
        &self.machines
    }

    /// Get the action context
    pub fn context(&self) -> &C {
        &*self.ctx
    }

    /// Get the action context, mutably
    pub fn context_mut(&mut self) -> &mut C {
        &mut *self.ctx
    }

    /// Number of events dispatched so far, wrapping
    pub fn dispatched(&self) -> u32 {
        self.dispatched
    }

    /// Returns the driver configuration.
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }
}
