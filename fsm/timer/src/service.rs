//! Logical timer service

use fsm_core::{FsmError, FsmResult, Period, TimerControl, TimerId};
use heapless::Vec;

use crate::driver::{DriverResult, TimerDriver};
use crate::DEFAULT_MAX_CHANNELS;

struct Channel<T, D> {
    timer: T,
    driver: D,
    running: bool,
}

/// Maps logical timers onto hardware timer channels
///
/// Bindings are made once during initialization and never change afterwards.
/// At run time the service is owned by the main loop and reached by state
/// actions through [`TimerControl`]; it is never touched from interrupt
/// context.
pub struct TimerService<T: TimerId, D: TimerDriver, const C: usize = DEFAULT_MAX_CHANNELS> {
    channels: Vec<Channel<T, D>, C>,
}

impl<T: TimerId, D: TimerDriver, const C: usize> TimerService<T, D, C> {
    /// Create a service with no bound timers
    pub const fn new() -> Self {
        Self {
            channels: Vec::new(),
        }
    }

    /// Bind a logical timer to its hardware channel
    pub fn bind(&mut self, timer: T, driver: D) -> FsmResult<()> {
        if self.channels.iter().any(|ch| ch.timer == timer) {
            return Err(FsmError::AlreadyBound(timer.name()));
        }
        self.channels
            .push(Channel {
                timer,
                driver,
                running: false,
            })
            .map_err(|_| FsmError::TableFull)?;
        log::debug!("timer {} bound", timer.name());
        Ok(())
    }

    /// Check if the timer has been started and not stopped since
    pub fn is_running(&self, timer: T) -> bool {
        self.channel(timer).is_some_and(|ch| ch.running)
    }

    /// Get the number of bound timers
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Check if no timer is bound
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Get the driver bound to a timer
    pub fn driver(&self, timer: T) -> Option<&D> {
        self.channel(timer).map(|ch| &ch.driver)
    }

    /// Get the driver bound to a timer, mutably
    pub fn driver_mut(&mut self, timer: T) -> Option<&mut D> {
        self.channel_mut(timer).map(|ch| &mut ch.driver)
    }

    fn channel(&self, timer: T) -> Option<&Channel<T, D>> {
        self.channels.iter().find(|ch| ch.timer == timer)
    }

    fn channel_mut(&mut self, timer: T) -> Option<&mut Channel<T, D>> {
        self.channels.iter_mut().find(|ch| ch.timer == timer)
    }
}

impl<T: TimerId, D: TimerDriver, const C: usize> TimerControl<T> for TimerService<T, D, C> {
    fn start(&mut self, timer: T, period: Period) {
        if period.is_zero() {
            log::warn!("timer {}: zero period ignored", timer.name());
            return;
        }
        let Some(ch) = self.channel_mut(timer) else {
            log::trace!("timer {}: not bound, start ignored", timer.name());
            return;
        };

        match arm(&mut ch.driver, period) {
            Ok(()) => {
                ch.running = true;
                log::debug!("timer {} started, period {}", timer.name(), period);
            }
            Err(err) => {
                // Leave the channel halted rather than half-configured
                let _ = halt(&mut ch.driver);
                ch.running = false;
                log::warn!("timer {}: start failed: {}", timer.name(), err);
            }
        }
    }

    fn stop(&mut self, timer: T) {
        let Some(ch) = self.channel_mut(timer) else {
            log::trace!("timer {}: not bound, stop ignored", timer.name());
            return;
        };

        // Forwarded even when already stopped; halting a halted channel is a
        // no-op for the hardware.
        let halted = halt(&mut ch.driver);
        ch.running = false;
        match halted {
            Ok(()) => log::debug!("timer {} stopped", timer.name()),
            Err(err) => log::warn!("timer {}: stop failed: {}", timer.name(), err),
        }
    }
}

/// Disable the interrupt and zero the counter; both always run, the first
/// error is reported
fn halt<D: TimerDriver>(driver: &mut D) -> DriverResult<()> {
    let stopped = driver.stop();
    let reset = driver.reset_counter();
    stopped.and(reset)
}

/// Reload, clear any stale update flag, then enable the interrupt
fn arm<D: TimerDriver>(driver: &mut D, period: Period) -> DriverResult<()> {
    driver.configure(period)?;
    driver.clear_pending()?;
    driver.start()
}

impl<T: TimerId, D: TimerDriver, const C: usize> Default for TimerService<T, D, C> {
    fn default() -> Self {
        Self::new()
    }
}
