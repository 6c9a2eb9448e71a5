//! Simulated timer peripherals for host builds
//!
//! Each channel counts ticks of a 10 kHz reference clock and flags an update
//! when its counter reaches the reload value, like a basic timer in
//! up-counting mode. A [`Ticker`] thread advances the bank in real time and
//! reports expiries the way an update interrupt would.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use fsm_core::{Period, REFERENCE_TICK_HZ};
use fsm_timer::{DriverError, DriverResult, HwSource, TimerDriver};

#[derive(Debug, Clone, Copy)]
struct SimChannel {
    source: HwSource,
    reload: u32,
    counter: u32,
    enabled: bool,
    pending: bool,
}

/// A set of simulated timer channels sharing one clock
#[derive(Debug, Clone, Default)]
pub struct SimTimerBank {
    channels: Arc<Mutex<Vec<SimChannel>>>,
}

impl SimTimerBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a channel reporting as `source` and return its driver handle
    pub fn attach(&self, source: HwSource) -> SimTimer {
        let mut channels = self.lock();
        channels.push(SimChannel {
            source,
            reload: 0,
            counter: 0,
            enabled: false,
            pending: false,
        });
        SimTimer {
            bank: self.clone(),
            slot: channels.len() - 1,
        }
    }

    /// Advance every enabled channel by `ticks` clock ticks
    ///
    /// Returns the sources that expired, in expiry order.
    pub fn advance(&self, ticks: u32) -> Vec<HwSource> {
        let mut fired = Vec::new();
        let mut channels = self.lock();
        for _ in 0..ticks {
            for ch in channels.iter_mut().filter(|ch| ch.enabled) {
                ch.counter += 1;
                if ch.counter >= ch.reload {
                    ch.counter = 0;
                    ch.pending = true;
                    fired.push(ch.source);
                }
            }
        }
        fired
    }

    /// Check if a channel is counting
    pub fn is_enabled(&self, source: HwSource) -> bool {
        self.lock()
            .iter()
            .any(|ch| ch.source == source && ch.enabled)
    }

    /// Check if a channel has an unacknowledged update
    pub fn is_pending(&self, source: HwSource) -> bool {
        self.lock()
            .iter()
            .any(|ch| ch.source == source && ch.pending)
    }

    /// Get a channel's counter value
    pub fn counter(&self, source: HwSource) -> Option<u32> {
        self.lock()
            .iter()
            .find(|ch| ch.source == source)
            .map(|ch| ch.counter)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<SimChannel>> {
        self.channels.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_channel<R>(&self, slot: usize, f: impl FnOnce(&mut SimChannel) -> R) -> DriverResult<R> {
        self.lock()
            .get_mut(slot)
            .map(f)
            .ok_or(DriverError::HardwareError)
    }
}

/// Driver handle for one simulated channel
#[derive(Debug, Clone)]
pub struct SimTimer {
    bank: SimTimerBank,
    slot: usize,
}

impl TimerDriver for SimTimer {
    fn configure(&mut self, period: Period) -> DriverResult<()> {
        let reload = period.ticks_at(REFERENCE_TICK_HZ);
        if reload == 0 {
            return Err(DriverError::InvalidParameter);
        }
        self.bank.with_channel(self.slot, |ch| {
            ch.reload = reload;
            ch.counter = 0;
        })
    }

    fn start(&mut self) -> DriverResult<()> {
        self.bank.with_channel(self.slot, |ch| ch.enabled = true)
    }

    fn stop(&mut self) -> DriverResult<()> {
        self.bank.with_channel(self.slot, |ch| ch.enabled = false)
    }

    fn reset_counter(&mut self) -> DriverResult<()> {
        self.bank.with_channel(self.slot, |ch| ch.counter = 0)
    }

    fn clear_pending(&mut self) -> DriverResult<()> {
        self.bank.with_channel(self.slot, |ch| ch.pending = false)
    }
}

/// Thread advancing a [`SimTimerBank`] in real time
///
/// One clock tick lasts `tick`; the thread wakes at most once per
/// millisecond and catches up on every tick due since it started, so the
/// simulated clock does not drift. `on_expiry` runs on the ticker thread,
/// which acts as interrupt context.
pub struct Ticker {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn spawn<F>(bank: SimTimerBank, tick: Duration, on_expiry: F) -> Self
    where
        F: Fn(HwSource) + Send + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let flag = running.clone();
        let tick_nanos = tick.as_nanos().max(1);
        let wake = tick.max(Duration::from_millis(1));

        let handle = thread::spawn(move || {
            let start = Instant::now();
            let mut done: u128 = 0;
            while flag.load(Ordering::Relaxed) {
                thread::sleep(wake);
                let due = start.elapsed().as_nanos() / tick_nanos;
                let ticks = u32::try_from(due - done).unwrap_or(u32::MAX);
                done += u128::from(ticks);
                for source in bank.advance(ticks) {
                    on_expiry(source);
                }
            }
        });

        Self {
            running,
            handle: Some(handle),
        }
    }

    /// Stop the thread and wait for it to finish
    pub fn stop(mut self) {
        self.halt();
    }

    fn halt(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.halt();
    }
}
