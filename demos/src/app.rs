//! Board wiring: events, timers, routes and machines

use fsm_core::{define_events, define_timers, period, FsmResult, Period, TimerControl};
use fsm_driver::EventContext;
use fsm_engine::{define_machine, Machine};
use fsm_fifo::DEFAULT_FIFO_CAPACITY;
use fsm_timer::{HwSource, Route, TimerService};

use crate::sim::{SimTimer, SimTimerBank};

define_events! {
    /// Everything the timer interrupts can report
    pub enum AppEvent {
        Timer1Expired,
        Timer2Expired,
        Timer3Expired,
    }
}

define_timers! {
    pub enum AppTimer {
        Timer1,
        Timer2,
        Timer3,
    }
}

pub const TIM1_BASE: HwSource = HwSource(0x4001_0000);
pub const TIM2_BASE: HwSource = HwSource(0x4000_0000);
pub const TIM3_BASE: HwSource = HwSource(0x4000_0400);

pub static ROUTES: [Route<AppTimer, AppEvent>; 3] = [
    Route::new(TIM1_BASE, AppTimer::Timer1, AppEvent::Timer1Expired),
    Route::new(TIM2_BASE, AppTimer::Timer2, AppEvent::Timer2Expired),
    Route::new(TIM3_BASE, AppTimer::Timer3, AppEvent::Timer3Expired),
];

/// Shared with the timer interrupt handlers
pub static CONTEXT: EventContext<AppTimer, AppEvent, DEFAULT_FIFO_CAPACITY> =
    EventContext::new(&ROUTES);

/// Everything machine actions can touch
pub struct Board {
    timers: TimerService<AppTimer, SimTimer, 3>,
    oscillator_period: Period,
    oscillations: u32,
    states_entered: u64,
}

impl Board {
    /// Bind every routed timer to a channel of `bank`
    pub fn new(bank: &SimTimerBank, oscillator_period: Period) -> FsmResult<Self> {
        let mut timers = TimerService::new();
        for route in ROUTES.iter() {
            timers.bind(route.timer, bank.attach(route.source))?;
        }
        Ok(Self {
            timers,
            oscillator_period,
            oscillations: 0,
            states_entered: 0,
        })
    }

    /// Number of transitions the oscillator has made
    pub fn oscillations(&self) -> u32 {
        self.oscillations
    }

    pub fn states_entered(&self) -> u64 {
        self.states_entered
    }

    pub fn is_running(&self, timer: AppTimer) -> bool {
        self.timers.is_running(timer)
    }

    fn entered(&mut self, machine: &str, state: &str) {
        self.states_entered += 1;
        log::info!("{machine}: entered {state}");
    }
}

impl TimerControl<AppTimer> for Board {
    fn start(&mut self, timer: AppTimer, period: Period) {
        self.timers.start(timer, period);
    }

    fn stop(&mut self, timer: AppTimer) {
        self.timers.stop(timer);
    }
}

define_machine! {
    /// Status light: a short blink, then a long rest
    pub machine Fsm1 {
        states: Fsm1State,
        event: AppEvent,
        context: Board,
        initial: Boot,

        Boot {
            entry |board| { board.entered("Fsm1", "Boot"); }
            goto Blink;
        }
        Blink {
            entry |board| {
                board.start(AppTimer::Timer1, period!(250 ms));
                board.entered("Fsm1", "Blink");
            }
            on Timer1Expired => Rest |board| { board.stop(AppTimer::Timer1); };
        }
        Rest {
            entry |board| {
                board.start(AppTimer::Timer3, period!(1 s));
                board.entered("Fsm1", "Rest");
            }
            on Timer3Expired => Blink |board| { board.stop(AppTimer::Timer3); };
        }
    }
}

define_machine! {
    /// Two-state oscillator on timer 2
    pub machine Fsm2 {
        states: Fsm2State,
        event: AppEvent,
        context: Board,
        initial: S03,

        S03 {
            entry |board| {
                let period = board.oscillator_period;
                board.start(AppTimer::Timer2, period);
                board.entered("Fsm2", "S03");
            }
            on Timer2Expired => S04 |board| {
                board.stop(AppTimer::Timer2);
                board.oscillations += 1;
            };
        }
        S04 {
            entry |board| {
                let period = board.oscillator_period;
                board.start(AppTimer::Timer2, period);
                board.entered("Fsm2", "S04");
            }
            on Timer2Expired => S03 |board| {
                board.stop(AppTimer::Timer2);
                board.oscillations += 1;
            };
        }
    }
}

/// Every machine sharing [`CONTEXT`], in dispatch order
pub type AppMachines = (Machine<Fsm1>, Machine<Fsm2>);
