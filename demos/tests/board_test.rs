//! Both demo machines against the simulated bank, stepped by hand

use fsm_core::Period;
use fsm_driver::{Driver, DriverConfig, EventContext};
use fsm_demos::app::{Fsm1State, Fsm2State, TIM1_BASE, TIM2_BASE, TIM3_BASE};
use fsm_demos::{AppEvent, AppMachines, AppTimer, Board, SimTimerBank, ROUTES};

/// 1 ms of the 10 kHz reference clock
const MS: u32 = 10;

fn step(bank: &SimTimerBank, ctx: &EventContext<AppTimer, AppEvent, 16>, ticks: u32) {
    for _ in 0..ticks {
        for source in bank.advance(1) {
            ctx.on_expiry(source);
        }
    }
}

#[test]
fn machines_start_their_timers() {
    let ctx: EventContext<AppTimer, AppEvent, 16> = EventContext::new(&ROUTES);
    let bank = SimTimerBank::new();
    let mut board = Board::new(&bank, Period::from_millis(500)).unwrap();
    let driver: Driver<'_, AppEvent, AppMachines, _, _> =
        Driver::start(DriverConfig::default(), ctx.consumer().unwrap(), &mut board);

    let (fsm1, fsm2) = driver.machines();
    assert_eq!(fsm1.current_state(), Fsm1State::Blink);
    assert_eq!(fsm2.current_state(), Fsm2State::S03);
    assert!(bank.is_enabled(TIM1_BASE));
    assert!(bank.is_enabled(TIM2_BASE));
    assert!(!bank.is_enabled(TIM3_BASE));
    assert_eq!(driver.context().states_entered(), 3);
}

#[test]
fn oscillator_follows_the_clock() {
    let ctx: EventContext<AppTimer, AppEvent, 16> = EventContext::new(&ROUTES);
    let bank = SimTimerBank::new();
    let mut board = Board::new(&bank, Period::from_millis(500)).unwrap();
    let mut driver: Driver<'_, AppEvent, AppMachines, _, _> =
        Driver::start(DriverConfig::default(), ctx.consumer().unwrap(), &mut board);

    for expected in [Fsm2State::S04, Fsm2State::S03, Fsm2State::S04] {
        step(&bank, &ctx, 500 * MS - 1);
        driver.run_until_idle();
        assert_ne!(driver.machines().1.current_state(), expected);

        step(&bank, &ctx, 1);
        driver.run_until_idle();
        assert_eq!(driver.machines().1.current_state(), expected);
    }
    assert_eq!(driver.context().oscillations(), 3);
    assert!(driver.context().is_running(AppTimer::Timer2));
}

#[test]
fn status_light_blinks_then_rests() {
    let ctx: EventContext<AppTimer, AppEvent, 16> = EventContext::new(&ROUTES);
    let bank = SimTimerBank::new();
    let mut board = Board::new(&bank, Period::from_millis(500)).unwrap();
    let mut driver: Driver<'_, AppEvent, AppMachines, _, _> =
        Driver::start(DriverConfig::default(), ctx.consumer().unwrap(), &mut board);

    step(&bank, &ctx, 250 * MS);
    driver.run_until_idle();
    assert_eq!(driver.machines().0.current_state(), Fsm1State::Rest);
    assert!(!bank.is_enabled(TIM1_BASE));
    assert_eq!(bank.counter(TIM1_BASE), Some(0));
    assert!(bank.is_enabled(TIM3_BASE));

    step(&bank, &ctx, 1000 * MS);
    driver.run_until_idle();
    assert_eq!(driver.machines().0.current_state(), Fsm1State::Blink);
    assert!(!driver.context().is_running(AppTimer::Timer3));
}
