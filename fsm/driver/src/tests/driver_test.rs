//! Driver loop tests for fsm-driver

use core::sync::atomic::{AtomicUsize, Ordering};

use fsm_engine::{define_machine, Machine};
use fsm_fifo::EventFifo;

use crate::{Driver, DriverConfig};

fsm_core::define_events! {
    enum Knock {
        Once,
        Twice,
    }
}

define_machine! {
    machine Door {
        states: DoorState,
        event: Knock,
        context: u32,
        initial: Shut,

        Shut {
            entry |opened| { let _ = opened; }
            on Once => Ajar |opened| { *opened += 1; };
        }
        Ajar {
            on Twice => Shut;
        }
    }
}

static IDLE_CALLS: AtomicUsize = AtomicUsize::new(0);

fn count_idle() {
    IDLE_CALLS.fetch_add(1, Ordering::Relaxed);
}

#[test]
fn test_run_once_on_empty_source() {
    let fifo: EventFifo<Knock, 4> = EventFifo::new();
    let mut opened = 0;
    let mut driver: Driver<'_, Knock, Machine<Door>, _, _> =
        Driver::start(DriverConfig::default(), fifo.take_consumer().unwrap(), &mut opened);

    assert!(!driver.run_once());
    assert_eq!(driver.dispatched(), 0);
    assert_eq!(driver.machines().current_state(), DoorState::Shut);
}

#[test]
fn test_run_until_idle_drains_and_calls_hook() {
    let fifo: EventFifo<Knock, 4> = EventFifo::new();
    let mut opened = 0;
    let config = DriverConfig::builder().name("door").idle_hook(count_idle).build();
    let mut driver: Driver<'_, Knock, Machine<Door>, _, _> =
        Driver::start(config, fifo.take_consumer().unwrap(), &mut opened);

    fifo.enqueue(Knock::Once);
    fifo.enqueue(Knock::Twice);
    fifo.enqueue(Knock::Once);
    let before = IDLE_CALLS.load(Ordering::Relaxed);

    assert_eq!(driver.run_until_idle(), 3);
    assert_eq!(driver.dispatched(), 3);
    assert_eq!(driver.machines().current_state(), DoorState::Ajar);
    assert_eq!(*driver.context(), 2);
    assert_eq!(IDLE_CALLS.load(Ordering::Relaxed), before + 1);
}

#[test]
fn test_context_is_reachable_between_dispatches() {
    let fifo: EventFifo<Knock, 4> = EventFifo::new();
    let mut opened = 0;
    let mut driver: Driver<'_, Knock, Machine<Door>, _, _> =
        Driver::start(DriverConfig::default(), fifo.take_consumer().unwrap(), &mut opened);

    *driver.context_mut() = 10;
    fifo.enqueue(Knock::Once);
    assert!(driver.run_once());
    assert_eq!(*driver.context(), 11);
    assert_eq!(driver.config().name, "fsm");
}
