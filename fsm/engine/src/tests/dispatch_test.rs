//! Machine list tests for fsm-engine

use std::vec;
use std::vec::Vec;

use crate::{define_machine, Dispatch, Machine};

fsm_core::define_events! {
    enum Tick {
        Fast,
        Slow,
    }
}

type Trace = Vec<&'static str>;

define_machine! {
    machine First {
        states: FirstState,
        event: Tick,
        context: Trace,
        initial: Idle,

        Idle {
            entry |trace| { trace.push("first idle"); }
            on Fast => Busy;
        }
        Busy {
            entry |trace| { trace.push("first busy"); }
        }
    }
}

define_machine! {
    machine Second {
        states: SecondState,
        event: Tick,
        context: Trace,
        initial: Waiting,

        Waiting {
            entry |trace| { trace.push("second waiting"); }
            on Fast => Counting;
            on Slow => Counting;
        }
        Counting {
            entry |trace| { trace.push("second counting"); }
        }
    }
}

#[test]
fn test_start_all_in_declaration_order() {
    let mut trace = Trace::new();
    let _machines = <(Machine<First>, Machine<Second>) as Dispatch<Tick, Trace>>::start_all(&mut trace);

    assert_eq!(trace, vec!["first idle", "second waiting"]);
}

#[test]
fn test_every_machine_sees_every_event() {
    let mut trace = Trace::new();
    let mut machines = <(Machine<First>, Machine<Second>) as Dispatch<Tick, Trace>>::start_all(&mut trace);
    trace.clear();

    machines.dispatch(Tick::Slow, &mut trace);
    assert_eq!(machines.0.current_state(), FirstState::Idle);
    assert_eq!(machines.1.current_state(), SecondState::Counting);

    machines.dispatch(Tick::Fast, &mut trace);
    assert_eq!(machines.0.current_state(), FirstState::Busy);
    assert_eq!(trace, vec!["second counting", "first busy"]);
}
