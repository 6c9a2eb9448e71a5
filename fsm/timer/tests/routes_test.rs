//! Expiry routing tests for fsm-timer

use fsm_core::{define_events, define_timers, FsmError};
use fsm_fifo::EventFifo;
use fsm_timer::{ExpiryRoutes, HwSource, Route};

define_events! {
    enum BoardEvent {
        Timer1Expired,
        Timer2Expired,
        Timer3Expired,
    }
}

define_timers! {
    enum BoardTimer {
        Timer1,
        Timer2,
        Timer3,
    }
}

const TIM1_BASE: HwSource = HwSource(0x4001_0000);
const TIM2_BASE: HwSource = HwSource(0x4000_0000);
const TIM3_BASE: HwSource = HwSource(0x4000_0400);

static ROUTES: [Route<BoardTimer, BoardEvent>; 3] = [
    Route::new(TIM1_BASE, BoardTimer::Timer1, BoardEvent::Timer1Expired),
    Route::new(TIM2_BASE, BoardTimer::Timer2, BoardEvent::Timer2Expired),
    Route::new(TIM3_BASE, BoardTimer::Timer3, BoardEvent::Timer3Expired),
];

#[test]
fn expiry_enqueues_the_bound_event() {
    let routes = ExpiryRoutes::new(&ROUTES);
    let fifo: EventFifo<BoardEvent, 4> = EventFifo::new();
    routes.validate().unwrap();
    let mut consumer = fifo.take_consumer().unwrap();

    routes.on_expiry(TIM2_BASE, &fifo);
    routes.on_expiry(TIM1_BASE, &fifo);

    assert_eq!(consumer.dequeue(), Some(BoardEvent::Timer2Expired));
    assert_eq!(consumer.dequeue(), Some(BoardEvent::Timer1Expired));
    assert_eq!(consumer.dequeue(), None);
}

#[test]
fn unknown_source_is_ignored() {
    let routes = ExpiryRoutes::new(&ROUTES);
    let fifo: EventFifo<BoardEvent, 4> = EventFifo::new();

    routes.on_expiry(HwSource(0x4000_0800), &fifo);

    assert!(fifo.is_empty());
}

#[test]
fn expiry_by_logical_timer() {
    let routes = ExpiryRoutes::new(&ROUTES);
    let fifo: EventFifo<BoardEvent, 4> = EventFifo::new();

    let mut consumer = fifo.take_consumer().unwrap();
    routes.on_timer_expiry(BoardTimer::Timer3, &fifo);

    assert_eq!(routes.event_for_timer(BoardTimer::Timer3), Some(BoardEvent::Timer3Expired));
    assert_eq!(consumer.dequeue(), Some(BoardEvent::Timer3Expired));
}

#[test]
fn duplicate_source_fails_validation() {
    static DUPLICATE_SOURCE: [Route<BoardTimer, BoardEvent>; 2] = [
        Route::new(TIM1_BASE, BoardTimer::Timer1, BoardEvent::Timer1Expired),
        Route::new(TIM1_BASE, BoardTimer::Timer2, BoardEvent::Timer2Expired),
    ];

    let routes = ExpiryRoutes::new(&DUPLICATE_SOURCE);
    assert_eq!(routes.validate(), Err(FsmError::DuplicateRoute(0x4001_0000)));
}

#[test]
fn timer_routed_twice_fails_validation() {
    static DUPLICATE_TIMER: [Route<BoardTimer, BoardEvent>; 2] = [
        Route::new(TIM1_BASE, BoardTimer::Timer1, BoardEvent::Timer1Expired),
        Route::new(TIM2_BASE, BoardTimer::Timer1, BoardEvent::Timer2Expired),
    ];

    let routes = ExpiryRoutes::new(&DUPLICATE_TIMER);
    assert_eq!(routes.validate(), Err(FsmError::AlreadyBound("Timer1")));
}

#[test]
fn hw_source_display() {
    assert_eq!(TIM3_BASE.to_string(), "0x40000400");
}
