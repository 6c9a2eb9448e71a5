//! Runs both demo machines against simulated timers until Ctrl-C

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use fsm_core::Period;
use fsm_driver::{Driver, DriverConfig};
use fsm_demos::{AppEvent, AppMachines, Board, SimTimerBank, Ticker, CONTEXT};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Timer-driven state machines on simulated hardware")]
struct Opts {
    /// Oscillator half-period in milliseconds
    #[arg(long, default_value_t = 500, value_name = "MS")]
    period_ms: u32,

    /// Stop after this many oscillator transitions
    #[arg(long, value_name = "N")]
    cycles: Option<u32>,

    /// Wall-clock length of one 10 kHz timer tick, in microseconds
    #[arg(long, default_value_t = 100, value_name = "US")]
    tick_us: u64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let opts = Opts::parse();
    let period = Period::try_from_millis(opts.period_ms).context("invalid --period-ms")?;
    anyhow::ensure!(opts.tick_us > 0, "--tick-us must be non-zero");

    CONTEXT.validate().context("expiry routes")?;
    let bank = SimTimerBank::new();
    let mut board = Board::new(&bank, period).context("timer bindings")?;

    let running = Arc::new(AtomicBool::new(true));
    let flag = running.clone();
    ctrlc::set_handler(move || flag.store(false, Ordering::Relaxed))
        .context("installing Ctrl-C handler")?;

    let ticker = Ticker::spawn(bank, Duration::from_micros(opts.tick_us), |source| {
        CONTEXT.on_expiry(source)
    });

    let config = DriverConfig::builder()
        .name("demo")
        .idle_hook(std::thread::yield_now)
        .build();
    let consumer = CONTEXT
        .consumer()
        .context("event FIFO consumer already claimed")?;
    let mut driver: Driver<'_, AppEvent, AppMachines, _, _> =
        Driver::start(config, consumer, &mut board);

    while running.load(Ordering::Relaxed) {
        driver.run_until_idle();
        if opts
            .cycles
            .is_some_and(|limit| driver.context().oscillations() >= limit)
        {
            break;
        }
    }

    ticker.stop();
    log::info!(
        "dispatched {} events, {} oscillations, {} state entries",
        driver.dispatched(),
        driver.context().oscillations(),
        driver.context().states_entered()
    );
    Ok(())
}
