//! flatbook - latency driver
//!
//! Replays a two-phase synthetic workload against a fresh broker:
//!
//! 1. Build: even `i` bids at `(n - i) % 100 + 1`, odd `i` asks at
//!    `(n + i) % 100 + 100`. The two bands never cross.
//! 2. Cross: the bands are swapped, so every order is marketable.
//!
//! Quantity is `i % 10 + 1` throughout. After each phase the mean
//! per-order latency, the snapshot latency and the snapshot are printed.
//!
//! ```text
//! flatbook <number_of_orders> [config.toml]
//! ```

use std::env;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use flatbook::clock::{Clock, MonotonicClock, Stopwatch};
use flatbook::{Broker, BrokerConfig, Order, Orderbook, Side};

const SNAPSHOT_DEPTH: usize = 10;

fn usage() {
    eprintln!("usage: flatbook <number_of_orders> [config.toml]");
}

/// Order `i` of a phase; `crossing` swaps the bid and ask price bands
fn workload_order(n: u64, i: u64, crossing: bool) -> (Side, f64, u64) {
    let low = ((n - i) % 100 + 1) as f64;
    let high = ((n + i) % 100 + 100) as f64;
    let quantity = i % 10 + 1;

    match (i & 1 == 0, crossing) {
        (true, false) => (Side::Buy, low, quantity),
        (false, false) => (Side::Sell, high, quantity),
        (true, true) => (Side::Buy, high, quantity),
        (false, true) => (Side::Sell, low, quantity),
    }
}

fn run_phase<C: Clock>(
    broker: &mut Broker,
    book: &mut Orderbook<SNAPSHOT_DEPTH>,
    depth: usize,
    clock: &C,
    n: u64,
    crossing: bool,
) {
    let mut orders = Stopwatch::new();
    let mut rejected = 0u64;

    for i in 0..n {
        let (side, price, quantity) = workload_order(n, i, crossing);
        let now = clock.now_ns();
        let order = Order::limit(side, price, quantity).with_id(now).with_timestamp(now);

        orders.start(clock);
        let result = broker.insert_order(&order);
        orders.stop(clock);

        if let Err(err) = result {
            rejected += 1;
            error!(%err, %order, "order rejected");
        }
    }

    let label = if crossing { "each order is matched in" } else { "build orderbook in" };
    println!("{label} :{:.1}ns", orders.mean_ns().unwrap_or(0.0));

    let mut snapshot = Stopwatch::new();
    snapshot.start(clock);
    broker.get_order_book(book, depth);
    let snapshot_ns = snapshot.stop(clock);

    println!("{book}");
    println!("the latency of getOrderBook is: {snapshot_ns}ns");
    println!();
    println!();

    info!(
        phase = if crossing { "cross" } else { "build" },
        orders = n,
        rejected,
        bid_levels = broker.bids().len(),
        ask_levels = broker.asks().len(),
        state_root = %hex::encode(broker.state_root()),
        "phase complete"
    );
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() || args.len() > 2 {
        usage();
        return ExitCode::from(2);
    }

    let n: u64 = match args[0].parse() {
        Ok(n) => n,
        Err(err) => {
            eprintln!("invalid number_of_orders {:?}: {err}", args[0]);
            usage();
            return ExitCode::from(2);
        }
    };

    let config = match args.get(1) {
        Some(path) => match BrokerConfig::load_from_file(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("{path}: {err}");
                return ExitCode::from(2);
            }
        },
        None => BrokerConfig::default(),
    };

    info!(
        orders = n,
        chunk_capacity = config.arena.chunk_capacity,
        max_chunks = config.arena.max_chunks,
        snapshot_depth = config.snapshot_depth,
        "starting"
    );

    let clock = MonotonicClock::new();
    let mut broker = Broker::with_config(&config.arena);
    let mut book = Orderbook::<SNAPSHOT_DEPTH>::new();
    let depth = config.snapshot_depth.min(SNAPSHOT_DEPTH);

    run_phase(&mut broker, &mut book, depth, &clock, n, false);
    run_phase(&mut broker, &mut book, depth, &clock, n, true);

    ExitCode::SUCCESS
}
