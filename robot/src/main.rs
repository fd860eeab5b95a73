//!
//! A minimal timed robot.
//!
//! Every period the robot increments a counter and puts it in the
//! `SmartDashboard` table as `Counter`.  When the robot starts it tells the
//! dashboard with a notification.
//!
//! Stop the robot with Ctrl-C.
//!

#![deny(missing_docs)]

use anyhow::Context;
use clap::Parser;
use crossbeam::channel::unbounded;
use tracing::info;

use elastic_core::Executor;
use elastic_executors::SimpleExecutor;
use elastic_tables::NetworkTableInstance;
use elasticlib::Elastic;

pub mod counter_robot;
use counter_robot::CounterRobot;

/// Minimal timed robot publishing a counter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Period of the robot loop in milliseconds
    #[arg(short, long, default_value_t = (counter_robot::DEFAULT_PERIOD_US / 1_000) as u64)]
    period_ms: u64,

    /// Stop after this many milliseconds instead of waiting for Ctrl-C
    #[arg(long)]
    run_for_ms: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let instance = NetworkTableInstance::get_default();
    let robot = CounterRobot::new(
        &instance,
        Elastic::new(&instance),
        u128::from(args.period_ms) * 1_000,
    );

    let (tx, rx) = unbounded();
    ctrlc::set_handler(move || {
        let _ = tx.send(true);
    })
    .context("could not set the Ctrl-C handler")?;

    let mut executor = SimpleExecutor::new_with(rx, vec![Box::new(robot)]);

    info!(period_ms = args.period_ms, "starting robot");
    match args.run_for_ms {
        Some(ms) => executor.update_for_ms(u128::from(ms)),
        None => executor.update_loop(),
    }

    let counter = instance.get_table("SmartDashboard").get_number("Counter");
    info!(?counter, "robot stopped");
    Ok(())
}
