//! CLI for serverpulse — live server-health monitoring.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "serverpulse")]
#[command(about = "serverpulse — synthetic server-health telemetry with threshold alerts")]
#[command(version = serverpulse_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the monitor loop and serve the HTTP API
    Serve {
        /// Bind address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Bind port
        #[arg(long, default_value_t = 3000)]
        port: u16,

        /// Milliseconds between telemetry ticks
        #[arg(long, default_value_t = 2000)]
        tick_ms: u64,

        /// History buffer capacity (readings kept in memory)
        #[arg(long, default_value_t = 300)]
        capacity: usize,

        /// Append alert records to this JSON-lines file instead of memory
        #[arg(long)]
        alert_log: Option<PathBuf>,

        /// Notify this recipient on every alert (logged delivery)
        #[arg(long)]
        notify_to: Option<String>,
    },

    /// Run a burst of ticks in-process and print the readings
    Tick {
        /// Number of ticks to run
        #[arg(long, default_value_t = 10)]
        count: usize,

        /// Milliseconds between ticks (0 = back to back)
        #[arg(long, default_value_t = 0)]
        interval_ms: u64,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve {
            host,
            port,
            tick_ms,
            capacity,
            alert_log,
            notify_to,
        } => commands::serve::run(
            &host,
            port,
            tick_ms,
            capacity,
            alert_log.as_deref(),
            notify_to,
        ),
        Commands::Tick { count, interval_ms } => commands::tick::run(count, interval_ms),
    }
}
