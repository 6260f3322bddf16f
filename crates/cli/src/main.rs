//! progress-printer CLI - console progress reporting demo.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use progress_printer::{format_duration, FinishGuard, ProgressConfig, TrackerFactory};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "progress-printer")]
#[command(about = "Print periodic progress lines for long-running work", long_about = None)]
struct Cli {
    /// Log library events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a batch job and report its progress
    Run {
        /// Number of units of work
        #[arg(long)]
        total: Option<u64>,
        /// Label for every line
        #[arg(long)]
        name: Option<String>,
        /// Print every N units
        #[arg(long)]
        every: Option<u64>,
        /// Units to process when no total is given
        #[arg(long, default_value = "1000")]
        units: u64,
        /// Simulated time per unit, in milliseconds
        #[arg(long, default_value = "10")]
        delay_ms: u64,
        /// Fail after this many units
        #[arg(long)]
        fail_at: Option<u64>,
        /// JSON config file; flags override its values
        #[arg(long)]
        config: Option<PathBuf>,
        /// Discard progress output
        #[arg(long)]
        silent: bool,
    },
    /// Format a number of seconds as a compact duration
    Duration {
        /// Seconds to format
        seconds: f64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            total,
            name,
            every,
            units,
            delay_ms,
            fail_at,
            config,
            silent,
        } => {
            let mut progress_config = match config {
                Some(path) => ProgressConfig::from_json_file(&path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => ProgressConfig::default(),
            };
            if let Some(total) = total {
                progress_config = progress_config.with_total(total);
            }
            if let Some(name) = name {
                progress_config = progress_config.with_name(name);
            }
            if let Some(every) = every {
                progress_config = progress_config.with_every(every);
            }

            let factory = if silent {
                TrackerFactory::silenced()
            } else {
                TrackerFactory::from_env()
            };

            let units = progress_config.total.unwrap_or(units);
            let delay = Duration::from_millis(delay_ms);
            let mut tracker = factory.build(progress_config)?;

            let mut guard = FinishGuard::start(&mut tracker)?;
            for _ in 0..units {
                tokio::time::sleep(delay).await;
                guard.increment(1)?;

                if fail_at.is_some_and(|limit| guard.current() >= limit) {
                    bail!("Simulated failure after {} units", guard.current());
                }
            }
            guard.finish()?;

            info!("Processed {} units", tracker.current());
        }
        Commands::Duration { seconds } => {
            if seconds < 0.0 {
                bail!("Seconds must not be negative");
            }
            println!("{}", format_duration(seconds));
        }
    }

    Ok(())
}
