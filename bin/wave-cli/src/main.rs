mod settings;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wave_core::{Clock, DailyCounts, InMemorySequence, ReferenceGenerator, Wave};

/// Wave profit and parcel reference tooling
#[derive(Debug, Parser)]
#[command(name = "wave-cli", version, about)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute the profit report for a wave snapshot
    Profit {
        /// Wave snapshot in JSON
        #[arg(long)]
        wave: PathBuf,

        /// Include per-trip revenue and load
        #[arg(long)]
        breakdown: bool,
    },

    /// Issue parcel references for today
    Reference {
        /// Caller-supplied reference, returned unchanged
        #[arg(long)]
        custom: Option<String>,

        /// Parcels already created today
        #[arg(long, default_value_t = 0)]
        prior_count: u64,

        /// Number of references to issue
        #[arg(long, default_value_t = 1)]
        count: u32,
    },
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.json);

    let config = settings::load(cli.config.as_deref())?;

    match cli.command {
        Command::Profit { wave, breakdown } => {
            let json = std::fs::read_to_string(&wave)
                .with_context(|| format!("failed to read wave snapshot {}", wave.display()))?;
            let wave = Wave::from_json(&json)?;

            let calculator = config.profit_calculator();
            let report = calculator.compute_wave_profit(&wave);
            info!("Computed profit for wave {} ({} trips)", wave.id, wave.trips.len());

            let output = if breakdown {
                serde_json::json!({
                    "wave_id": wave.id,
                    "report": report,
                    "trips": calculator.trip_breakdown(&wave),
                })
            } else {
                serde_json::to_value(&report)?
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Reference {
            custom,
            prior_count,
            count,
        } => {
            let clock = config.business_clock()?;
            let counts = DailyCounts::new().with_count(clock.today(), prior_count);
            let generator =
                ReferenceGenerator::new(config.reference.clone(), InMemorySequence::new(counts), clock)?;

            for _ in 0..count {
                let reference = generator.generate_parcel_reference(custom.as_deref()).await?;
                println!("{}", reference);
            }
        }
    }

    Ok(())
}
