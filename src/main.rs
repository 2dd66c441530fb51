mod app;

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use japbase_pricing::{
    domain::{Category, Channel, Origin, RecordSort},
    util::version::VERSION_LABEL,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::run;

#[derive(Parser)]
#[command(name = "japbase-pricing", version = VERSION_LABEL)]
#[command(about = "Regional markup calculator for the JapBase tire dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve the markup for one sale
    Quote(QuoteArgs),
    /// Generate the full pricing grid with synthetic market data
    Generate(GenerateArgs),
    /// List the states and cities known to the rule table
    Regions,
    /// Print the rule table in evaluation order
    Rules,
    /// Inspect or persist generator settings
    #[command(subcommand)]
    Settings(SettingsCommand),
    /// Print the build version
    Version,
}

#[derive(Args)]
pub struct QuoteArgs {
    /// State name or abbreviation (e.g. "Pará" or "PA")
    #[arg(long)]
    pub state: String,
    #[arg(long)]
    pub city: String,
    #[arg(long)]
    pub channel: Channel,
    #[arg(long)]
    pub category: Category,
    /// Only used for Pará; defaults to domestic
    #[arg(long)]
    pub origin: Option<Origin>,
    /// Base cost to price with the resolved markup
    #[arg(long)]
    pub base_cost: Option<f64>,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Use only the first N catalog measurements
    #[arg(long)]
    pub measurements: Option<usize>,
    #[command(flatten)]
    pub overrides: SettingsOverrides,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub channel: Option<Channel>,
    #[arg(long)]
    pub category: Option<Category>,
    #[arg(long)]
    pub origin: Option<Origin>,
    #[arg(long, default_value = "state")]
    pub sort: RecordSort,
    #[arg(long)]
    pub desc: bool,
    /// Print the batch as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Generator settings given on the command line; unset flags keep the
/// stored value.
#[derive(Args, Clone, Debug, Default)]
pub struct SettingsOverrides {
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long)]
    pub competitors: Option<u8>,
    /// Competitor quote spread as a fraction, e.g. 0.12
    #[arg(long)]
    pub market_spread: Option<f64>,
    /// Market alignment tolerance as a fraction, e.g. 0.03
    #[arg(long)]
    pub tolerance: Option<f64>,
}

#[derive(Subcommand)]
pub enum SettingsCommand {
    /// Print the effective settings
    Show,
    /// Write settings to the config file
    Save(SettingsOverrides),
    /// Print the settings file location
    Path,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "japbase_pricing=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
