// In app/src/main.rs

use anyhow::{Context, Result};
use app_config::{MarketDataSettings, Settings};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use core_types::{PricePoint, Symbol};
use std::path::PathBuf;
use strategies::{MACrossover, MACrossoverSettings};
use tracing_subscriber::prelude::*;
use web_server::AppState;
use web_server::types::SignalReport;

mod report;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "Moving-average crossover signals for a daily price series.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serves the crossover chart and JSON API.
    Run {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        windows: WindowArgs,
    },

    /// Computes the crossover signal and prints the buy/sell events.
    Signal {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        windows: WindowArgs,
        /// Print the full report as JSON instead of the event table.
        #[arg(long)]
        json: bool,
    },

    /// Downloads a daily price series and saves it as a JSON price file.
    Fetch {
        #[command(flatten)]
        range: RangeArgs,
        /// Where to write the price file.
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Args, Debug)]
struct RangeArgs {
    /// The ticker symbol (e.g., "AAPL"). Defaults to `market_data.symbol`.
    #[arg(short, long)]
    symbol: Option<String>,

    /// First date of the range, YYYY-MM-DD.
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// End of the range (exclusive), YYYY-MM-DD.
    #[arg(long)]
    end_date: Option<NaiveDate>,
}

#[derive(Args, Debug)]
struct SourceArgs {
    #[command(flatten)]
    range: RangeArgs,

    /// Read prices from a JSON price file instead of the market-data API.
    #[arg(short, long)]
    input: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct WindowArgs {
    /// Short moving-average window, in trading days.
    #[arg(long)]
    short_window: Option<usize>,

    /// Long moving-average window, in trading days.
    #[arg(long)]
    long_window: Option<usize>,
}

impl WindowArgs {
    fn resolve(&self, defaults: &MACrossoverSettings) -> MACrossoverSettings {
        MACrossoverSettings::new(
            self.short_window.unwrap_or(defaults.short_window),
            self.long_window.unwrap_or(defaults.long_window),
        )
    }
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = app_config::load_settings().context("Failed to load settings")?;
    init_tracing(&settings.app.log_level);

    tracing::info!(environment = %settings.app.environment, "Starting crossover");

    match cli.command {
        Commands::Run { source, windows } => {
            handle_run(&settings, &source, &windows).await?;
        }
        Commands::Signal {
            source,
            windows,
            json,
        } => {
            handle_signal(&settings, &source, &windows, json).await?;
        }
        Commands::Fetch { range, output } => {
            handle_fetch(&settings, &range, output).await?;
        }
    }

    Ok(())
}

fn init_tracing(log_level: &str) {
    let level = log_level.parse::<tracing::Level>().unwrap_or(tracing::Level::INFO);
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(
        tracing_subscriber::filter::Targets::new()
            .with_target("hyper", tracing::Level::WARN)
            .with_target("reqwest", tracing::Level::WARN)
            .with_default(level),
    );
    tracing_subscriber::registry().with(fmt_layer).init();
}

// --- "Run" Subcommand Logic ---

/// Loads the price series once and serves the dashboard until terminated.
async fn handle_run(settings: &Settings, source: &SourceArgs, windows: &WindowArgs) -> Result<()> {
    let (symbol, prices) = load_series(&settings.market_data, source).await?;
    let defaults = windows.resolve(&settings.strategies.ma_crossover);
    // Fail on bad windows now rather than on every request.
    MACrossover::new(defaults)?;

    let app_state = AppState::new(symbol, prices, defaults);
    web_server::run(settings.server.clone(), app_state).await?;
    Ok(())
}

// --- "Signal" Subcommand Logic ---

async fn handle_signal(
    settings: &Settings,
    source: &SourceArgs,
    windows: &WindowArgs,
    json: bool,
) -> Result<()> {
    let (symbol, prices) = load_series(&settings.market_data, source).await?;
    let crossover = MACrossover::new(windows.resolve(&settings.strategies.ma_crossover))?;

    if json {
        let report = SignalReport::build(symbol, &prices, *crossover.settings())?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let series = crossover.compute(&prices)?;
    println!(
        "{}",
        report::render_events(&symbol, crossover.settings(), &prices, &series)
    );
    Ok(())
}

// --- "Fetch" Subcommand Logic ---

async fn handle_fetch(settings: &Settings, range: &RangeArgs, output: PathBuf) -> Result<()> {
    let (symbol, start, end) = resolve_range(&settings.market_data, range);
    let client = api_client::new(&settings.market_data)?;

    tracing::info!(symbol = %symbol, %start, %end, "Fetching daily prices.");
    let prices = client.get_daily_prices(&symbol, start, end).await?;
    api_client::save_prices(&output, &prices)?;
    Ok(())
}

fn resolve_range(market_data: &MarketDataSettings, range: &RangeArgs) -> (Symbol, NaiveDate, NaiveDate) {
    let symbol = Symbol::new(range.symbol.as_deref().unwrap_or(&market_data.symbol));
    let start = range.start_date.unwrap_or(market_data.start_date);
    let end = range.end_date.unwrap_or(market_data.end_date);
    (symbol, start, end)
}

/// Reads the price series from a file when one is given (on the command line
/// or in `market_data.price_file`), otherwise fetches it from the API.
async fn load_series(
    market_data: &MarketDataSettings,
    source: &SourceArgs,
) -> Result<(Symbol, Vec<PricePoint>)> {
    let (symbol, start, end) = resolve_range(market_data, &source.range);

    let prices = match source.input.as_ref().or(market_data.price_file.as_ref()) {
        Some(path) => api_client::load_prices(path)
            .with_context(|| format!("Failed to read price file {}", path.display()))?,
        None => {
            let client = api_client::new(market_data)?;
            client.get_daily_prices(&symbol, start, end).await?
        }
    };

    Ok((symbol, prices))
}
