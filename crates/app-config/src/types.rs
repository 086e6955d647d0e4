// In crates/app-config/src/types.rs

use chrono::NaiveDate;
use serde::Deserialize;
use std::path::PathBuf;
use strategies::MACrossoverSettings;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    pub server: ServerSettings,
    /// Where the daily price series comes from.
    pub market_data: MarketDataSettings,
    #[serde(default)]
    pub strategies: StrategySettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The default log level for the application.
    pub log_level: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Debug, Clone)]
pub struct MarketDataSettings {
    /// Base URL of the Yahoo Finance chart API.
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Default ticker when none is given on the command line.
    pub symbol: String,
    pub start_date: NaiveDate,
    /// Exclusive end of the requested range.
    pub end_date: NaiveDate,
    /// A JSON price file to read instead of calling the API.
    #[serde(default)]
    pub price_file: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct StrategySettings {
    #[serde(default)]
    pub ma_crossover: MACrossoverSettings,
}
