// In crates/app-config/src/lib.rs

use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use std::path::Path;

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{AppSettings, MarketDataSettings, ServerSettings, Settings, StrategySettings};

/// Loads the application settings from the `config/` directory.
///
/// The environment name comes from `APP_ENVIRONMENT` and defaults to "development".
pub fn load_settings() -> Result<Settings> {
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());
    load_settings_from(Path::new("config"), &environment)
}

/// Loads settings from `dir`, layering:
/// 1. Built-in defaults.
/// 2. `{dir}/base.toml`, if present.
/// 3. `{dir}/{environment}.toml`, if present.
/// 4. Environment variables (e.g., `APP_SERVER__PORT=9000`).
pub fn load_settings_from(dir: &Path, environment: &str) -> Result<Settings> {
    let base = dir.join("base");
    let env_file = dir.join(environment);

    let settings = with_defaults(Config::builder(), environment)?
        .add_source(File::with_name(&base.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_file.to_string_lossy()).required(false))
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
    environment: &str,
) -> Result<ConfigBuilder<DefaultState>> {
    Ok(builder
        .set_default("app.environment", environment)?
        .set_default("app.log_level", "info")?
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8050)?
        .set_default("market_data.base_url", "https://query1.finance.yahoo.com")?
        .set_default("market_data.user_agent", "Mozilla/5.0 (compatible; crossover/0.1)")?
        .set_default("market_data.timeout_secs", 10)?
        .set_default("market_data.symbol", "AAPL")?
        .set_default("market_data.start_date", "2020-01-01")?
        .set_default("market_data.end_date", "2023-12-31")?
        .set_default("strategies.ma_crossover.short_window", 40)?
        .set_default("strategies.ma_crossover.long_window", 100)?)
}
