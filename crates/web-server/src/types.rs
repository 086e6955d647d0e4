// In crates/web-server/src/types.rs

use chrono::NaiveDate;
use core_types::{CrossoverEvent, PositionDelta, PricePoint, SignalState, Symbol};
use serde::{Deserialize, Serialize};
use strategies::{MACrossoverSettings, compute_signal};

/// Optional window overrides from the URL (e.g., `?short_window=20&long_window=50`).
#[derive(Debug, Default, Deserialize)]
pub struct SignalParams {
    pub short_window: Option<usize>,
    pub long_window: Option<usize>,
}

impl SignalParams {
    pub fn resolve(&self, defaults: &MACrossoverSettings) -> MACrossoverSettings {
        MACrossoverSettings::new(
            self.short_window.unwrap_or(defaults.short_window),
            self.long_window.unwrap_or(defaults.long_window),
        )
    }
}

/// Everything the chart needs, as parallel arrays indexed like `dates`.
#[derive(Debug, Clone, Serialize)]
pub struct SignalReport {
    pub symbol: Symbol,
    pub short_window: usize,
    pub long_window: usize,
    pub dates: Vec<NaiveDate>,
    pub prices: Vec<f64>,
    pub short_ma: Vec<f64>,
    pub long_ma: Vec<f64>,
    pub signal: Vec<SignalState>,
    pub position: Vec<Option<PositionDelta>>,
    pub events: Vec<CrossoverEvent>,
}

impl SignalReport {
    pub fn build(
        symbol: Symbol,
        prices: &[PricePoint],
        settings: MACrossoverSettings,
    ) -> core_types::Result<Self> {
        let series = compute_signal(prices, settings.short_window, settings.long_window)?;
        let events = series.events(prices);

        Ok(Self {
            symbol,
            short_window: settings.short_window,
            long_window: settings.long_window,
            dates: prices.iter().map(|p| p.date).collect(),
            prices: prices.iter().map(|p| p.price).collect(),
            short_ma: series.short_ma,
            long_ma: series.long_ma,
            signal: series.signal,
            position: series.position,
            events,
        })
    }
}
