// In crates/api-client/src/store.rs

use crate::error::Result;
use core_types::PricePoint;
use std::fs;
use std::path::Path;

/// Writes a price series as a JSON array of `{ "date", "price" }` objects.
pub fn save_prices(path: &Path, prices: &[PricePoint]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(prices)?;
    fs::write(path, json)?;
    tracing::info!(path = %path.display(), count = prices.len(), "Saved price series.");
    Ok(())
}

/// Reads a price series written by [`save_prices`]. Ordering is not checked
/// here; the signal engine rejects unordered input.
pub fn load_prices(path: &Path) -> Result<Vec<PricePoint>> {
    let content = fs::read_to_string(path)?;
    let prices: Vec<PricePoint> = serde_json::from_str(&content)?;
    tracing::info!(path = %path.display(), count = prices.len(), "Loaded price series.");
    Ok(prices)
}
