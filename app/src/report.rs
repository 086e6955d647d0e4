// In app/src/report.rs

use core_types::{EventKind, PricePoint, Symbol};
use strategies::{MACrossoverSettings, SignalSeries};

/// Renders the buy/sell events of a computed signal as a plain-text table.
pub fn render_events(
    symbol: &Symbol,
    settings: &MACrossoverSettings,
    prices: &[PricePoint],
    series: &SignalSeries,
) -> String {
    let events = series.events(prices);
    let buys = events.iter().filter(|e| e.kind == EventKind::Buy).count();
    let sells = events.len() - buys;

    let rule = "---------------------------------\n";

    let mut out = format!(
        "--- {} SMA Crossover ({}-day / {}-day) ---\n",
        symbol, settings.short_window, settings.long_window
    );
    if let (Some(first), Some(last)) = (prices.first(), prices.last()) {
        out.push_str(&format!(
            "Range: {} to {} ({} trading days)\n",
            first.date,
            last.date,
            prices.len()
        ));
    }
    out.push_str(rule);
    for event in &events {
        out.push_str(&format!(
            "{}  {:<4}  short SMA {:>10.2}  close {:>10.2}\n",
            event.date, event.kind, event.price, prices[event.index].price
        ));
    }
    if events.is_empty() {
        out.push_str("No crossovers in this range.\n");
    }
    out.push_str(rule);
    out.push_str(&format!("{buys} buy signal(s), {sells} sell signal(s)."));
    out
}
