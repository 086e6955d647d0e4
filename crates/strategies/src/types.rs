// In crates/strategies/src/types.rs

use core_types::{CrossoverEvent, Error, EventKind, PositionDelta, PricePoint, Result, SignalState};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct MACrossoverSettings {
    /// Window of the fast ("short") moving average, in observations.
    pub short_window: usize,
    /// Window of the slow ("long") moving average, in observations.
    pub long_window: usize,
}

impl Default for MACrossoverSettings {
    fn default() -> Self {
        Self {
            short_window: 40,
            long_window: 100,
        }
    }
}

impl MACrossoverSettings {
    pub fn new(short_window: usize, long_window: usize) -> Self {
        Self { short_window, long_window }
    }

    /// Both windows must be positive. A short window at or above the long
    /// window is allowed; it just produces an inverted signal.
    pub fn validate(&self) -> Result<()> {
        if self.short_window == 0 {
            return Err(Error::invalid_input("short window must be at least 1"));
        }
        if self.long_window == 0 {
            return Err(Error::invalid_input("long window must be at least 1"));
        }
        Ok(())
    }
}

/// The output of the crossover engine: four series index-aligned with the
/// price series they were computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalSeries {
    pub short_ma: Vec<f64>,
    pub long_ma: Vec<f64>,
    pub signal: Vec<SignalState>,
    /// `None` at index 0, which has no predecessor.
    pub position: Vec<Option<PositionDelta>>,
}

impl SignalSeries {
    pub fn len(&self) -> usize {
        self.signal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signal.is_empty()
    }

    /// Every buy and sell event, in chronological order.
    ///
    /// `prices` must be the series this signal was computed from.
    pub fn events(&self, prices: &[PricePoint]) -> Vec<CrossoverEvent> {
        self.position
            .iter()
            .zip(prices)
            .zip(&self.short_ma)
            .enumerate()
            .filter_map(|(index, ((delta, point), short_ma))| {
                let kind = (*delta)?.event_kind()?;
                Some(CrossoverEvent {
                    index,
                    date: point.date,
                    kind,
                    price: *short_ma,
                })
            })
            .collect()
    }

    pub fn buys(&self, prices: &[PricePoint]) -> Vec<CrossoverEvent> {
        self.events_of_kind(prices, EventKind::Buy)
    }

    pub fn sells(&self, prices: &[PricePoint]) -> Vec<CrossoverEvent> {
        self.events_of_kind(prices, EventKind::Sell)
    }

    fn events_of_kind(&self, prices: &[PricePoint], kind: EventKind) -> Vec<CrossoverEvent> {
        self.events(prices)
            .into_iter()
            .filter(|event| event.kind == kind)
            .collect()
    }
}
