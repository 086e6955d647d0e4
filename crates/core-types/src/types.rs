// In crates/core-types/src/types.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A ticker symbol, e.g. "AAPL".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(pub String);

impl Symbol {
    pub fn new(symbol: impl Into<String>) -> Self {
        Symbol(symbol.into().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One observation of a daily price series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

/// The discrete crossover state at one index.
///
/// `Flat` means the short average is at or below the long average (or the
/// index is still inside the warm-up region), `Long` means it is strictly above.
/// Serialized as `0` / `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum SignalState {
    #[default]
    Flat,
    Long,
}

impl SignalState {
    pub fn as_u8(self) -> u8 {
        match self {
            SignalState::Flat => 0,
            SignalState::Long => 1,
        }
    }
}

impl From<SignalState> for u8 {
    fn from(state: SignalState) -> Self {
        state.as_u8()
    }
}

impl TryFrom<u8> for SignalState {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(SignalState::Flat),
            1 => Ok(SignalState::Long),
            other => Err(format!("signal state must be 0 or 1, got {other}")),
        }
    }
}

/// The change in `SignalState` between two consecutive indices.
/// Serialized as `-1` / `0` / `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum PositionDelta {
    Sell,
    Hold,
    Buy,
}

impl PositionDelta {
    /// The delta from `previous` to `current`.
    pub fn between(previous: SignalState, current: SignalState) -> Self {
        match (previous, current) {
            (SignalState::Flat, SignalState::Long) => PositionDelta::Buy,
            (SignalState::Long, SignalState::Flat) => PositionDelta::Sell,
            _ => PositionDelta::Hold,
        }
    }

    pub fn as_i8(self) -> i8 {
        match self {
            PositionDelta::Sell => -1,
            PositionDelta::Hold => 0,
            PositionDelta::Buy => 1,
        }
    }

    /// The event this delta marks, if any.
    pub fn event_kind(self) -> Option<EventKind> {
        match self {
            PositionDelta::Buy => Some(EventKind::Buy),
            PositionDelta::Sell => Some(EventKind::Sell),
            PositionDelta::Hold => None,
        }
    }
}

impl From<PositionDelta> for i8 {
    fn from(delta: PositionDelta) -> Self {
        delta.as_i8()
    }
}

impl TryFrom<i8> for PositionDelta {
    type Error = String;

    fn try_from(value: i8) -> std::result::Result<Self, Self::Error> {
        match value {
            -1 => Ok(PositionDelta::Sell),
            0 => Ok(PositionDelta::Hold),
            1 => Ok(PositionDelta::Buy),
            other => Err(format!("position delta must be -1, 0 or 1, got {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Short average crossed above the long average.
    Buy,
    /// Short average crossed back to or below the long average.
    Sell,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Buy => f.pad("BUY"),
            EventKind::Sell => f.pad("SELL"),
        }
    }
}

/// A discrete buy or sell event at one index of the series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossoverEvent {
    pub index: usize,
    pub date: NaiveDate,
    pub kind: EventKind,
    /// The short moving-average value at the event index.
    pub price: f64,
}
