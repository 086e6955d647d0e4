// In crates/strategies/src/ma_crossover.rs

use crate::moving_average::trailing_mean;
use crate::types::{MACrossoverSettings, SignalSeries};
use core_types::{Error, PositionDelta, PricePoint, Result, SignalState};

/// Computes the short/long moving averages of `prices` and the crossover
/// signal derived from them.
///
/// For `i < short_window` the signal is held `Flat` while the averages are
/// still built from partial windows. After that it is `Long` exactly when
/// the short average is strictly above the long one.
///
/// Fails with `InvalidInput` if `prices` is empty, either window is zero,
/// a price is not finite, or the dates are not strictly ascending.
pub fn compute_signal(
    prices: &[PricePoint],
    short_window: usize,
    long_window: usize,
) -> Result<SignalSeries> {
    MACrossoverSettings::new(short_window, long_window).validate()?;
    validate_prices(prices)?;

    let closes: Vec<f64> = prices.iter().map(|p| p.price).collect();
    let short_ma = trailing_mean(&closes, short_window)?;
    let long_ma = trailing_mean(&closes, long_window)?;

    let signal: Vec<SignalState> = short_ma
        .iter()
        .zip(&long_ma)
        .enumerate()
        .map(|(i, (short, long))| {
            if i >= short_window && short > long {
                SignalState::Long
            } else {
                SignalState::Flat
            }
        })
        .collect();

    let position = std::iter::once(None)
        .chain(
            signal
                .windows(2)
                .map(|pair| Some(PositionDelta::between(pair[0], pair[1]))),
        )
        .collect();

    Ok(SignalSeries {
        short_ma,
        long_ma,
        signal,
        position,
    })
}

fn validate_prices(prices: &[PricePoint]) -> Result<()> {
    if prices.is_empty() {
        return Err(Error::invalid_input("price series is empty"));
    }
    if let Some(bad) = prices.iter().find(|p| !p.price.is_finite()) {
        return Err(Error::invalid_input(format!(
            "price on {} is not a finite number",
            bad.date
        )));
    }
    if let Some(pair) = prices.windows(2).find(|pair| pair[1].date <= pair[0].date) {
        return Err(Error::invalid_input(format!(
            "price dates must be strictly ascending, found {} after {}",
            pair[1].date, pair[0].date
        )));
    }
    Ok(())
}

/// A moving-average crossover engine bound to a pair of windows.
#[derive(Debug, Clone)]
pub struct MACrossover {
    settings: MACrossoverSettings,
}

impl MACrossover {
    /// Creates a new `MACrossover` from its settings, rejecting zero windows up front.
    pub fn new(settings: MACrossoverSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn name(&self) -> &'static str {
        "ma_crossover"
    }

    pub fn settings(&self) -> &MACrossoverSettings {
        &self.settings
    }

    pub fn compute(&self, prices: &[PricePoint]) -> Result<SignalSeries> {
        let series = compute_signal(prices, self.settings.short_window, self.settings.long_window)?;
        tracing::debug!(
            strategy = self.name(),
            short_window = self.settings.short_window,
            long_window = self.settings.long_window,
            points = series.len(),
            "Computed crossover signal."
        );
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};
    use core_types::EventKind;

    fn series(values: &[f64]) -> Vec<PricePoint> {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, v)| PricePoint::new(start + Days::new(i as u64), *v))
            .collect()
    }

    fn deltas(series: &SignalSeries) -> Vec<Option<i8>> {
        series.position.iter().map(|d| d.map(PositionDelta::as_i8)).collect()
    }

    // Deterministic zig-zag with a drift, enough to produce several crossings.
    fn wavy(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| {
                let i = i as f64;
                100.0 + 0.3 * i + 8.0 * (i / 5.0).sin() + 3.0 * (i / 1.7).cos()
            })
            .collect()
    }

    #[test]
    fn all_series_match_input_length() {
        let prices = series(&wavy(60));
        for short in 1..=8 {
            for long in 1..=12 {
                let out = compute_signal(&prices, short, long).unwrap();
                assert_eq!(out.short_ma.len(), prices.len());
                assert_eq!(out.long_ma.len(), prices.len());
                assert_eq!(out.signal.len(), prices.len());
                assert_eq!(out.position.len(), prices.len());
            }
        }
    }

    #[test]
    fn first_average_equals_first_price() {
        let prices = series(&[12.5, 13.0, 11.0]);
        let out = compute_signal(&prices, 2, 3).unwrap();
        assert_eq!(out.short_ma[0], 12.5);
        assert_eq!(out.long_ma[0], 12.5);
    }

    #[test]
    fn signal_is_flat_during_warm_up() {
        // Rising prices would put the short average above the long one at once.
        let prices = series(&(0..30).map(|i| 10.0 + i as f64).collect::<Vec<_>>());
        let out = compute_signal(&prices, 7, 15).unwrap();
        assert!(out.signal[..7].iter().all(|s| *s == SignalState::Flat));
        assert_eq!(out.signal[7], SignalState::Long);
    }

    #[test]
    fn position_is_the_difference_of_consecutive_signals() {
        let prices = series(&wavy(80));
        for (short, long) in [(2, 5), (3, 10), (5, 20), (10, 4), (1, 1)] {
            let out = compute_signal(&prices, short, long).unwrap();
            assert_eq!(out.position[0], None);
            for i in 1..out.len() {
                let expected = out.signal[i].as_u8() as i8 - out.signal[i - 1].as_u8() as i8;
                let delta = out.position[i].expect("defined after index 0");
                assert_eq!(delta.as_i8(), expected);
                assert!((-1..=1).contains(&delta.as_i8()));
            }
        }
    }

    #[test]
    fn signal_changes_only_where_position_is_nonzero() {
        let prices = series(&wavy(80));
        let out = compute_signal(&prices, 3, 8).unwrap();
        assert!(!out.events(&prices).is_empty(), "fixture should cross at least once");
        for i in 1..out.len() {
            let changed = out.signal[i] != out.signal[i - 1];
            assert_eq!(changed, out.position[i] != Some(PositionDelta::Hold));
        }
    }

    #[test]
    fn identical_inputs_give_identical_outputs() {
        let prices = series(&wavy(50));
        let first = compute_signal(&prices, 4, 12).unwrap();
        let second = compute_signal(&prices, 4, 12).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn short_average_leads_on_a_rising_series() {
        let prices = series(&(0..60).map(|i| 50.0 + 1.5 * i as f64).collect::<Vec<_>>());
        let (short, long) = (5, 20);
        let out = compute_signal(&prices, short, long).unwrap();
        for i in short.max(long)..out.len() {
            assert!(out.short_ma[i] >= out.long_ma[i], "index {i}");
        }
    }

    #[test]
    fn step_up_produces_a_single_buy() {
        let prices = series(&[10.0, 10.0, 10.0, 10.0, 20.0, 20.0, 20.0]);
        let out = compute_signal(&prices, 2, 4).unwrap();

        assert_eq!(out.short_ma, vec![10.0, 10.0, 10.0, 10.0, 15.0, 20.0, 20.0]);
        assert_eq!(out.long_ma, vec![10.0, 10.0, 10.0, 10.0, 12.5, 15.0, 17.5]);
        assert_eq!(
            deltas(&out),
            vec![None, Some(0), Some(0), Some(0), Some(1), Some(0), Some(0)]
        );

        let events = out.events(&prices);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].index, 4);
        assert_eq!(events[0].kind, EventKind::Buy);
        assert_eq!(events[0].price, 15.0);
        assert!(out.sells(&prices).is_empty());
    }

    #[test]
    fn averages_converging_after_a_step_close_the_signal() {
        // Once the long window is full of the new level both averages are
        // equal, and `>` is strict, so the state drops back to Flat.
        let prices = series(&[10.0, 10.0, 10.0, 10.0, 20.0, 20.0, 20.0, 20.0]);
        let out = compute_signal(&prices, 2, 4).unwrap();

        assert_eq!(out.short_ma[7], 20.0);
        assert_eq!(out.long_ma[7], 20.0);
        assert_eq!(
            deltas(&out),
            vec![None, Some(0), Some(0), Some(0), Some(1), Some(0), Some(0), Some(-1)]
        );
        assert_eq!(out.buys(&prices).len(), 1);
        assert_eq!(out.buys(&prices)[0].index, 4);
        assert_eq!(out.sells(&prices).len(), 1);
        assert_eq!(out.sells(&prices)[0].index, 7);
    }

    #[test]
    fn realistic_constant_prices_never_cross() {
        for (c, short, long) in [(172.31, 40, 100), (172.31, 5, 20), (123.456, 5, 20), (3.3, 2, 4)] {
            let prices = series(&vec![c; 300]);
            let out = compute_signal(&prices, short, long).unwrap();
            assert!(out.short_ma.iter().all(|v| *v == c), "short MA drifted for c={c} s={short}");
            assert!(out.long_ma.iter().all(|v| *v == c), "long MA drifted for c={c} l={long}");
            assert!(out.signal.iter().all(|s| *s == SignalState::Flat), "c={c} s={short} l={long}");
            assert!(out.events(&prices).is_empty(), "c={c} s={short} l={long}");
        }
    }

    #[test]
    fn constant_prices_never_cross() {
        let prices = series(&[42.0; 25]);
        let out = compute_signal(&prices, 3, 7).unwrap();
        assert!(out.short_ma.iter().all(|v| *v == 42.0));
        assert!(out.long_ma.iter().all(|v| *v == 42.0));
        assert!(out.signal.iter().all(|s| *s == SignalState::Flat));
        assert!(out.position[1..].iter().all(|d| *d == Some(PositionDelta::Hold)));
        assert!(out.events(&prices).is_empty());
    }

    #[test]
    fn falling_prices_after_a_rally_give_a_sell() {
        let mut values: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        values.extend((0..20).map(|i| 119.0 - 2.0 * i as f64));
        let prices = series(&values);
        let out = compute_signal(&prices, 3, 10).unwrap();

        let events = out.events(&prices);
        let kinds: Vec<EventKind> = events.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EventKind::Buy, EventKind::Sell]);
        assert!(events[0].index < 20 && events[1].index >= 20);
    }

    #[test]
    fn inverted_windows_are_accepted() {
        let prices = series(&wavy(40));
        let out = compute_signal(&prices, 10, 3).unwrap();
        assert_eq!(out.len(), 40);
        assert!(out.signal[..10].iter().all(|s| *s == SignalState::Flat));
    }

    #[test]
    fn short_window_beyond_the_series_keeps_everything_flat() {
        let prices = series(&[1.0, 2.0, 3.0]);
        let out = compute_signal(&prices, 10, 20).unwrap();
        assert!(out.signal.iter().all(|s| *s == SignalState::Flat));
    }

    #[test]
    fn single_point_series() {
        let prices = series(&[7.0]);
        let out = compute_signal(&prices, 1, 1).unwrap();
        assert_eq!(out.short_ma, vec![7.0]);
        assert_eq!(out.signal, vec![SignalState::Flat]);
        assert_eq!(out.position, vec![None]);
    }

    #[test]
    fn empty_prices_are_invalid() {
        assert!(matches!(compute_signal(&[], 2, 4), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn zero_windows_are_invalid() {
        let prices = series(&[1.0, 2.0]);
        assert!(matches!(compute_signal(&prices, 0, 4), Err(Error::InvalidInput(_))));
        assert!(matches!(compute_signal(&prices, 2, 0), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn unordered_or_duplicate_dates_are_invalid() {
        let mut prices = series(&[1.0, 2.0, 3.0]);
        prices.swap(1, 2);
        assert!(matches!(compute_signal(&prices, 1, 2), Err(Error::InvalidInput(_))));

        let mut prices = series(&[1.0, 2.0, 3.0]);
        prices[2].date = prices[1].date;
        assert!(matches!(compute_signal(&prices, 1, 2), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn non_finite_prices_are_invalid() {
        let prices = series(&[1.0, f64::NAN, 3.0]);
        assert!(matches!(compute_signal(&prices, 1, 2), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn engine_uses_its_configured_windows() {
        let prices = series(&wavy(40));
        let engine = MACrossover::new(MACrossoverSettings::new(3, 9)).unwrap();
        assert_eq!(engine.name(), "ma_crossover");
        assert_eq!(engine.compute(&prices).unwrap(), compute_signal(&prices, 3, 9).unwrap());
        assert!(MACrossover::new(MACrossoverSettings::new(0, 9)).is_err());
    }
}
