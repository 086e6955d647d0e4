// In crates/strategies/src/lib.rs

pub mod ma_crossover;
pub mod moving_average;
pub mod types;

pub use ma_crossover::{MACrossover, compute_signal};
pub use moving_average::trailing_mean;
pub use types::{MACrossoverSettings, SignalSeries};
