// In crates/strategies/src/moving_average.rs

use core_types::{Error, Result};

/// A running sum with Neumaier compensation, so adding and removing values
/// over a long series does not accumulate rounding error.
#[derive(Debug, Default, Clone, Copy)]
struct CompensatedSum {
    sum: f64,
    compensation: f64,
}

impl CompensatedSum {
    fn add(&mut self, value: f64) {
        let total = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - total) + value;
        } else {
            self.compensation += (value - total) + self.sum;
        }
        self.sum = total;
    }

    fn value(&self) -> f64 {
        self.sum + self.compensation
    }
}

/// Trailing arithmetic mean over `window` observations, one output per input.
///
/// The first `window - 1` outputs average over the shorter prefix seen so far
/// instead of being left empty, so `out[0] == values[0]` and the output is
/// always as long as the input. A window made of one repeated value averages
/// to exactly that value.
pub fn trailing_mean(values: &[f64], window: usize) -> Result<Vec<f64>> {
    if window == 0 {
        return Err(Error::invalid_input("moving-average window must be at least 1"));
    }

    let mut sum = CompensatedSum::default();
    // Length of the run of identical values ending at the current index.
    let mut run = 0usize;
    let mut out = Vec::with_capacity(values.len());

    for (i, &value) in values.iter().enumerate() {
        sum.add(value);
        if i >= window {
            sum.add(-values[i - window]);
        }
        run = if i > 0 && values[i - 1] == value { run + 1 } else { 1 };

        let count = (i + 1).min(window);
        out.push(if run >= count {
            value
        } else {
            sum.value() / count as f64
        });
    }

    Ok(out)
}
