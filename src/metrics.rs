//! Descriptive statistics over a fixed sample: mean, median and population
//! standard deviation.
//!
//! Every function returns `LabError::DivideByZero` for an empty input instead of
//! producing NaN.

use crate::error::{LabError, LabResult};
use crate::model::{MedianConvention, StatsReport};
use crate::sort;

/// Reference data set used by `difflab stats` when no values are given.
pub const REFERENCE_SAMPLE: [f64; 9] = [12.0, 15.0, 23.0, 42.0, 35.0, 48.0, 62.0, 17.0, 29.0];

/// An immutable, finite sequence of observations.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    values: Vec<f64>,
}

impl Sample {
    /// Load a sample, rejecting NaN and infinities so sorting sees a total order.
    pub fn new(values: Vec<f64>) -> LabResult<Self> {
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(LabError::NonFinite { index });
        }
        Ok(Self { values })
    }

    /// The built-in reference sample.
    pub fn load() -> Self {
        Self {
            values: REFERENCE_SAMPLE.to_vec(),
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> LabResult<f64> {
    if values.is_empty() {
        return Err(LabError::DivideByZero);
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median of a sorted copy of `values`.
pub fn median(values: &[f64], convention: MedianConvention) -> LabResult<f64> {
    if values.is_empty() {
        return Err(LabError::DivideByZero);
    }
    let sorted = sort::sorted(values);
    Ok(median_of_sorted(&sorted, convention))
}

fn median_of_sorted(sorted: &[f64], convention: MedianConvention) -> f64 {
    let n = sorted.len();
    let mid = n / 2;
    if n % 2 == 1 {
        return sorted[mid];
    }
    match convention {
        MedianConvention::Average => (sorted[mid - 1] + sorted[mid]) / 2.0,
        MedianConvention::Lower => sorted[mid - 1],
    }
}

/// Population standard deviation: square root of the mean squared deviation.
pub fn std_dev(values: &[f64]) -> LabResult<f64> {
    let m = mean(values)?;
    let variance = values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / values.len() as f64;
    Ok(variance.sqrt())
}

/// Compute every statistic for a sample in one pass over the API.
pub fn summarize(sample: &Sample, convention: MedianConvention) -> LabResult<StatsReport> {
    let values = sample.values();
    let mean = mean(values)?;
    let std_dev = std_dev(values)?;
    let sorted = sort::sorted(values);
    let median = median_of_sorted(&sorted, convention);
    Ok(StatsReport {
        count: values.len(),
        mean,
        median,
        std_dev,
        median_convention: convention,
        sorted,
    })
}
