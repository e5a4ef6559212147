// Outlier rejection using the median absolute deviation (MAD)
//
// A measurement is kept when |x - median| / MAD < 5.0. When the MAD is zero
// (constant series, or fewer than three values) there is nothing to
// normalise by and the sample passes through untouched.

use super::descriptive::median;

/// Ratio to the MAD at or above which a measurement is rejected
pub const MAD_OUTLIER_THRESHOLD: f64 = 5.0;

/// A sample after outlier rejection
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredSample {
    /// Retained measurements, in their original order
    pub values: Vec<f64>,
    /// How many measurements were dropped
    pub removed: usize,
}

/// Remove outlying measurements from one test's sample
///
/// The input is never modified; retained values keep their relative order.
/// The caller folds `removed` into its own running maximum.
///
/// # Example
/// ```
/// use perfcmp::comparison::filter_outliers;
///
/// let filtered = filter_outliers(&[10.0, 11.0, 10.0, 12.0, 100.0], "L1");
/// assert_eq!(filtered.values, vec![10.0, 11.0, 10.0, 12.0]);
/// assert_eq!(filtered.removed, 1);
/// ```
pub fn filter_outliers(sample: &[f64], label: &str) -> FilteredSample {
    let Some(center) = median(sample) else {
        return FilteredSample {
            values: Vec::new(),
            removed: 0,
        };
    };

    let deviations: Vec<f64> = sample.iter().map(|x| (x - center).abs()).collect();
    let mad = median(&deviations).unwrap_or(0.0);

    if mad == 0.0 {
        return FilteredSample {
            values: sample.to_vec(),
            removed: 0,
        };
    }

    let values: Vec<f64> = sample
        .iter()
        .zip(&deviations)
        .filter(|(_, dev)| *dev / mad < MAD_OUTLIER_THRESHOLD)
        .map(|(x, _)| *x)
        .collect();

    let removed = sample.len() - values.len();
    if removed > 0 {
        tracing::info!("Removed {} outliers from {}", removed, label);
    }

    FilteredSample { values, removed }
}
