// Descriptive statistics for a single test's cleaned measurements

use thiserror::Error;

/// Errors from computing statistics over a sample
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("sample is empty")]
    Empty,

    #[error("sample standard deviation needs at least 2 measurements, got {len}")]
    TooFewSamples { len: usize },
}

/// Summary of one test's measurements in one run-set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescriptiveStat {
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (divisor n - 1)
    pub stddev: f64,
}

/// Compute mean, median and sample standard deviation
///
/// Requires at least two measurements; Bessel's correction is undefined for
/// a single value.
///
/// # Example
/// ```
/// use perfcmp::comparison::describe;
///
/// let stats = describe(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
/// assert_eq!(stats.mean, 5.0);
/// assert_eq!(stats.median, 4.5);
/// ```
pub fn describe(sample: &[f64]) -> Result<DescriptiveStat, StatsError> {
    let mean = mean(sample).ok_or(StatsError::Empty)?;
    let median = median(sample).ok_or(StatsError::Empty)?;
    let stddev = sample_stddev(sample).ok_or(StatsError::TooFewSamples { len: sample.len() })?;

    Ok(DescriptiveStat {
        mean,
        median,
        stddev,
    })
}

/// Arithmetic mean, `None` for an empty sample
pub fn mean(sample: &[f64]) -> Option<f64> {
    if sample.is_empty() {
        return None;
    }
    Some(sample.iter().sum::<f64>() / sample.len() as f64)
}

/// Median (mean of the two middle values for even lengths)
///
/// Returns `None` for an empty sample.
pub fn median(sample: &[f64]) -> Option<f64> {
    if sample.is_empty() {
        return None;
    }

    let mut sorted = sample.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    if n % 2 == 1 {
        Some(sorted[n / 2])
    } else {
        Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    }
}

/// Sample variance with Bessel's correction, `None` when n < 2
pub fn sample_variance(sample: &[f64]) -> Option<f64> {
    if sample.len() < 2 {
        return None;
    }
    let mean = mean(sample)?;
    let sum_sq: f64 = sample.iter().map(|x| (x - mean).powi(2)).sum();
    Some(sum_sq / (sample.len() - 1) as f64)
}

/// Sample standard deviation, `None` when n < 2
pub fn sample_stddev(sample: &[f64]) -> Option<f64> {
    sample_variance(sample).map(f64::sqrt)
}
