// Per-test before/after comparison record

use serde::{Deserialize, Serialize};

use super::descriptive::DescriptiveStat;
use super::error::{ComparisonError, Result, RunSet};
use super::ttest::ttest_ind;

/// Which way a difference counts as an improvement
///
/// Applied uniformly to every test in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// `new - old`, relative to the old mean (scores, throughput)
    #[default]
    HigherIsBetter,
    /// `old - new`, relative to the new mean (timings, sizes)
    LowerIsBetter,
}

impl Direction {
    pub fn from_invert(invert: bool) -> Self {
        if invert {
            Direction::LowerIsBetter
        } else {
            Direction::HigherIsBetter
        }
    }
}

/// Outcome of comparing one test's before and after measurements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRecord {
    pub label: String,
    pub old_mean: f64,
    pub old_stddev: f64,
    pub new_mean: f64,
    pub new_stddev: f64,
    /// Signed mean delta in the run's direction
    pub mean_diff: f64,
    /// `mean_diff` as a percentage of the direction's baseline mean
    pub percent_diff: f64,
    /// Student's t-statistic, `(old - new) / se`
    pub t_value: f64,
    /// `100 * (1 - p)` for the two-tailed p-value
    pub confidence_percent: f64,
}

/// Build the comparison record for a single test
///
/// `old_sample` and `new_sample` are the outlier-filtered measurements that
/// `old` and `new` were computed from. A zero baseline mean is an error.
pub fn compare_test(
    label: &str,
    old: &DescriptiveStat,
    old_sample: &[f64],
    new: &DescriptiveStat,
    new_sample: &[f64],
    direction: Direction,
) -> Result<ComparisonRecord> {
    let (mean_diff, baseline, baseline_set) = match direction {
        Direction::HigherIsBetter => (new.mean - old.mean, old.mean, RunSet::Before),
        Direction::LowerIsBetter => (old.mean - new.mean, new.mean, RunSet::After),
    };

    if baseline == 0.0 {
        return Err(ComparisonError::ZeroBaselineMean {
            label: label.to_string(),
            set: baseline_set,
        });
    }
    let percent_diff = 100.0 * mean_diff / baseline;

    let test = ttest_ind(old_sample, new_sample).map_err(|source| {
        let set = if old_sample.len() < 2 {
            RunSet::Before
        } else {
            RunSet::After
        };
        ComparisonError::Statistics {
            label: label.to_string(),
            set,
            source,
        }
    })?;

    Ok(ComparisonRecord {
        label: label.to_string(),
        old_mean: old.mean,
        old_stddev: old.stddev,
        new_mean: new.mean,
        new_stddev: new.stddev,
        mean_diff,
        percent_diff,
        t_value: test.statistic,
        confidence_percent: 100.0 * (1.0 - test.pvalue),
    })
}
