// Before/after benchmark comparison with outlier rejection and hypothesis testing
//
// Pipeline per test column:
//   1. MAD outlier rejection (ratio to the median absolute deviation < 5.0)
//   2. Descriptive statistics (mean, median, Bessel-corrected stddev)
//   3. Student's two-sample t-test (pooled variance, df = n1 + n2 - 2)
//   4. Mean/percentage delta in the configured direction
//
// Everything here is a pure function of the input matrix and the run options.
// Sorting and confidence thresholding belong to the report layer.

mod comparator;
mod config;
mod descriptive;
mod error;
mod outliers;
mod ttest;

pub use comparator::{compare_test, ComparisonRecord, Direction};
pub use config::{ComparisonConfig, ConfigError, DEFAULT_MIN_CONFIDENCE};
pub use descriptive::{describe, mean, median, sample_stddev, DescriptiveStat, StatsError};
pub use error::{ComparisonError, Result, RunSet};
pub use outliers::{filter_outliers, FilteredSample, MAD_OUTLIER_THRESHOLD};
pub use ttest::{student_t_two_tailed_p, ttest_ind, TTestResult};

use crate::dataset::TabularDataset;

/// Output of one comparison run: the per-test records in label order plus
/// the largest number of outliers rejected from any single test column.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRun {
    pub records: Vec<ComparisonRecord>,
    pub max_outliers_removed: usize,
}

/// Compare every test column of `before` against the same column of `after`
///
/// `labels` names the columns positionally and must have exactly as many
/// entries as both datasets have columns. Any shape problem is reported
/// before statistics are computed. A numeric failure in one test aborts the
/// whole run.
///
/// # Example
/// ```
/// use perfcmp::comparison::{run_comparison, Direction};
/// use perfcmp::dataset::TabularDataset;
///
/// let before = TabularDataset::from_columns(vec![vec![10.0, 10.0, 10.0, 10.0]]);
/// let after = TabularDataset::from_columns(vec![vec![12.0, 12.0, 12.0, 12.0]]);
/// let labels = vec!["L1".to_string()];
///
/// let run = run_comparison(&before, &after, &labels, Direction::HigherIsBetter).unwrap();
/// assert_eq!(run.records[0].percent_diff, 20.0);
/// assert_eq!(run.records[0].confidence_percent, 100.0);
/// ```
pub fn run_comparison(
    before: &TabularDataset,
    after: &TabularDataset,
    labels: &[String],
    direction: Direction,
) -> Result<ComparisonRun> {
    validate_shape(before, after, labels)?;

    let mut max_outliers_removed = 0;

    tracing::info!("Check for outliers in 'before' data...");
    let old_samples: Vec<Vec<f64>> = before
        .columns()
        .iter()
        .zip(labels)
        .map(|(column, label)| {
            let filtered = filter_outliers(column, label);
            max_outliers_removed = max_outliers_removed.max(filtered.removed);
            filtered.values
        })
        .collect();

    tracing::info!("Check for outliers in 'after' data...");
    let new_samples: Vec<Vec<f64>> = after
        .columns()
        .iter()
        .zip(labels)
        .map(|(column, label)| {
            let filtered = filter_outliers(column, label);
            max_outliers_removed = max_outliers_removed.max(filtered.removed);
            filtered.values
        })
        .collect();

    let mut records = Vec::with_capacity(labels.len());
    for ((label, old), new) in labels.iter().zip(&old_samples).zip(&new_samples) {
        tracing::info!("Computing test {}...", label);
        let old_stats = describe(old).map_err(|source| ComparisonError::Statistics {
            label: label.clone(),
            set: RunSet::Before,
            source,
        })?;
        let new_stats = describe(new).map_err(|source| ComparisonError::Statistics {
            label: label.clone(),
            set: RunSet::After,
            source,
        })?;
        records.push(compare_test(
            label, &old_stats, old, &new_stats, new, direction,
        )?);
    }

    Ok(ComparisonRun {
        records,
        max_outliers_removed,
    })
}

fn validate_shape(
    before: &TabularDataset,
    after: &TabularDataset,
    labels: &[String],
) -> Result<()> {
    if before.column_count() != after.column_count() {
        return Err(ComparisonError::ColumnCountMismatch {
            before: before.column_count(),
            after: after.column_count(),
        });
    }

    if labels.len() != before.column_count() {
        return Err(ComparisonError::LabelCountMismatch {
            labels: labels.len(),
            columns: before.column_count(),
        });
    }

    for (set, dataset) in [(RunSet::Before, before), (RunSet::After, after)] {
        if let Some(idx) = dataset.columns().iter().position(|c| c.is_empty()) {
            return Err(ComparisonError::EmptySample {
                label: labels[idx].clone(),
                set,
            });
        }
    }

    Ok(())
}
