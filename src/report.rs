//! Ordering and significance thresholding of comparison results
//!
//! Renderers (text, CSV, JSON) all consume the rows prepared here, so the
//! confidence threshold is applied in exactly one place.

use crate::comparison::{ComparisonRecord, DEFAULT_MIN_CONFIDENCE};

/// How to order results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Largest percentage change first
    #[default]
    Descending,
    /// Smallest percentage change first
    Ascending,
    /// Keep the test order of the input files
    Unsorted,
}

impl SortOrder {
    pub fn from_flags(reverse: bool, unsorted: bool) -> Self {
        match (unsorted, reverse) {
            (true, _) => SortOrder::Unsorted,
            (false, true) => SortOrder::Ascending,
            (false, false) => SortOrder::Descending,
        }
    }
}

/// Presentation options
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    pub sort: SortOrder,
    /// Confidence (percent) below which a result is insignificant
    pub min_confidence: f64,
    /// Leave insignificant results out of the console report
    pub significant_only: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            sort: SortOrder::default(),
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            significant_only: false,
        }
    }
}

/// A comparison record paired with its significance verdict
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow<'a> {
    pub record: &'a ComparisonRecord,
    pub significant: bool,
}

/// Sort records and mark each one significant or not
///
/// Every record is returned; use [`console_rows`] to drop insignificant ones
/// when `significant_only` is set. NaN percentages sort last.
pub fn prepare<'a>(records: &'a [ComparisonRecord], options: &ReportOptions) -> Vec<ReportRow<'a>> {
    let mut rows: Vec<ReportRow<'a>> = records
        .iter()
        .map(|record| ReportRow {
            record,
            significant: record.confidence_percent >= options.min_confidence,
        })
        .collect();

    match options.sort {
        SortOrder::Descending => rows.sort_by(|a, b| {
            nan_last(a.record.percent_diff, b.record.percent_diff)
                .then_with(|| b.record.percent_diff.total_cmp(&a.record.percent_diff))
        }),
        SortOrder::Ascending => rows.sort_by(|a, b| {
            nan_last(a.record.percent_diff, b.record.percent_diff)
                .then_with(|| a.record.percent_diff.total_cmp(&b.record.percent_diff))
        }),
        SortOrder::Unsorted => {}
    }

    rows
}

/// Rows to print on the console, honoring `significant_only`
pub fn console_rows<'a, 'r>(
    rows: &'r [ReportRow<'a>],
    options: &ReportOptions,
) -> impl Iterator<Item = &'r ReportRow<'a>> {
    let significant_only = options.significant_only;
    rows.iter().filter(move |row| !significant_only || row.significant)
}

// NaN after every number, whatever the sort direction
fn nan_last(first: f64, second: f64) -> std::cmp::Ordering {
    first.is_nan().cmp(&second.is_nan())
}
