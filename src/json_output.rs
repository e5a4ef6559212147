//! JSON output format for comparison results
//!
//! Non-finite numbers (an infinite t-statistic from zero-variance samples)
//! serialize as `null`.

use serde::Serialize;

use crate::comparison::ComparisonRecord;
use crate::report::{console_rows, ReportOptions, ReportRow};

/// A single test's result with its significance verdict
#[derive(Debug, Clone, Serialize)]
pub struct JsonResult<'a> {
    #[serde(flatten)]
    pub record: &'a ComparisonRecord,
    pub significant: bool,
}

/// Complete JSON report
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput<'a> {
    /// Name of the test sequence (empty when not given)
    pub feature: &'a str,
    pub min_confidence: f64,
    pub max_outliers_removed: usize,
    pub results: Vec<JsonResult<'a>>,
}

impl<'a> JsonOutput<'a> {
    /// Build the report from prepared rows, honoring `significant_only`
    pub fn new(
        feature: &'a str,
        rows: &[ReportRow<'a>],
        options: &ReportOptions,
        max_outliers_removed: usize,
    ) -> Self {
        Self {
            feature,
            min_confidence: options.min_confidence,
            max_outliers_removed,
            results: console_rows(rows, options)
                .map(|row| JsonResult {
                    record: row.record,
                    significant: row.significant,
                })
                .collect(),
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
