//! Human-readable columnar report

use crate::report::{console_rows, ReportOptions, ReportRow};

/// Render the console report
///
/// `labels` are all test names of the run; the name column is sized to the
/// longest of them even when some rows are filtered out.
pub fn render_text(
    feature: &str,
    labels: &[String],
    rows: &[ReportRow<'_>],
    options: &ReportOptions,
    max_outliers_removed: usize,
) -> String {
    let width = 2 + labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!("\nTest of feature '{}'\n\n", feature));
    out.push_str(&format!("{:<width$}{}\n", " ", "   Before          After"));
    out.push_str(&format!(
        "{:<width$}{}\n",
        " ", "  Mean StdDev     Mean StdDev   Confidence   Change"
    ));

    for row in console_rows(rows, options) {
        out.push_str(&format_row(row, width));
        out.push('\n');
    }

    out.push_str(&format!(
        "\nAt most {} outliers rejected per test per set.\n",
        max_outliers_removed
    ));
    out
}

fn format_row(row: &ReportRow<'_>, width: usize) -> String {
    let r = row.record;
    let marker = if row.significant {
        ""
    } else {
        "  (insignificant)"
    };
    format!(
        "{:<width$}{:6.1} {:6.1}   {:6.1} {:6.1}  {:8.2}%  {:+8.1}%{}",
        r.label,
        r.old_mean,
        r.old_stddev,
        r.new_mean,
        r.new_stddev,
        r.confidence_percent,
        r.percent_diff,
        marker
    )
}
