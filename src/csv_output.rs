//! CSV output of comparison results for spreadsheet analysis

use std::io::Write;
use std::path::Path;

use crate::report::ReportRow;

const HEADER: &str = "\"test\",\"before mean\",\"before std dev\",\"after mean\",\"after std dev\",\"percent diff\",\"diff mean\",\"confidence\",\"t-value\"";

/// CSV output formatter
///
/// Every row is written regardless of significance; the console report is
/// the only place insignificant results can be hidden.
#[derive(Debug)]
pub struct CsvOutput<'a> {
    rows: &'a [ReportRow<'a>],
}

impl<'a> CsvOutput<'a> {
    pub fn new(rows: &'a [ReportRow<'a>]) -> Self {
        Self { rows }
    }

    /// Quote a text field, doubling embedded quotes
    fn quote_field(field: &str) -> String {
        format!("\"{}\"", field.replace('"', "\"\""))
    }

    fn format_row(row: &ReportRow<'_>) -> String {
        let r = row.record;
        let numbers = [
            r.old_mean,
            r.old_stddev,
            r.new_mean,
            r.new_stddev,
            r.percent_diff,
            r.mean_diff,
            r.confidence_percent,
            r.t_value,
        ];

        let mut fields = vec![Self::quote_field(&r.label)];
        fields.extend(numbers.iter().map(|n| format!("{:.6}", n)));
        fields.join(",")
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::new();

        output.push_str(HEADER);
        output.push('\n');

        for row in self.rows {
            output.push_str(&Self::format_row(row));
            output.push('\n');
        }

        output
    }

    /// Write the CSV to `path`, replacing any existing file
    pub fn write_to(&self, path: &Path) -> std::io::Result<()> {
        tracing::info!("Outputting to file '{}'", path.display());
        let mut file = std::fs::File::create(path)?;
        file.write_all(self.to_csv().as_bytes())?;
        file.flush()
    }
}
