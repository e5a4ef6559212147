//! Loading of benchmark result tables
//!
//! A result file is comma-separated text with one row per benchmark run and
//! one column per test. The first row may instead hold the test names: it is
//! first parsed as numbers, and only if that fails is it taken as a header.
//! Blank cells are skipped, so columns may end up with different lengths.
//! Cells may be double-quoted; quotes are removed before any value is read.

use std::path::Path;
use thiserror::Error;

/// Test names used positionally when neither file nor config names the columns
pub const DEFAULT_LABELS: [&str; 7] = ["L1", "L2", "M", "HT", "VT", "R", "RT"];

/// Errors loading a dataset or naming its columns
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failed to open file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}, column {column}: '{value}' is not a number")]
    InvalidNumber {
        line: usize,
        column: usize,
        value: String,
    },

    #[error("line {line} has a value in column {column} but the header names only {columns} tests")]
    RowTooWide {
        line: usize,
        column: usize,
        columns: usize,
    },

    #[error("no measurements found")]
    NoData,

    #[error("{labels} test labels from {source_name} do not match {columns} data columns")]
    LabelMismatch {
        labels: usize,
        columns: usize,
        source_name: &'static str,
    },

    #[error("{columns} unlabeled columns but only {available} default test names exist")]
    TooManyUnlabeledColumns { columns: usize, available: usize },
}

/// Result type for dataset operations
pub type Result<T> = std::result::Result<T, DatasetError>;

/// One measurement set: a column of repeated runs per test
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TabularDataset {
    header: Option<Vec<String>>,
    columns: Vec<Vec<f64>>,
}

impl TabularDataset {
    /// Build a dataset without test names from per-test columns
    pub fn from_columns(columns: Vec<Vec<f64>>) -> Self {
        Self {
            header: None,
            columns,
        }
    }

    /// Attach test names to the columns
    pub fn with_header(mut self, header: Vec<String>) -> Self {
        self.header = Some(header);
        self
    }

    /// Load a dataset from a CSV file
    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::info!("Load CSV file '{}'", path.display());
        let text = std::fs::read_to_string(path).map_err(|source| DatasetError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parse CSV text into a dataset
    ///
    /// # Example
    /// ```
    /// use perfcmp::dataset::TabularDataset;
    ///
    /// let data = TabularDataset::parse("\"read\",\"write\"\n1.0,2.0\n1.5,\n1.2,2.2\n").unwrap();
    /// assert_eq!(data.header(), Some(&["read".to_string(), "write".to_string()][..]));
    /// assert_eq!(data.columns()[1], vec![2.0, 2.2]);
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let mut rows = text
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, split_cells(line)))
            .filter(|(_, cells)| cells.iter().any(|c| !c.is_empty()));

        let Some((first_line, first_cells)) = rows.next() else {
            return Err(DatasetError::NoData);
        };

        // Phase 1: a first row that is not entirely numeric names the tests
        let header = if first_cells
            .iter()
            .filter(|c| !c.is_empty())
            .all(|c| c.parse::<f64>().is_ok())
        {
            None
        } else {
            let names: Vec<String> = first_cells
                .iter()
                .filter(|c| !c.is_empty())
                .cloned()
                .collect();
            tracing::info!("Found test names in CSV file...");
            tracing::info!("{:?}", names);
            Some(names)
        };

        // Phase 2: every remaining row is numeric
        let data_rows: Vec<(usize, Vec<String>)> = if header.is_some() {
            rows.collect()
        } else {
            std::iter::once((first_line, first_cells)).chain(rows).collect()
        };

        let width = match &header {
            Some(names) => names.len(),
            None => data_rows
                .iter()
                .filter_map(|(_, cells)| cells.iter().rposition(|c| !c.is_empty()))
                .map(|last| last + 1)
                .max()
                .unwrap_or(0),
        };

        let mut columns = vec![Vec::new(); width];
        for (line, cells) in data_rows {
            for (idx, cell) in cells.iter().enumerate() {
                if cell.is_empty() {
                    continue;
                }
                if idx >= width {
                    return Err(DatasetError::RowTooWide {
                        line,
                        column: idx + 1,
                        columns: width,
                    });
                }
                let value = cell.parse::<f64>().map_err(|_| DatasetError::InvalidNumber {
                    line,
                    column: idx + 1,
                    value: cell.clone(),
                })?;
                columns[idx].push(value);
            }
        }

        Ok(Self { header, columns })
    }

    /// Test names from the file's header row, if it had one
    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    /// Measurements per test, in column order
    pub fn columns(&self) -> &[Vec<f64>] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// Split one line into trimmed cells
///
/// A cell whose first non-blank character is `"` is quoted: commas inside it
/// do not split, `""` stands for a literal quote, and the surrounding quotes
/// are removed. Quoting is stripped before any numeric parse.
fn split_cells(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    cell.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if cell.trim().is_empty() => {
                cell.clear();
                in_quotes = true;
            }
            ',' if !in_quotes => cells.push(std::mem::take(&mut cell).trim().to_string()),
            _ => cell.push(c),
        }
    }
    cells.push(cell.trim().to_string());

    cells
}

/// Decide the test names for a before/after pair
///
/// Precedence: before-file header, after-file header, configured labels,
/// then the built-in defaults taken positionally. Explicit names must match
/// the column count exactly.
pub fn resolve_labels(
    before: &TabularDataset,
    after: &TabularDataset,
    configured: Option<&[String]>,
) -> Result<Vec<String>> {
    let columns = before.column_count();

    let (labels, source_name) = match (before.header(), after.header()) {
        (Some(before_names), after_names) => {
            if let Some(after_names) = after_names {
                if after_names != before_names {
                    tracing::warn!(
                        "Test names differ between files, using the 'before' names: {:?} vs {:?}",
                        before_names,
                        after_names
                    );
                }
            }
            (before_names.to_vec(), "the 'before' file header")
        }
        (None, Some(after_names)) => (after_names.to_vec(), "the 'after' file header"),
        (None, None) => match configured {
            Some(names) => (names.to_vec(), "the configuration"),
            None => {
                if columns > DEFAULT_LABELS.len() {
                    return Err(DatasetError::TooManyUnlabeledColumns {
                        columns,
                        available: DEFAULT_LABELS.len(),
                    });
                }
                return Ok(DEFAULT_LABELS[..columns]
                    .iter()
                    .map(|s| s.to_string())
                    .collect());
            }
        },
    };

    if labels.len() != columns {
        return Err(DatasetError::LabelMismatch {
            labels: labels.len(),
            columns,
            source_name,
        });
    }

    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_numeric_only() {
        let data = TabularDataset::parse("1,2,3\n4,5,6\n").unwrap();
        assert!(data.header().is_none());
        assert_eq!(data.column_count(), 3);
        assert_eq!(data.columns()[0], vec![1.0, 4.0]);
        assert_eq!(data.columns()[2], vec![3.0, 6.0]);
    }

    #[test]
    fn test_parse_header_with_quotes() {
        let data = TabularDataset::parse("\"startup\", \"render\"\n10, 20\n").unwrap();
        assert_eq!(data.header(), Some(&names(&["startup", "render"])[..]));
        assert_eq!(data.columns(), &[vec![10.0], vec![20.0]]);
    }

    #[test]
    fn test_parse_blank_cells_make_ragged_columns() {
        let data = TabularDataset::parse("1,2,3\n4,,6\n7,8\n").unwrap();
        assert_eq!(data.columns()[0], vec![1.0, 4.0, 7.0]);
        assert_eq!(data.columns()[1], vec![2.0, 8.0]);
        assert_eq!(data.columns()[2], vec![3.0, 6.0]);
    }

    #[test]
    fn test_parse_skips_blank_lines_and_crlf() {
        let data = TabularDataset::parse("1,2\r\n\r\n , \n3,4\r\n").unwrap();
        assert_eq!(data.columns(), &[vec![1.0, 3.0], vec![2.0, 4.0]]);
    }

    #[test]
    fn test_parse_invalid_number_reports_position() {
        let err = TabularDataset::parse("1,2\n3,oops\n").unwrap_err();
        match err {
            DatasetError::InvalidNumber {
                line,
                column,
                value,
            } => {
                assert_eq!(line, 2);
                assert_eq!(column, 2);
                assert_eq!(value, "oops");
            }
            other => panic!("Expected InvalidNumber, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_row_wider_than_header() {
        let err = TabularDataset::parse("a,b\n1,2,3\n").unwrap_err();
        assert!(matches!(err, DatasetError::RowTooWide { line: 2, .. }));
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(matches!(
            TabularDataset::parse(""),
            Err(DatasetError::NoData)
        ));
        assert!(matches!(
            TabularDataset::parse("\n , \n"),
            Err(DatasetError::NoData)
        ));
    }

    #[test]
    fn test_parse_mixed_first_row_is_header() {
        let data = TabularDataset::parse("1,name\n2,3\n").unwrap();
        assert_eq!(data.header(), Some(&names(&["1", "name"])[..]));
        assert_eq!(data.columns(), &[vec![2.0], vec![3.0]]);
    }

    #[test]
    fn test_parse_quoted_numeric_first_row_is_data() {
        let data = TabularDataset::parse("\"1.0\",\"2.0\"\n3.0,4.0\n5.0,6.0\n").unwrap();
        assert!(data.header().is_none());
        assert_eq!(data.columns(), &[vec![1.0, 3.0, 5.0], vec![2.0, 4.0, 6.0]]);
    }

    #[test]
    fn test_parse_quoted_numbers_in_data_rows() {
        let data = TabularDataset::parse("a,b\n\"3.0\",\"4.0\"\n 5.0 , \"6.0\" \n").unwrap();
        assert_eq!(data.header(), Some(&names(&["a", "b"])[..]));
        assert_eq!(data.columns(), &[vec![3.0, 5.0], vec![4.0, 6.0]]);
    }

    #[test]
    fn test_parse_quoted_header_with_comma() {
        let data = TabularDataset::parse("\"a,b\",c\n1,2\n").unwrap();
        assert_eq!(data.header(), Some(&names(&["a,b", "c"])[..]));
        assert_eq!(data.columns(), &[vec![1.0], vec![2.0]]);
    }

    #[test]
    fn test_split_cells_quoting() {
        assert_eq!(split_cells("\"say \"\"hi\"\"\",x"), vec!["say \"hi\"", "x"]);
        assert_eq!(split_cells("\"\",,3"), vec!["", "", "3"]);
        assert_eq!(split_cells("1.5"), vec!["1.5"]);
    }

    #[test]
    fn test_from_file_missing() {
        let err = TabularDataset::from_file(Path::new("/nonexistent/before.csv")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/before.csv"));
    }

    #[test]
    fn test_resolve_labels_defaults_positional() {
        let data = TabularDataset::from_columns(vec![vec![1.0]; 3]);
        let labels = resolve_labels(&data, &data, None).unwrap();
        assert_eq!(labels, names(&["L1", "L2", "M"]));
    }

    #[test]
    fn test_resolve_labels_too_many_unlabeled() {
        let data = TabularDataset::from_columns(vec![vec![1.0]; 8]);
        assert!(matches!(
            resolve_labels(&data, &data, None),
            Err(DatasetError::TooManyUnlabeledColumns { columns: 8, .. })
        ));
    }

    #[test]
    fn test_resolve_labels_configured_must_match() {
        let data = TabularDataset::from_columns(vec![vec![1.0]; 2]);
        let configured = names(&["a", "b", "c"]);
        assert!(matches!(
            resolve_labels(&data, &data, Some(&configured)),
            Err(DatasetError::LabelMismatch {
                labels: 3,
                columns: 2,
                ..
            })
        ));

        let configured = names(&["a", "b"]);
        assert_eq!(
            resolve_labels(&data, &data, Some(&configured)).unwrap(),
            configured
        );
    }

    #[test]
    fn test_resolve_labels_header_wins_over_config() {
        let before = TabularDataset::from_columns(vec![vec![1.0]; 2]).with_header(names(&["x", "y"]));
        let after = TabularDataset::from_columns(vec![vec![1.0]; 2]);
        let configured = names(&["a", "b"]);
        assert_eq!(
            resolve_labels(&before, &after, Some(&configured)).unwrap(),
            names(&["x", "y"])
        );
    }

    #[test]
    fn test_resolve_labels_before_header_wins_when_headers_differ() {
        let before = TabularDataset::from_columns(vec![vec![1.0]; 2]).with_header(names(&["x", "y"]));
        let after = TabularDataset::from_columns(vec![vec![1.0]; 2]).with_header(names(&["p", "q"]));
        assert_eq!(
            resolve_labels(&before, &after, None).unwrap(),
            names(&["x", "y"])
        );
    }

    #[test]
    fn test_resolve_labels_after_header_used() {
        let before = TabularDataset::from_columns(vec![vec![1.0]; 2]);
        let after = TabularDataset::from_columns(vec![vec![1.0]; 2]).with_header(names(&["p", "q"]));
        assert_eq!(
            resolve_labels(&before, &after, None).unwrap(),
            names(&["p", "q"])
        );
    }
}
