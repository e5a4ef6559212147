//! perfcmp - statistical comparison of before/after benchmark results
//!
//! This library loads two sets of repeated benchmark measurements, rejects
//! outliers, and reports per test whether the "after" set differs
//! significantly from the "before" set, by how much, and with what
//! confidence (Student's two-sample t-test).

pub mod cli;
pub mod comparison;
pub mod csv_output;
pub mod dataset;
pub mod json_output;
pub mod report;
pub mod text_output;
