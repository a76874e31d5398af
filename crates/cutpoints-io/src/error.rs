//! I/O error types for cutpoints-io.

use std::path::PathBuf;

use cutpoints_core::CutError;

/// Errors from reading and validating point files.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when the input file does not exist or is unreadable.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when the CSV parser encounters a malformed record.
    #[error("CSV parse error in {path} at byte offset {offset}")]
    CsvParse {
        /// Path to the CSV file.
        path: PathBuf,
        /// Byte offset where the error occurred.
        offset: u64,
        /// Underlying CSV error.
        source: csv::Error,
    },

    /// Returned when the header has no label columns after `feature,value`.
    #[error("header of {path} has {got} columns, expected feature, value and at least one label column")]
    MissingLabelColumns {
        /// Path to the CSV file.
        path: PathBuf,
        /// Number of header columns found.
        got: usize,
    },

    /// Returned when the CSV file contains a header but zero data rows.
    #[error("empty dataset (no data rows) in {path}")]
    EmptyDataset {
        /// Path to the CSV file.
        path: PathBuf,
    },

    /// Returned when a data row has a different number of columns than the header.
    #[error("inconsistent row length in {path}: row {row_index} has {got} columns, expected {expected}")]
    InconsistentRowLength {
        /// Path to the CSV file.
        path: PathBuf,
        /// Zero-based row index (excluding header).
        row_index: usize,
        /// Expected number of columns (from header).
        expected: usize,
        /// Actual number of columns in this row.
        got: usize,
    },

    /// Returned when the feature column is not a non-negative integer.
    #[error("invalid feature index in {path}: row {row_index}, raw value \"{raw}\"")]
    InvalidFeature {
        /// Path to the CSV file.
        path: PathBuf,
        /// Zero-based row index (excluding header).
        row_index: usize,
        /// The raw string that failed to parse.
        raw: String,
    },

    /// Returned when the value column is not a float.
    #[error("invalid value in {path}: row {row_index}, raw value \"{raw}\"")]
    InvalidValue {
        /// Path to the CSV file.
        path: PathBuf,
        /// Zero-based row index (excluding header).
        row_index: usize,
        /// The raw string that failed to parse.
        raw: String,
    },

    /// Returned when a label count is not a non-negative integer.
    #[error("invalid label count in {path}: row {row_index}, label column {label_index}, raw value \"{raw}\"")]
    InvalidCount {
        /// Path to the CSV file.
        path: PathBuf,
        /// Zero-based row index (excluding header).
        row_index: usize,
        /// Zero-based label column (excluding feature and value).
        label_index: usize,
        /// The raw string that failed to parse.
        raw: String,
    },

    /// Returned when a row's `(feature, value)` key sorts before the previous row's.
    #[error("rows out of order in {path}: row {row_index} (feature {feature}, value {value}) sorts before the previous row")]
    UnsortedKey {
        /// Path to the CSV file.
        path: PathBuf,
        /// Zero-based row index (excluding header).
        row_index: usize,
        /// Feature of the offending row.
        feature: usize,
        /// Value of the offending row.
        value: f64,
    },

    /// Returned when the same `(feature, value)` key appears on consecutive rows.
    #[error("duplicate key in {path}: feature {feature}, value {value} at rows {first_row} and {second_row}")]
    DuplicateKey {
        /// Path to the CSV file.
        path: PathBuf,
        /// Feature of the duplicated key.
        feature: usize,
        /// Value of the duplicated key.
        value: f64,
        /// Zero-based row index of the first occurrence.
        first_row: usize,
        /// Zero-based row index of the second occurrence.
        second_row: usize,
    },

    /// Returned when the loaded points cannot be assembled into a collection.
    #[error(transparent)]
    Core(#[from] CutError),
}
