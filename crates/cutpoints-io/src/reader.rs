//! CSV point reader with full input validation.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use cutpoints_core::Point;
use tracing::{debug, info, instrument};

use crate::IoError;
use crate::domain::PointSet;

/// Order of two values within one feature. NaN sorts after every number and
/// equals itself.
fn value_order(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Reads pre-aggregated points from a CSV file.
///
/// Expected CSV format:
/// - Header row required: `feature,value,<label>,<label>,...`
/// - One row per distinct `(feature, value)`, holding the number of examples
///   of each label that take that value
/// - Rows sorted ascending by feature, then value; `NaN` is accepted and
///   sorts last within its feature
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::CsvParse`] | Malformed CSV record |
/// | [`IoError::MissingLabelColumns`] | Header has fewer than three columns |
/// | [`IoError::EmptyDataset`] | Zero data rows after header |
/// | [`IoError::InconsistentRowLength`] | Row has different column count than header |
/// | [`IoError::InvalidFeature`] | Feature is not a non-negative integer |
/// | [`IoError::InvalidValue`] | Value is not a float |
/// | [`IoError::InvalidCount`] | Label count is not a non-negative integer |
/// | [`IoError::UnsortedKey`] | Row sorts before the previous one |
/// | [`IoError::DuplicateKey`] | Same `(feature, value)` appears twice |
pub struct PointReader {
    path: PathBuf,
}

impl PointReader {
    /// Create a new reader for the given CSV file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    fn csv_error(&self, e: csv::Error) -> IoError {
        IoError::CsvParse {
            path: self.path.clone(),
            offset: e.position().map_or(0, |p| p.byte()),
            source: e,
        }
    }

    /// Read and validate the CSV file, returning a [`PointSet`].
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<PointSet, IoError> {
        let file = std::fs::File::open(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;

        // flexible(true) so that our own InconsistentRowLength check fires
        // instead of a low-level CsvParse error.
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let header = rdr.headers().map_err(|e| self.csv_error(e))?;
        let expected_cols = header.len();
        if expected_cols < 3 {
            return Err(IoError::MissingLabelColumns {
                path: self.path.clone(),
                got: expected_cols,
            });
        }
        let label_names: Vec<String> = header.iter().skip(2).map(str::to_string).collect();
        let n_labels = label_names.len();
        debug!(n_labels, "read CSV header");

        let mut points: Vec<Point> = Vec::new();
        for (row_index, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| self.csv_error(e))?;

            if record.len() != expected_cols {
                return Err(IoError::InconsistentRowLength {
                    path: self.path.clone(),
                    row_index,
                    expected: expected_cols,
                    got: record.len(),
                });
            }

            let raw_feature = &record[0];
            let feature: usize = raw_feature.parse().map_err(|_| IoError::InvalidFeature {
                path: self.path.clone(),
                row_index,
                raw: raw_feature.to_string(),
            })?;

            let raw_value = &record[1];
            let value: f64 = raw_value.parse().map_err(|_| IoError::InvalidValue {
                path: self.path.clone(),
                row_index,
                raw: raw_value.to_string(),
            })?;
            // One NaN representation regardless of sign or payload.
            let value = if value.is_nan() { f64::NAN } else { value };

            let counts = record
                .iter()
                .skip(2)
                .enumerate()
                .map(|(label_index, raw)| {
                    raw.parse::<u64>().map_err(|_| IoError::InvalidCount {
                        path: self.path.clone(),
                        row_index,
                        label_index,
                        raw: raw.to_string(),
                    })
                })
                .collect::<Result<Vec<u64>, IoError>>()?;

            if let Some(prev) = points.last() {
                let order = prev
                    .feature
                    .index()
                    .cmp(&feature)
                    .then_with(|| value_order(prev.value, value));
                match order {
                    Ordering::Less => {}
                    Ordering::Equal => {
                        return Err(IoError::DuplicateKey {
                            path: self.path.clone(),
                            feature,
                            value,
                            first_row: row_index - 1,
                            second_row: row_index,
                        });
                    }
                    Ordering::Greater => {
                        return Err(IoError::UnsortedKey {
                            path: self.path.clone(),
                            row_index,
                            feature,
                            value,
                        });
                    }
                }
            }

            points.push(Point::new(feature, value, counts));
        }

        if points.is_empty() {
            return Err(IoError::EmptyDataset {
                path: self.path.clone(),
            });
        }

        let set = PointSet::new(points, label_names);
        info!(
            n_points = set.len(),
            n_labels,
            n_features_observed = set.n_features_observed(),
            "points loaded"
        );
        Ok(set)
    }
}
