// Storage module for exporting filtered views
// Author: Gabriel Demetrios Lafis

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use log::{error, info};
use thiserror::Error;

use crate::data::{CsvSink, DataSink};
use crate::processing::FilteredView;

/// Errors raised while exporting a view
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("permission denied writing {}", .path.display())]
    WritePermission {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}: {message}", .path.display())]
    WriteIo { path: PathBuf, message: String },
}

impl ExportError {
    /// Classify an I/O failure for the given destination
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => ExportError::WritePermission {
                path: path.to_path_buf(),
                source: err,
            },
            _ => ExportError::WriteIo {
                path: path.to_path_buf(),
                message: err.to_string(),
            },
        }
    }

    /// Classify a CSV writer failure for the given destination
    pub fn from_csv(path: &Path, err: csv::Error) -> Self {
        if err.is_io_error() {
            if let csv::ErrorKind::Io(io_err) = err.into_kind() {
                return Self::from_io(path, io_err);
            }
            return ExportError::WriteIo {
                path: path.to_path_buf(),
                message: "CSV writer I/O failure".to_string(),
            };
        }

        ExportError::WriteIo {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

/// Confirmation of a completed export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReceipt {
    pub path: PathBuf,
    pub rows: usize,
}

impl fmt::Display for ExportReceipt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Saved {} records to '{}'", self.rows, self.path.display())
    }
}

/// Write a view to a CSV file with a header row, replacing any existing file.
///
/// Concurrent exports to the same destination are not coordinated; the
/// last write wins.
pub fn export<P: AsRef<Path>>(view: &FilteredView, destination: P) -> Result<ExportReceipt, ExportError> {
    let path = destination.as_ref();
    let sink = CsvSink::new(path);

    match sink.write(view.records()) {
        Ok(rows) => {
            info!("Exported {} records to {}", rows, sink.name());
            Ok(ExportReceipt {
                path: path.to_path_buf(),
                rows,
            })
        }
        Err(err) => {
            error!("Export to {} failed: {}", sink.name(), err);
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::record;
    use crate::data::{read, Dataset};
    use crate::processing::FilterSpec;

    #[test]
    fn test_export_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Filtered_Data.csv");
        let mut priced = record("B", "fish, salted", "Toys", 7);
        priced.value = 1234.56;
        priced.transaction_id = Some("abc".to_string());
        let dataset = Dataset::from_records(vec![
            record("A", "fish", "Toys", 1),
            priced,
            record("A", "shoes", "Clothing", 3),
        ]);
        let view = FilterSpec::new().category("Toys").apply(&dataset);

        let receipt = export(&view, &path).unwrap();
        let reloaded = read(&path).unwrap();

        assert_eq!(receipt.rows, 2);
        assert_eq!(reloaded.records(), view.to_records().as_slice());
    }

    #[test]
    fn test_export_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "stale contents that are much longer than a header row").unwrap();
        let dataset = Dataset::from_records(vec![record("A", "fish", "Toys", 1)]);

        export(&dataset.view(), &path).unwrap();

        assert_eq!(read(&path).unwrap().len(), 1);
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("out.csv");
        let dataset = Dataset::from_records(vec![record("A", "fish", "Toys", 1)]);

        let result = export(&dataset.view(), &path);

        assert!(matches!(result, Err(ExportError::WriteIo { .. })));
    }

    #[test]
    fn test_permission_denied_is_classified() {
        let err = ExportError::from_io(
            Path::new("x.csv"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );

        assert!(matches!(err, ExportError::WritePermission { .. }));
    }
}
