use std::path::PathBuf;

use thiserror::Error;

/// Failure to open or decode a whole sheet.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to open workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },
    #[error("workbook {0} has no worksheet")]
    NoWorksheet(PathBuf),
    #[error("invalid CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{0} must contain a JSON array of row objects")]
    NotAnArray(PathBuf),
    #[error("unsupported input format: {0}")]
    UnsupportedFormat(PathBuf),
}

/// Failure confined to a single row. The row is skipped, the sheet is not.
#[derive(Debug, Error)]
pub enum RowError {
    #[error("malformed record: {0}")]
    Malformed(String),
    #[error("expected an object, found {0}")]
    NotAnObject(&'static str),
}

/// Failure to load a normalized listing file.
#[derive(Debug, Error)]
pub enum ListingError {
    #[error("failed to read listing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid listing {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("listing {0} must be a JSON array")]
    NotAnArray(PathBuf),
}
