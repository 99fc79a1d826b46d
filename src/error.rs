//! Errors raised while loading the hourly input.

use std::path::PathBuf;

use thiserror::Error;

/// Malformed or unreadable input. Any of these aborts the run.
#[derive(Debug, Error)]
pub enum InputError {
    /// The input file could not be opened or read.
    #[error("cannot read \"{}\": {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV layer rejected the file.
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The spreadsheet could not be opened or has no readable sheet.
    #[error("cannot read workbook \"{}\": {message}", path.display())]
    Workbook { path: PathBuf, message: String },

    /// The file extension names no supported format.
    #[error("unsupported input format \"{0}\" (expected csv, xlsx, xlsm, xls or ods)")]
    UnsupportedFormat(String),

    /// The header row lacks a required column.
    #[error("missing required column \"{0}\"")]
    MissingColumn(&'static str),

    /// A cell could not be parsed.
    #[error("row {row}: {column} value \"{value}\" is not {expected}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
        expected: &'static str,
    },
}
