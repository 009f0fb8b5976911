//! Error types for replot operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while preparing plot data.
#[derive(Error, Debug)]
pub enum Error {
    /// Sampling interval with `lo >= hi` or non-finite bounds.
    #[error("Invalid interval: [{lo}, {hi}]")]
    InvalidInterval {
        /// Lower bound.
        lo: f64,
        /// Upper bound.
        hi: f64,
    },

    /// Malformed argument (grid shape, group name, option type, etc.).
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Grid whose symbols do not each form a single rectangle.
    #[error("Unparsable grid: symbol '{symbol}' at row {row}, column {col} is not a single rectangle")]
    UnparsableGrid {
        /// Offending symbol.
        symbol: char,
        /// Row of the cell where the failure was detected.
        row: usize,
        /// Column of the cell where the failure was detected.
        col: usize,
    },

    /// Data length mismatch between x and y arrays.
    #[error("Data length mismatch: x has {x_len} elements, y has {y_len} elements")]
    DataLengthMismatch {
        /// Length of x data.
        x_len: usize,
        /// Length of y data.
        y_len: usize,
    },

    /// Empty data provided where non-empty is required.
    #[error("Empty data provided")]
    EmptyData,

    /// Configuration parse error.
    #[error("Config parse error at line {line}: {message}")]
    Config {
        /// Line of the YAML document (0 when unknown).
        line: usize,
        /// Parser message.
        message: String,
    },

    /// I/O error (configuration files).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Shorthand for [`Error::InvalidParameter`].
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidParameter(message.into())
    }
}
