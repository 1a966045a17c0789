mod dataset;
mod loader;

use std::{error::Error, fmt, io};

pub use dataset::{Dataset, Sample};
pub use loader::{load_csv, read_csv};

/// Errors produced while building or loading a dataset.
///
/// All of them are load-time errors: they abort the run before training starts.
#[derive(Debug)]
pub enum DataError {
    /// The dataset file could not be opened or read.
    Io(io::Error),

    /// The CSV stream itself is malformed.
    Csv(csv::Error),

    /// A data row does not have exactly two fields.
    FieldCount { line: u64, got: usize },

    /// A field could not be parsed as a number.
    NotNumeric { line: u64, field: String },

    /// A field parsed as a number but it is NaN or infinite.
    NotFinite { line: u64, value: f64 },

    /// The `x` and `y` columns have different lengths.
    ColumnMismatch { xs: usize, ys: usize },

    /// There are not enough samples to fit a line.
    TooFewSamples { got: usize, expected: usize },
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Io(e) => write!(f, "io error: {e}"),
            DataError::Csv(e) => write!(f, "malformed csv: {e}"),
            DataError::FieldCount { line, got } => {
                write!(f, "line {line}: expected 2 fields, got {got}")
            }
            DataError::NotNumeric { line, field } => {
                write!(f, "line {line}: '{field}' is not a number")
            }
            DataError::NotFinite { line, value } => {
                write!(f, "line {line}: {value} is not finite")
            }
            DataError::ColumnMismatch { xs, ys } => {
                write!(f, "column length mismatch: {xs} x values and {ys} y values")
            }
            DataError::TooFewSamples { got, expected } => {
                write!(f, "not enough data lines: got {got}, need at least {expected}")
            }
        }
    }
}

impl Error for DataError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DataError::Io(e) => Some(e),
            DataError::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for DataError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for DataError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}
