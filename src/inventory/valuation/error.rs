use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::inventory::valuation::model::Column;

/// Convenient alias for fallible results returned by the glue layer.
pub type Result<T> = std::result::Result<T, ValuationError>;

/// Error type for everything around the valuation core: reading feeds,
/// decoding request envelopes, and setting up the process.
///
/// The valuation core itself never produces this type; a feed always values
/// to a number.
#[derive(Debug, Error)]
pub enum ValuationError {
    /// Wrapper for IO failures such as reading the feed from disk.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON parsing or serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raised when the caller sent a request the handlers cannot serve.
    #[error("Client error: {0}")]
    Client(String),

    /// Raised when the service could not build a response.
    #[error("Service error: {0}")]
    Service(String),

    /// Raised by strict callers when the feed header could not be resolved
    /// and the feed would otherwise bill as zero.
    #[error("feed valued as zero because its header was rejected: {0}")]
    SoftZero(MissingColumnError),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

/// The header line lacks at least one of the required columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
pub struct MissingColumnError {
    missing: Vec<Column>,
}

impl MissingColumnError {
    /// Builds the error from the columns that were not located. Columns are
    /// kept in `Quantity`, `Cost` order regardless of input order.
    pub fn new(missing: impl IntoIterator<Item = Column>) -> Self {
        let mut missing: Vec<Column> = missing.into_iter().collect();
        missing.sort();
        missing.dedup();
        Self { missing }
    }

    /// Columns that could not be located in the header line.
    pub fn missing(&self) -> &[Column] {
        &self.missing
    }
}

impl fmt::Display for MissingColumnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.missing.iter().map(|column| column.name()).collect();
        write!(
            f,
            "required column header(s) not found (case-insensitive): {}",
            names.join(", ")
        )
    }
}

/// A data row whose quantity or cost could not be turned into a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RowCoercionError {
    /// The row is shorter than the column position declared by the header.
    #[error("{column} column at index {index} is out of range for a row with {field_count} field(s)")]
    MissingField {
        column: Column,
        index: usize,
        field_count: usize,
    },

    /// The field exists but does not hold a finite decimal number.
    #[error("{column} value '{value}' is not a number")]
    NotNumeric { column: Column, value: String },
}
