use std::fmt;

use serde::Serialize;

use crate::inventory::valuation::error::{MissingColumnError, Result, RowCoercionError, ValuationError};

/// The two columns every inventory feed must declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Column {
    Quantity,
    Cost,
}

impl Column {
    /// Header name as documented for feed providers. Matching is
    /// case-insensitive.
    pub fn name(self) -> &'static str {
        match self {
            Column::Quantity => "Quantity",
            Column::Cost => "Cost",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Zero-based positions of the required columns, resolved once from the
/// header line of a single feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeaderIndex {
    pub quantity_index: usize,
    pub cost_index: usize,
}

impl HeaderIndex {
    pub fn index_of(&self, column: Column) -> usize {
        match column {
            Column::Quantity => self.quantity_index,
            Column::Cost => self.cost_index,
        }
    }
}

/// Outcome of header resolution for one feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum HeaderState {
    /// The feed had no lines at all.
    Empty,
    /// Both required columns were located.
    Resolved(HeaderIndex),
    /// At least one required column is absent; the feed values as zero.
    Unresolved(MissingColumnError),
}

impl HeaderState {
    pub fn index(&self) -> Option<HeaderIndex> {
        match self {
            HeaderState::Resolved(index) => Some(*index),
            HeaderState::Empty | HeaderState::Unresolved(_) => None,
        }
    }
}

/// One evaluated data line. Rows borrow from the feed and are dropped as
/// soon as their value has been folded into the total.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<'a> {
    pub columns: Vec<&'a str>,
    pub cost: f64,
    pub quantity: f64,
    /// `cost * quantity`, or `0.0` when the row could not be coerced.
    pub total: f64,
    pub defect: Option<RowCoercionError>,
}

impl Row<'_> {
    pub fn is_valid(&self) -> bool {
        self.defect.is_none()
    }
}

/// Structured record of a defect found while valuing a feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The header line lacks a required column; no data line was valued.
    MissingColumns {
        header_line: String,
        missing: Vec<Column>,
        message: String,
    },
    /// A data line contributed zero because a required field was unusable.
    RowCoercion {
        /// 1-based line number within the trimmed feed; the header is line 1.
        line_number: usize,
        line: String,
        fields: Vec<String>,
        quantity_index: usize,
        cost_index: usize,
        reason: String,
        error: RowCoercionError,
    },
}

impl Diagnostic {
    pub fn missing_columns(header_line: &str, error: &MissingColumnError) -> Self {
        Diagnostic::MissingColumns {
            header_line: header_line.to_string(),
            missing: error.missing().to_vec(),
            message: error.to_string(),
        }
    }

    pub fn row_coercion(
        line_number: usize,
        line: &str,
        fields: &[&str],
        index: HeaderIndex,
        error: RowCoercionError,
    ) -> Self {
        Diagnostic::RowCoercion {
            line_number,
            line: line.to_string(),
            fields: fields.iter().map(|field| field.to_string()).collect(),
            quantity_index: index.quantity_index,
            cost_index: index.cost_index,
            reason: error.to_string(),
            error,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingColumns {
                header_line,
                message,
                ..
            } => write!(f, "header {header_line:?}: {message}"),
            Diagnostic::RowCoercion {
                line_number,
                fields,
                reason,
                ..
            } => write!(f, "line {line_number}: {reason}; columns: {fields:?}"),
        }
    }
}

/// Result of valuing one feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Valuation {
    /// Sum of `cost * quantity` over every data line.
    pub total: f64,
    pub header: HeaderState,
    /// Number of data lines folded into the total, including the ones that
    /// contributed zero.
    pub rows_evaluated: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl Valuation {
    /// True when the feed had lines but its header could not be resolved,
    /// which is what separates a soft zero from a genuinely empty feed.
    pub fn is_soft_zero(&self) -> bool {
        matches!(self.header, HeaderState::Unresolved(_))
    }

    /// Rejects soft-zero valuations for callers that would rather fail than
    /// bill a misconfigured feed as zero.
    pub fn into_strict(self) -> Result<Self> {
        match self.header {
            HeaderState::Unresolved(error) => Err(ValuationError::SoftZero(error)),
            _ => Ok(self),
        }
    }
}
