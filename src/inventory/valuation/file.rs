use std::fmt;

use tracing::{debug, info, instrument, warn};

use crate::inventory::valuation::header::resolve_headers;
use crate::inventory::valuation::model::{Diagnostic, HeaderState, Row, Valuation};
use crate::inventory::valuation::row::value_row;
use crate::inventory::valuation::tsv::{split_fields, split_lines};

/// An inventory feed split into its header and data lines, with the header
/// resolved exactly once.
///
/// The header positions live on this value and nowhere else, so two feeds
/// processed side by side never observe each other's layout.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryFile<'a> {
    header_line: Option<&'a str>,
    data_lines: Vec<&'a str>,
    header: HeaderState,
}

impl<'a> InventoryFile<'a> {
    /// Splits the feed and resolves its header line.
    ///
    /// A header without the required columns leaves the file in the
    /// [`HeaderState::Unresolved`] state; its data lines are then never
    /// valued and the file totals zero.
    #[instrument(level = "debug", skip_all, fields(bytes = contents.len()))]
    pub fn parse(contents: &'a str) -> Self {
        let mut lines = split_lines(contents).into_iter();
        let Some(header_line) = lines.next() else {
            debug!("feed is empty");
            return Self {
                header_line: None,
                data_lines: Vec::new(),
                header: HeaderState::Empty,
            };
        };

        let data_lines: Vec<&'a str> = lines.collect();
        let header = match resolve_headers(header_line) {
            Ok(index) => {
                debug!(
                    quantity_index = index.quantity_index,
                    cost_index = index.cost_index,
                    data_lines = data_lines.len(),
                    "resolved header"
                );
                HeaderState::Resolved(index)
            }
            Err(error) => {
                warn!(header = header_line, %error, "header rejected, feed values as zero");
                HeaderState::Unresolved(error)
            }
        };

        Self {
            header_line: Some(header_line),
            data_lines,
            header,
        }
    }

    pub fn header(&self) -> &HeaderState {
        &self.header
    }

    pub fn header_line(&self) -> Option<&'a str> {
        self.header_line
    }

    pub fn data_lines(&self) -> &[&'a str] {
        &self.data_lines
    }

    /// Evaluates every data line. Returns nothing unless the header resolved.
    pub fn rows(&self) -> Vec<Row<'a>> {
        match self.header.index() {
            Some(index) => self
                .data_lines
                .iter()
                .copied()
                .map(|line| value_row(line, index))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Total value of the inventory, recomputed from the data lines on every
    /// call.
    pub fn total_value(&self) -> f64 {
        self.valuate().total
    }

    /// Values the feed and collects the diagnostics raised along the way.
    #[instrument(level = "debug", skip_all, fields(data_lines = self.data_lines.len()))]
    pub fn valuate(&self) -> Valuation {
        let mut diagnostics = Vec::new();

        let index = match &self.header {
            HeaderState::Empty => return self.valuation(0.0, 0, diagnostics),
            HeaderState::Unresolved(error) => {
                diagnostics.push(Diagnostic::missing_columns(
                    self.header_line.unwrap_or_default(),
                    error,
                ));
                return self.valuation(0.0, 0, diagnostics);
            }
            HeaderState::Resolved(index) => *index,
        };

        let mut total = 0.0;
        for (offset, line) in self.data_lines.iter().enumerate() {
            let row = value_row(line, index);
            total += row.total;

            if let Some(defect) = row.defect {
                // Line 1 is the header.
                let line_number = offset + 2;
                warn!(line_number, reason = %defect, "row valued as zero");
                diagnostics.push(Diagnostic::row_coercion(
                    line_number,
                    line,
                    &row.columns,
                    index,
                    defect,
                ));
            }
        }

        info!(
            total,
            rows = self.data_lines.len(),
            rejected = diagnostics.len(),
            "valued inventory feed"
        );
        self.valuation(total, self.data_lines.len(), diagnostics)
    }

    fn valuation(
        &self,
        total: f64,
        rows_evaluated: usize,
        diagnostics: Vec<Diagnostic>,
    ) -> Valuation {
        Valuation {
            total,
            header: self.header.clone(),
            rows_evaluated,
            diagnostics,
        }
    }
}

/// Values a raw feed in one call.
pub fn value_contents(contents: &str) -> Valuation {
    InventoryFile::parse(contents).valuate()
}

impl fmt::Display for InventoryFile<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.rows();
        writeln!(f, "InventoryFile(")?;
        writeln!(f, "  num_rows={},", rows.len())?;

        let headers = self.header_line.map(split_fields).unwrap_or_default();
        let (quantity_index, cost_index) = match self.header.index() {
            Some(index) => (
                index.quantity_index.to_string(),
                index.cost_index.to_string(),
            ),
            None => ("unresolved".to_string(), "unresolved".to_string()),
        };
        writeln!(f, "  HeaderIndex(")?;
        writeln!(f, "    headers={headers:?},")?;
        writeln!(f, "    quantity_index={quantity_index},")?;
        writeln!(f, "    cost_index={cost_index},")?;
        writeln!(f, "  ),")?;

        for row in &rows {
            writeln!(f, "  Row(")?;
            writeln!(f, "    columns={:?},", row.columns)?;
            writeln!(f, "    cost={},", row.cost)?;
            writeln!(f, "    quantity={},", row.quantity)?;
            writeln!(f, "    total_value={},", row.total)?;
            writeln!(f, "  ),")?;
        }

        write!(f, ")")
    }
}
