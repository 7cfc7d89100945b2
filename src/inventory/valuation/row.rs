use crate::inventory::valuation::error::RowCoercionError;
use crate::inventory::valuation::model::{Column, HeaderIndex, Row};
use crate::inventory::valuation::tsv::split_fields;

/// Values a single data line against the header positions of its feed.
///
/// This never fails: a line whose cost or quantity is missing or not numeric
/// produces a row worth `0.0` with the defect attached, and the caller keeps
/// going with the next line.
pub fn value_row(line: &str, index: HeaderIndex) -> Row<'_> {
    let columns = split_fields(line);

    let coerced = read_number(&columns, index, Column::Cost).and_then(|cost| {
        read_number(&columns, index, Column::Quantity).map(|quantity| (cost, quantity))
    });

    match coerced {
        Ok((cost, quantity)) => Row {
            columns,
            cost,
            quantity,
            total: cost * quantity,
            defect: None,
        },
        Err(defect) => Row {
            columns,
            cost: 0.0,
            quantity: 0.0,
            total: 0.0,
            defect: Some(defect),
        },
    }
}

/// Parses a decimal number, accepting integral and fractional values alike.
/// Surrounding whitespace is ignored; non-finite values are rejected.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

fn read_number(
    columns: &[&str],
    index: HeaderIndex,
    column: Column,
) -> Result<f64, RowCoercionError> {
    let position = index.index_of(column);
    let field = columns
        .get(position)
        .ok_or(RowCoercionError::MissingField {
            column,
            index: position,
            field_count: columns.len(),
        })?;

    parse_number(field).ok_or_else(|| RowCoercionError::NotNumeric {
        column,
        value: field.to_string(),
    })
}
