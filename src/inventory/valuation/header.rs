use crate::inventory::valuation::error::MissingColumnError;
use crate::inventory::valuation::model::{Column, HeaderIndex};
use crate::inventory::valuation::tsv::split_fields;

/// Locates the quantity and cost columns in a header line.
///
/// Names are compared case-insensitively after trimming surrounding
/// whitespace, and must otherwise match exactly. When a name is declared more
/// than once the leftmost declaration wins. Scanning stops as soon as both
/// columns are known.
pub fn resolve_headers(header_line: &str) -> Result<HeaderIndex, MissingColumnError> {
    let quantity = Column::Quantity.name().to_lowercase();
    let cost = Column::Cost.name().to_lowercase();

    let mut quantity_index = None;
    let mut cost_index = None;

    for (position, field) in split_fields(header_line).into_iter().enumerate() {
        let name = field.trim().to_lowercase();
        if quantity_index.is_none() && name == quantity {
            quantity_index = Some(position);
        } else if cost_index.is_none() && name == cost {
            cost_index = Some(position);
        }

        if quantity_index.is_some() && cost_index.is_some() {
            break;
        }
    }

    match (quantity_index, cost_index) {
        (Some(quantity_index), Some(cost_index)) => Ok(HeaderIndex {
            quantity_index,
            cost_index,
        }),
        (quantity_index, cost_index) => {
            let mut missing = Vec::new();
            if quantity_index.is_none() {
                missing.push(Column::Quantity);
            }
            if cost_index.is_none() {
                missing.push(Column::Cost);
            }
            Err(MissingColumnError::new(missing))
        }
    }
}
