pub mod error;
pub mod file;
pub mod handler;
pub mod header;
pub mod logging;
pub mod model;
pub mod row;
pub mod source;
pub mod tsv;

pub use error::{MissingColumnError, Result, RowCoercionError, ValuationError};
