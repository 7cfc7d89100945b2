//! Valuation of tab-separated inventory feeds.
//!
//! Brokers and marketplaces broadcast their inventory as TSV files; the value
//! of a feed is the sum over its data rows of `quantity * cost`. The modules are
//! kept narrow: splitting lives in [`inventory::valuation::tsv`], header
//! resolution in [`inventory::valuation::header`], per-row valuation in
//! [`inventory::valuation::row`], and the per-feed orchestration in
//! [`inventory::valuation::file`]. Reading feeds and answering request
//! envelopes sit at the edges in [`inventory::valuation::source`] and
//! [`inventory::valuation::handler`].

pub mod inventory;

pub use inventory::valuation::{
    MissingColumnError, Result, RowCoercionError, ValuationError, error, file, handler, header,
    logging, model, row, source, tsv,
};
