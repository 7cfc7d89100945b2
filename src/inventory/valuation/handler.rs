//! Request envelope handlers. An event is a JSON document whose `body`
//! carries the feed, either as a string or as an object with a `data` string.

use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::inventory::valuation::error::{Result, ValuationError};
use crate::inventory::valuation::file::value_contents;
use crate::inventory::valuation::model::{Diagnostic, HeaderState};

/// Response returned by [`handle_post`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuationResponse {
    pub total_value: f64,
    pub rows_evaluated: usize,
    pub header: HeaderState,
    pub diagnostics: Vec<Diagnostic>,
}

/// Echoes the event back to the caller.
#[instrument(level = "info", skip_all)]
pub fn handle_get(event: &Value) -> Value {
    info!(%event, "get request");
    serde_json::json!({ "event": event })
}

/// Values the feed carried by the event.
#[instrument(level = "info", skip_all)]
pub fn handle_post(event: &Value) -> Result<Value> {
    let feed = feed_from_event(event)?;
    let valuation = value_contents(feed);
    info!(
        total_value = valuation.total,
        diagnostics = valuation.diagnostics.len(),
        "post request valued"
    );

    let response = ValuationResponse {
        total_value: valuation.total,
        rows_evaluated: valuation.rows_evaluated,
        header: valuation.header,
        diagnostics: valuation.diagnostics,
    };
    serde_json::to_value(response)
        .map_err(|error| ValuationError::Service(format!("failed to encode response: {error}")))
}

fn feed_from_event(event: &Value) -> Result<&str> {
    let body = event
        .get("body")
        .ok_or_else(|| ValuationError::Client("event has no body".into()))?;

    match body {
        Value::String(feed) => Ok(feed.as_str()),
        Value::Object(fields) => fields
            .get("data")
            .and_then(Value::as_str)
            .ok_or_else(|| ValuationError::Client("body has no 'data' string".into())),
        _ => Err(ValuationError::Client(
            "body must be a string or an object with a 'data' string".into(),
        )),
    }
}
