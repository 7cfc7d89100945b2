use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use crate::inventory::valuation::error::{Result, ValuationError};

/// Default directive used when neither `RUST_LOG` nor an explicit level is
/// given.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Installs the global fmt subscriber, writing to stderr so that stdout only
/// carries results. `RUST_LOG` takes precedence over `level`.
pub fn init_logging(level: Option<&str>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.unwrap_or(DEFAULT_LOG_LEVEL)))
        .map_err(|error| ValuationError::Logging(error.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| ValuationError::Logging(error.to_string()))
}
