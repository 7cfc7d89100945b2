use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::inventory::valuation::error::{Result, ValuationError};

/// Where a feed is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Stdin,
    File(PathBuf),
}

impl FeedSource {
    /// Interprets `-` as standard input and anything else as a file path.
    pub fn from_arg(arg: &Path) -> Self {
        if arg.as_os_str() == "-" {
            FeedSource::Stdin
        } else {
            FeedSource::File(arg.to_path_buf())
        }
    }

    /// Reads the whole feed into memory.
    #[instrument(level = "debug", skip_all, fields(source = %self))]
    pub fn read_to_string(&self) -> Result<String> {
        let contents = match self {
            FeedSource::Stdin => {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                buffer
            }
            FeedSource::File(path) => read_feed(path)?,
        };
        debug!(bytes = contents.len(), "feed loaded");
        Ok(contents)
    }
}

impl std::fmt::Display for FeedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedSource::Stdin => write!(f, "<stdin>"),
            FeedSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Reads a feed from disk, reporting a missing file distinctly from other IO
/// failures.
pub fn read_feed(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(ValuationError::MissingInput(path.to_path_buf()));
    }
    Ok(fs::read_to_string(path)?)
}
