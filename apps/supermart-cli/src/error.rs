//! # CLI Error Type
//!
//! Every failure of the `supermart-bill` binary funnels into [`CliError`].
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Conversion                                │
//! │                                                                         │
//! │  CoreError ──────────┐                                                  │
//! │  std::io::Error ─────┼──► CliError ──► stderr message + exit code       │
//! │  serde_json::Error ──┤                                                  │
//! │  bad arguments ──────┘                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An invalid coupon is NOT an error here: the bill simply reports it as
//! inactive.

use std::path::PathBuf;

use supermart_core::CoreError;
use thiserror::Error;

/// Errors surfaced by the terminal front end.
#[derive(Debug, Error)]
pub enum CliError {
    /// Pricing or basket rule violation (unknown product, quantity limit...).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Catalog file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog file or bill output is not valid JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Bad command-line arguments.
    #[error("{0}")]
    Usage(String),
}

impl CliError {
    /// Creates a usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        CliError::Usage(message.into())
    }

    /// Process exit status for this error.
    ///
    /// Usage mistakes exit with 2, everything else with 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Usage(_) => 2,
            _ => 1,
        }
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use supermart_core::ProductId;

    #[test]
    fn test_core_error_passes_through() {
        let err: CliError = CoreError::UnknownProduct(ProductId::new("caviar")).into();
        assert_eq!(err.to_string(), "Unknown product: caviar");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_usage_exit_code() {
        let err = CliError::usage("--item needs a value");
        assert_eq!(err.to_string(), "--item needs a value");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_io_error_names_path() {
        let err = CliError::Io {
            path: PathBuf::from("catalog.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().starts_with("Failed to read catalog.json"));
    }
}
