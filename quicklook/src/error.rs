//! Error types for `QuickLook`
//!
//! Every command returns [`QuickLookError`]; `main` maps it to a process exit
//! code via [`QuickLookError::exit_code`].

use std::path::PathBuf;
use thiserror::Error;

pub use quicklook_core::error::{ConfigError, Severity, ValidationIssue};

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `QuickLook` CLI operations.
///
/// These codes follow Unix conventions.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Configuration error (invalid YAML, validation failure, bad manifest)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `QuickLook` operations.
#[derive(Debug, Error)]
pub enum QuickLookError {
    /// Configuration loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Asset tree error
    #[error(transparent)]
    Site(#[from] SiteError),

    /// Invalid command-line usage not caught by the argument parser
    #[error("usage error: {0}")]
    Usage(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl QuickLookError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Json(_) => ExitCode::CONFIG_ERROR,
            Self::Site(SiteError::Io { .. }) => ExitCode::IO_ERROR,
            Self::Site(_) => ExitCode::ERROR,
            Self::Usage(_) => ExitCode::USAGE_ERROR,
        }
    }
}

// ============================================================================
// Site Errors
// ============================================================================

/// Errors raised while reading or rewriting the asset tree.
///
/// Conditions the batch jobs absorb (missing thumbnails, missing HTML
/// markers, absent discipline folders) are reported as data and logged, not
/// raised here.
#[derive(Debug, Error)]
pub enum SiteError {
    /// A filesystem operation failed on a specific path
    #[error("{action} {path}: {source}")]
    Io {
        /// What was being attempted ("read", "write", "move", ...)
        action: &'static str,
        /// Path the operation targeted
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// An existing manifest could not be parsed
    #[error("invalid manifest {path}: {source}")]
    InvalidManifest {
        /// Path to the manifest
        path: PathBuf,
        /// Parser error
        #[source]
        source: serde_json::Error,
    },
}

impl SiteError {
    /// Builds a closure wrapping an [`std::io::Error`] with its action and path.
    pub fn io(action: &'static str, path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io {
            action,
            path,
            source,
        }
    }
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `QuickLook` operations.
pub type Result<T> = std::result::Result<T, QuickLookError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitCode::SUCCESS, 0);
        assert_eq!(ExitCode::ERROR, 1);
        assert_eq!(ExitCode::CONFIG_ERROR, 2);
        assert_eq!(ExitCode::IO_ERROR, 3);
        assert_eq!(ExitCode::USAGE_ERROR, 64);
    }

    #[test]
    fn test_config_error_exit_code() {
        let err: QuickLookError = ConfigError::MissingFile {
            path: PathBuf::from("/test"),
        }
        .into();
        assert_eq!(err.exit_code(), ExitCode::CONFIG_ERROR);
    }

    #[test]
    fn test_site_io_error_exit_code() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: QuickLookError = SiteError::io("write", "index.html")(io_err).into();
        assert_eq!(err.exit_code(), ExitCode::IO_ERROR);
        assert!(err.to_string().starts_with("write index.html"));
    }

    #[test]
    fn test_invalid_manifest_exit_code() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: QuickLookError = SiteError::InvalidManifest {
            path: PathBuf::from("manifest.json"),
            source,
        }
        .into();
        assert_eq!(err.exit_code(), ExitCode::ERROR);
        assert!(err.to_string().contains("manifest.json"));
    }


    #[test]
    fn test_usage_error_exit_code() {
        let err = QuickLookError::Usage("bad".to_string());
        assert_eq!(err.exit_code(), ExitCode::USAGE_ERROR);
    }
}
