//! Error types for page verification

use thiserror::Error;

/// Result type alias for verification operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while verifying a page
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to start the probe (e.g. the browser did not launch)
    #[error("Probe launch failed: {0}")]
    Launch(String),

    /// The target URL could not be loaded
    #[error("Failed to load URL: {0}")]
    Navigation(String),

    /// The expected element did not become visible within the wait budget
    #[error("Element '{selector}' did not become visible within {timeout_ms}ms")]
    Assertion { selector: String, timeout_ms: u64 },

    /// The probe could not produce a screenshot
    #[error("Capture failed: {0}")]
    Capture(String),

    /// The screenshot could not be written to disk
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration or request
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Browser backend error
    #[cfg(feature = "browser")]
    #[error("Browser backend error: {0}")]
    Backend(String),
}

#[cfg(feature = "browser")]
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Backend(err.to_string())
    }
}

impl Error {
    /// Whether this error is a verification failure (the page loaded but did
    /// not look right) rather than a fault in the probe or environment.
    pub fn is_verification_failure(&self) -> bool {
        matches!(self, Error::Assertion { .. })
    }
}
