//! pagecheck
//!
//! Visual verification of local static pages through a headless browser.
//! A verification run loads a `file://` URL, waits for a named element to
//! become visible, and captures a full-page screenshot for human inspection.
//!
//! # Features
//!
//! - **Browser probe** (default): renders the page in headless Chrome via
//!   the Chrome DevTools Protocol and produces a real screenshot
//! - **DOM probe**: browser-less fallback that parses the document and
//!   checks element visibility statically (no screenshot support)
//! - **Scoped sessions**: the browser is launched per run and released on
//!   every exit path, including navigation and assertion failures
//!
//! # Example
//!
//! ```no_run
//! use pagecheck::{CheckConfig, PageVisualChecker, VerificationRequest};
//! use std::path::Path;
//!
//! # fn main() -> pagecheck::Result<()> {
//! let checker = PageVisualChecker::new(CheckConfig::default());
//! let request = VerificationRequest::for_document(
//!     Path::new("/srv/site"),
//!     "index.html",
//!     "#editor-container",
//!     "shots/verification.png",
//! )?;
//! let report = checker.verify(&request)?;
//! println!("wrote {} bytes to {}", report.bytes_written, report.output_path.display());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;
use url::Url;

pub mod error;
pub use error::{Error, Result};

pub mod checker;
pub use checker::PageVisualChecker;

#[cfg(feature = "browser")]
pub mod cdp;

// Static DOM probe (no browser, no screenshots)
#[cfg(feature = "dom")]
pub mod dom;

// Async-friendly facade (worker-thread backed)
pub mod async_api;
pub use async_api::Checker;

/// Configuration for a verification run
///
/// Defaults are conservative: a desktop-sized viewport, a generous page-load
/// timeout and a shorter visibility wait, matching what interactive UI checks
/// usually need.
///
/// # Examples
///
/// ```
/// let cfg = pagecheck::CheckConfig::default();
/// assert!(cfg.user_agent.contains("PageCheck"));
/// ```
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// User agent string the probe identifies as
    pub user_agent: String,
    /// Viewport dimensions
    pub viewport: Viewport,
    /// Timeout for page loads in milliseconds
    pub timeout_ms: u64,
    /// Budget for the element-visibility wait in milliseconds
    pub wait_timeout_ms: u64,
    /// Interval between visibility checks in milliseconds
    pub poll_interval_ms: u64,
    /// Which probe carries out the verification
    pub strategy: StrategyKind,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 PageCheck/0.1"
                .to_string(),
            viewport: Viewport::default(),
            timeout_ms: 30_000,
            wait_timeout_ms: 10_000,
            poll_interval_ms: 100,
            strategy: StrategyKind::default(),
        }
    }
}

/// Viewport dimensions
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Probe selection for a verification run.
///
/// Verifying the visual state of a page admits more than one probe; the
/// choice is configuration, not a code change. `Browser` loads the document
/// in headless Chrome and is the only strategy that produces screenshots;
/// `Dom` inspects the document statically and is useful where no browser is
/// installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrategyKind {
    /// Load the page in a headless browser (full verification)
    #[default]
    Browser,
    /// Parse the document and check visibility statically
    Dom,
}

impl FromStr for StrategyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "browser" | "chrome" => Ok(StrategyKind::Browser),
            "dom" | "static" => Ok(StrategyKind::Dom),
            other => Err(Error::Config(format!(
                "Unknown strategy '{}' (expected 'browser' or 'dom')",
                other
            ))),
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::Browser => write!(f, "browser"),
            StrategyKind::Dom => write!(f, "dom"),
        }
    }
}

/// A single verification request: which page, which element, where the
/// screenshot goes.
///
/// The page URL is always explicit. `for_document` builds it from a named
/// document root rather than the process working directory, so two runs from
/// different directories verify the same page.
#[derive(Debug, Clone)]
pub struct VerificationRequest {
    /// Fully formed URL of the page under test
    pub page_url: Url,
    /// Selector for the element expected to become visible
    pub selector: String,
    /// Where the screenshot is written
    pub output_path: PathBuf,
}

impl VerificationRequest {
    /// Build a request for a document under an explicit root directory.
    ///
    /// The root must exist (it anchors the `file://` URL); the document may
    /// not — a missing document surfaces as a navigation error when the
    /// probe loads it, not here.
    pub fn for_document(
        root: &Path,
        document: &str,
        selector: &str,
        output_path: impl Into<PathBuf>,
    ) -> Result<Self> {
        let root = std::fs::canonicalize(root).map_err(|e| {
            Error::Config(format!("Document root {} is not accessible: {}", root.display(), e))
        })?;
        let full = root.join(document);
        let page_url = Url::from_file_path(&full)
            .map_err(|_| Error::Config(format!("Cannot build a file URL for {}", full.display())))?;
        Self::from_url(page_url, selector, output_path)
    }

    /// Build a request for an already-formed URL.
    pub fn from_url(page_url: Url, selector: &str, output_path: impl Into<PathBuf>) -> Result<Self> {
        if selector.trim().is_empty() {
            return Err(Error::Config("Selector must not be empty".into()));
        }
        Ok(Self {
            page_url,
            selector: selector.to_string(),
            output_path: output_path.into(),
        })
    }
}

/// Outcome of a successful verification run
#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    /// URL that was loaded
    pub page_url: String,
    /// Selector that became visible
    pub selector: String,
    /// Path of the written screenshot
    pub output_path: PathBuf,
    /// Size of the screenshot in bytes
    pub bytes_written: u64,
    /// Wall-clock duration of the run in milliseconds
    pub elapsed_ms: u64,
}

/// Core trait for verification probes
///
/// A probe owns one scoped browser (or browser-equivalent) session. The
/// checker drives it through the linear open → wait → capture sequence and
/// calls `close` on every exit path.
pub trait Probe {
    /// Launch a new probe session with the given configuration
    fn new(config: CheckConfig) -> Result<Self>
    where
        Self: Sized;

    /// Navigate to a URL and wait for the document to finish loading
    fn open(&mut self, url: &Url) -> Result<()>;

    /// Wait until at least one element matching `selector` is visible
    fn wait_visible(&mut self, selector: &str) -> Result<()>;

    /// Capture the current page state as PNG bytes
    fn capture_png(&mut self) -> Result<Vec<u8>>;

    /// Release the session and terminate any child process
    fn close(self) -> Result<()>;
}
