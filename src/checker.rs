//! The verification flow: acquire a probe, navigate, assert visibility,
//! capture, release.
//!
//! The sequence is linear with a single terminal state: the probe session is
//! closed whether or not the intermediate steps succeeded. Screenshot output
//! is written atomically so the output path never holds a partial image.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::warn;

use crate::{
    CheckConfig, Error, Probe, Result, StrategyKind, VerificationReport, VerificationRequest,
};

/// Produces a screenshot of a specified local page after confirming a
/// specified element is visible.
///
/// One probe session is launched per `verify` call and released before the
/// call returns, on success and on every failure kind.
pub struct PageVisualChecker {
    config: CheckConfig,
}

impl PageVisualChecker {
    /// Create a checker with the given configuration
    pub fn new(config: CheckConfig) -> Self {
        Self { config }
    }

    /// The configuration this checker runs with
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Run one verification: load the page, wait for the selector to become
    /// visible, write the screenshot to the requested path.
    ///
    /// Each invocation is a single best-effort attempt; there is no retry
    /// policy at this layer.
    pub fn verify(&self, request: &VerificationRequest) -> Result<VerificationReport> {
        match self.config.strategy {
            #[cfg(feature = "browser")]
            StrategyKind::Browser => {
                let probe = crate::cdp::BrowserProbe::new(self.config.clone())?;
                self.run_with_probe(probe, request)
            }
            #[cfg(feature = "dom")]
            StrategyKind::Dom => {
                let probe = crate::dom::DomProbe::new(self.config.clone())?;
                self.run_with_probe(probe, request)
            }
            #[allow(unreachable_patterns)]
            other => Err(Error::Config(format!(
                "Strategy '{}' is not compiled into this build",
                other
            ))),
        }
    }

    fn run_with_probe<P: Probe>(
        &self,
        mut probe: P,
        request: &VerificationRequest,
    ) -> Result<VerificationReport> {
        let started = Instant::now();

        let outcome = drive(&mut probe, request);

        // Release runs on every exit path. A close failure never masks an
        // earlier step failure.
        if let Err(close_err) = probe.close() {
            match outcome {
                Ok(_) => return Err(close_err),
                Err(step_err) => {
                    warn!("Probe shutdown failed after an earlier error: {}", close_err);
                    return Err(step_err);
                }
            }
        }

        let bytes_written = outcome?;
        Ok(VerificationReport {
            page_url: request.page_url.to_string(),
            selector: request.selector.clone(),
            output_path: request.output_path.clone(),
            bytes_written,
            elapsed_ms: started.elapsed().as_millis() as u64,
        })
    }
}

fn drive<P: Probe>(probe: &mut P, request: &VerificationRequest) -> Result<u64> {
    probe.open(&request.page_url)?;
    probe.wait_visible(&request.selector)?;
    let png = probe.capture_png()?;
    write_atomic(&request.output_path, &png)?;
    Ok(png.len() as u64)
}

/// Write via a temp sibling and rename so the destination either holds the
/// complete image or nothing.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut tmp_name = path.as_os_str().to_os_string();
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);

    fs::write(&tmp, bytes)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}
