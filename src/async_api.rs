//! Async-friendly verification facade backed by a worker thread.
//!
//! The worker thread owns a synchronous `PageVisualChecker` and executes
//! commands sent from async tasks, so callers get an async interface without
//! requiring the probes to be `Send` across threads.

use crate::checker::PageVisualChecker;
use crate::{CheckConfig, Error, Result, VerificationReport, VerificationRequest};
use std::sync::mpsc::{self, Sender};
use std::thread;
use tokio::sync::oneshot;

enum Command {
    Verify(VerificationRequest, oneshot::Sender<Result<VerificationReport>>),
    Close(oneshot::Sender<()>),
}

/// Async handle to a checker running on a dedicated worker thread.
///
/// Cloning the handle shares the same worker; each `verify` still launches
/// and releases its own probe session.
#[derive(Clone)]
pub struct Checker {
    cmd_tx: Sender<Command>,
}

impl Checker {
    /// Create a new async checker (spawns the worker thread).
    pub fn new(config: Option<CheckConfig>) -> Self {
        let config = config.unwrap_or_default();
        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();

        thread::spawn(move || {
            let checker = PageVisualChecker::new(config);

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    Command::Verify(request, resp) => {
                        let res = checker.verify(&request);
                        let _ = resp.send(res);
                    }
                    Command::Close(resp) => {
                        let _ = resp.send(());
                        break;
                    }
                }
            }
        });

        Self { cmd_tx }
    }

    /// Run one verification on the worker thread.
    pub async fn verify(&self, request: VerificationRequest) -> Result<VerificationReport> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Verify(request, tx))
            .map_err(|e| Error::Config(format!("Checker worker is gone: {}", e)))?;
        rx.await
            .map_err(|e| Error::Config(format!("Verification canceled: {}", e)))?
    }

    /// Shut down the worker thread.
    pub async fn close(self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Close(tx));
        rx.await
            .map_err(|e| Error::Config(format!("Close canceled: {}", e)))?;
        Ok(())
    }
}
