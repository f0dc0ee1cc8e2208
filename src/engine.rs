//! Engine - invocation of the external simulator binary.
//!
//! The engine is an opaque executable taking three positional arguments:
//!
//! ```text
//! engine_binary <working_dir> <seed> <steps>
//! ```
//!
//! It consumes the "map" and "network" containers from the working
//! directory and writes an "outputs" container back into it. A positive
//! `steps` trains for that many iterations; a negative value selects the
//! engine's replay/inspect mode for `|steps|` - the harness passes the
//! value through without interpreting it.
//!
//! The call blocks until the subprocess terminates. Unlike the historical
//! flow, which ignored the exit status entirely, `run` checks it and
//! refuses to let a failed engine look like a completed run. An optional
//! timeout turns a hung engine into an error instead of blocking the
//! harness indefinitely.

use crate::{RelabError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Poll interval while waiting on a timeout-bounded engine run.
const WAIT_POLL: Duration = Duration::from_millis(50);

/// Handle to the external simulator binary.
#[derive(Debug, Clone)]
pub struct Engine {
    binary: PathBuf,
    timeout: Option<Duration>,
}

impl Engine {
    /// Create a handle to the engine executable at `binary`.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            timeout: None,
        }
    }

    /// Bound each run to `timeout`; the process is killed on expiry.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Path to the engine executable.
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Run the engine against `workdir`, blocking until it exits.
    ///
    /// # Errors
    ///
    /// `Process` if the binary cannot be launched, exits with a non-zero
    /// status, is terminated by a signal, or exceeds the configured
    /// timeout. On any error the working directory's outputs must not be
    /// trusted.
    pub fn run(&self, workdir: impl AsRef<Path>, seed: u64, steps: i64) -> Result<()> {
        let workdir = workdir.as_ref();
        info!(
            binary = %self.binary.display(),
            workdir = %workdir.display(),
            seed,
            steps,
            "launching engine"
        );

        let mut cmd = Command::new(&self.binary);
        cmd.arg(workdir)
            .arg(seed.to_string())
            .arg(steps.to_string())
            .stdin(Stdio::null());

        let status = match self.timeout {
            None => cmd.status().map_err(|e| RelabError::Process {
                reason: format!("failed to launch '{}': {}", self.binary.display(), e),
            })?,
            Some(timeout) => {
                let mut child = cmd.spawn().map_err(|e| RelabError::Process {
                    reason: format!("failed to launch '{}': {}", self.binary.display(), e),
                })?;
                let deadline = Instant::now() + timeout;
                loop {
                    match child.try_wait()? {
                        Some(status) => break status,
                        None if Instant::now() >= deadline => {
                            child.kill()?;
                            child.wait()?;
                            return Err(RelabError::Process {
                                reason: format!(
                                    "engine timed out after {:.1}s and was killed",
                                    timeout.as_secs_f64()
                                ),
                            });
                        }
                        None => std::thread::sleep(WAIT_POLL),
                    }
                }
            }
        };

        if !status.success() {
            let reason = match status.code() {
                Some(code) => format!("engine exited with status {}", code),
                None => "engine terminated by signal".to_string(),
            };
            return Err(RelabError::Process { reason });
        }

        debug!("engine completed");
        Ok(())
    }
}
