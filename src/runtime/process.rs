//! Child process execution and process replacement.

use anyhow::{Context, Result};
use std::convert::Infallible;
use std::path::Path;
use std::process::{Command, Stdio};

use super::RealRuntime;

/// Captured result of a finished child process.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub success: bool,
    pub stdout: String,
}

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn run_capture_impl(&self, program: &Path, args: &[&str]) -> Result<ProcessOutput> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .with_context(|| format!("Failed to run {:?}", program))?;
        Ok(ProcessOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn run_quiet_impl(&self, program: &Path, args: &[&str]) -> Result<bool> {
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .with_context(|| format!("Failed to run {:?}", program))?;
        Ok(status.success())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn run_interactive_impl(&self, program: &Path, args: &[&str]) -> Result<bool> {
        let status = Command::new(program)
            .args(args)
            .status()
            .with_context(|| format!("Failed to run {:?}", program))?;
        Ok(status.success())
    }

    #[cfg(unix)]
    #[tracing::instrument(skip(self))]
    pub(crate) fn exec_impl(&self, program: &Path) -> Result<Infallible> {
        use std::os::unix::process::CommandExt;

        // exec only returns on failure
        let err = Command::new(program).exec();
        Err(err).with_context(|| format!("Failed to replace the current process with {:?}", program))
    }

    #[cfg(not(unix))]
    #[tracing::instrument(skip(self))]
    pub(crate) fn exec_impl(&self, program: &Path) -> Result<Infallible> {
        anyhow::bail!(
            "Interactive sessions require a Unix shell; cannot exec {:?}",
            program
        )
    }
}
