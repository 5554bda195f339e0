//! Runtime abstraction for system operations.
//!
//! This module provides a trait-based abstraction over the process and file
//! system surface this tool touches, enabling dependency injection and
//! testability. The command handlers are pure functions of (arguments,
//! backend state); everything ambient flows through this trait.
//!
//! # Structure
//!
//! - `env` - Temp directory lookup
//! - `fs` - File system operations (write, permissions, directory probe)
//! - `process` - Child process execution and process replacement

mod env;
mod fs;
mod process;

use anyhow::Result;
use std::convert::Infallible;
use std::path::{Path, PathBuf};

pub use process::ProcessOutput;

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // Environment
    fn temp_dir(&self) -> PathBuf;

    // File System
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
    fn is_dir(&self, path: &Path) -> bool;

    /// Set file permissions (mode) on Unix systems. No-op on Windows.
    fn set_permissions(&self, path: &Path, mode: u32) -> Result<()>;

    // Child processes
    /// Run a command to completion, capturing stdout. stderr is discarded.
    fn run_capture<'a>(&self, program: &Path, args: &[&'a str]) -> Result<ProcessOutput>;

    /// Run a command with all output discarded. Returns whether it exited zero.
    fn run_quiet<'a>(&self, program: &Path, args: &[&'a str]) -> Result<bool>;

    /// Run a command with inherited stdio. Returns whether it exited zero.
    fn run_interactive<'a>(&self, program: &Path, args: &[&'a str]) -> Result<bool>;

    /// Replace the current process image with `program`.
    ///
    /// On success there is no return: control transfers entirely to the new
    /// program. An `Err` means the hand-off did not happen.
    fn exec(&self, program: &Path) -> Result<Infallible>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn temp_dir(&self) -> PathBuf {
        self.temp_dir_impl()
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.write_impl(path, contents)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.is_dir_impl(path)
    }

    fn set_permissions(&self, path: &Path, mode: u32) -> Result<()> {
        self.set_permissions_impl(path, mode)
    }

    fn run_capture<'a>(&self, program: &Path, args: &[&'a str]) -> Result<ProcessOutput> {
        self.run_capture_impl(program, args)
    }

    fn run_quiet<'a>(&self, program: &Path, args: &[&'a str]) -> Result<bool> {
        self.run_quiet_impl(program, args)
    }

    fn run_interactive<'a>(&self, program: &Path, args: &[&'a str]) -> Result<bool> {
        self.run_interactive_impl(program, args)
    }

    fn exec(&self, program: &Path) -> Result<Infallible> {
        self.exec_impl(program)
    }
}
