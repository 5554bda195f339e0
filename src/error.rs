//! Error taxonomy for bvm commands.
//!
//! Every variant is terminal to the current invocation: `main` prints the
//! message behind an `Error: ` prefix on stdout and exits non-zero. The
//! tolerated best-effort unlink/link steps never produce these values; they
//! log and continue (see `Homebrew::try_unlink`).

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A positional argument is missing or empty.
    #[error("Usage: bvm {command} <formula> <version>")]
    Usage { command: &'static str },

    /// The user supplied a combined `name@version` where two separate
    /// arguments were expected.
    #[error(
        "The syntax 'bvm {command} {given}' is not supported.\nPlease use: bvm {command} {name} {version}"
    )]
    Syntax {
        command: &'static str,
        given: String,
        name: String,
        version: String,
    },

    /// The requested versioned formula is not installed.
    #[error("Formula '{formula}' is not installed.\nYou may install it with:\n  brew install {formula}")]
    NotInstalled { formula: String },

    /// No versioned variants of the base formula are installed at all.
    #[error("No versioned formulas for '{base}' are installed.")]
    NoVersionedInstalled { base: String },

    /// The requested version is absent, but sibling versions are installed.
    #[error(
        "Formula '{formula}' is not installed.\n\nAvailable versions installed:\n{}\n\nYou may install it with:\n  brew install {formula}",
        .available.join("\n")
    )]
    NotInstalledAvailable {
        formula: String,
        available: Vec<String>,
    },

    /// Homebrew itself could not be invoked, or a read-only query failed.
    #[error("Failed to query Homebrew: {detail}")]
    Backend {
        detail: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// The versioned formula's bin directory is missing after linking.
    #[error("binary directory not found: {}", .path.display())]
    Resolution { path: PathBuf },

    /// Handing control to the session shell failed.
    #[error("Failed to start the session shell: {0:#}")]
    Launch(#[source] anyhow::Error),

    /// The final relink failed; the system default was not changed.
    #[error("Failed to link {formula}; the system default was not changed")]
    Link { formula: String },
}
