//! Transient activation sessions.
//!
//! A `use` invocation prepares a one-shot launch script that puts the chosen
//! version first on the search path, decorates the prompt and hands the user
//! an interactive shell. The script is the only artifact this tool
//! generates; it lives in the temp directory under a name unique to the
//! formula, version and moment of invocation, and is never cleaned up here.

use std::convert::Infallible;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use log::debug;

use crate::error::{Error, Result};
use crate::formula::FormulaRequest;
use crate::runtime::Runtime;

/// Environment descriptor for a transient session.
#[derive(Debug, Clone)]
pub struct ActivationSession {
    name: String,
    version: String,
    bin_dir: PathBuf,
}

/// A prepared hand-off: the launch script exists and is executable.
///
/// Command handlers return this instead of exec-ing in place, so callers
/// and tests can observe that a launch was requested; only [`Launch::hand_off`]
/// is a terminal action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launch {
    pub script: PathBuf,
}

impl ActivationSession {
    pub fn new(request: &FormulaRequest, bin_dir: PathBuf) -> Self {
        Self {
            name: request.name().to_string(),
            version: request.version().to_string(),
            bin_dir,
        }
    }

    /// Write the launch script to the temp directory and mark it executable.
    pub fn write_script<R: Runtime>(&self, runtime: &R) -> Result<Launch> {
        let script = runtime.temp_dir().join(format!(
            "bvm_{}_{}_{}.sh",
            self.name,
            self.version,
            unix_timestamp()
        ));
        runtime
            .write(&script, self.render().as_bytes())
            .map_err(Error::Launch)?;
        runtime
            .set_permissions(&script, 0o755)
            .map_err(Error::Launch)?;
        debug!("Wrote session script {:?}", script);
        Ok(Launch { script })
    }

    /// The script body. `$SHELL` is left for the script itself to resolve,
    /// so the session picks up the user's shell from the inherited
    /// environment at launch time.
    fn render(&self) -> String {
        format!(
            r#"#!/bin/bash

# Put the selected formula first on the search path
export PATH="{bin_dir}:$PATH"

# Show the active formula version in the prompt
if [[ -n $PS1 ]]; then
    PS1="({name}@{version}) $PS1"
fi

echo ""
echo "🚀 Now using {name} {version}"
echo ""
if command -v {name} &> /dev/null; then
    echo "Version information:"
    {name} --version 2>/dev/null || echo "No version information available"
fi
echo ""
echo "Type 'exit' to return to the normal shell."
echo ""

exec $(basename $SHELL)
"#,
            bin_dir = self.bin_dir.display(),
            name = self.name,
            version = self.version,
        )
    }
}

impl Launch {
    /// Replace the current process with the session script.
    ///
    /// Only returns on failure; after a successful hand-off the invoking
    /// process is gone and control rests with the session shell.
    pub fn hand_off<R: Runtime>(&self, runtime: &R) -> Result<Infallible> {
        runtime.exec(&self.script).map_err(Error::Launch)
    }
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
