use std::path::PathBuf;

use log::debug;

use crate::brew::Homebrew;
use crate::error::{Error, Result};
use crate::formula::FormulaRequest;
use crate::runtime::Runtime;
use crate::session::{ActivationSession, Launch};

use super::ohai;

/// Prepare a transient session with the chosen version first on the search
/// path, leaving the system-wide default link untouched.
///
/// Returns the prepared [`Launch`] rather than exec-ing in place; the caller
/// performs the hand-off, which never returns.
#[tracing::instrument(skip(runtime, brew_program))]
pub fn use_version<R: Runtime>(
    runtime: &R,
    name: Option<&str>,
    version: Option<&str>,
    brew_program: Option<PathBuf>,
) -> Result<Launch> {
    let request = FormulaRequest::from_args(name, version, "use")?;
    let brew = Homebrew::new(runtime, brew_program);
    let target = request.versioned_name();
    debug!("Activating {} for a transient session", target);

    if !brew.is_installed(&target)? {
        return Err(Error::NotInstalled { formula: target });
    }

    // The bare base formula may not exist at all; force-link the versioned
    // variant so the prefix lookup below resolves. The bin directory probe
    // is the authoritative check, so a failure here is tolerated.
    if !brew.is_installed(request.name())? {
        ohai(format!(
            "Base formula '{}' not found. Creating a link to {}...",
            request.name(),
            target
        ));
        brew.try_link_overwrite(&target);
    }

    let bin_dir = brew.prefix(&target)?.join("bin");
    if !runtime.is_dir(&bin_dir) {
        return Err(Error::Resolution { path: bin_dir });
    }

    let session = ActivationSession::new(&request, bin_dir);
    let launch = session.write_script(runtime)?;

    ohai(format!(
        "Starting new shell with {} {}...",
        request.name(),
        request.version()
    ));
    println!();

    Ok(launch)
}
