use std::path::PathBuf;

use log::debug;

use crate::brew::Homebrew;
use crate::error::{Error, Result};
use crate::formula::FormulaRequest;
use crate::runtime::Runtime;

use super::ohai;

/// Make the chosen version the system-wide default by relinking Homebrew's
/// active variant.
///
/// The unlink steps are tolerant: their failure only means nothing (or a
/// stale partial link) was there to remove, and the force-link resolves the
/// conflict. The final link is the one step that must succeed.
#[tracing::instrument(skip(runtime, brew_program))]
pub fn set_default<R: Runtime>(
    runtime: &R,
    name: Option<&str>,
    version: Option<&str>,
    brew_program: Option<PathBuf>,
) -> Result<()> {
    let request = FormulaRequest::from_args(name, version, "set")?;
    let brew = Homebrew::new(runtime, brew_program);
    let target = request.versioned_name();
    debug!("Setting {} as the system default", target);

    if !brew.is_installed(&target)? {
        let available = brew.installed_variants(request.name())?;
        if available.is_empty() {
            return Err(Error::NoVersionedInstalled {
                base: request.name().to_string(),
            });
        }
        return Err(Error::NotInstalledAvailable {
            formula: target,
            available,
        });
    }

    let base_installed = brew.is_installed(request.name())?;

    ohai(format!(
        "Setting {} default to version {} globally...",
        request.name(),
        request.version()
    ));

    if base_installed {
        // Clear the existing default link; a failure just means nothing was linked.
        brew.try_unlink(request.name());
    } else {
        ohai(format!(
            "Base formula '{}' not found. Creating it as a link to {}...",
            request.name(),
            target
        ));
    }

    // Guard against a stale partial link of the variant itself.
    brew.try_unlink(&target);

    brew.link_overwrite(&target)?;

    ohai(format!(
        "Successfully set {} {} as the system default",
        request.name(),
        request.version()
    ));
    Ok(())
}
