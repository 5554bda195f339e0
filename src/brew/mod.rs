//! Homebrew client: installation queries and link management.
//!
//! Homebrew is the sole source of truth for what is installed and what is
//! linked. Every query shells out again rather than caching, because
//! installs and uninstalls happen out of band between invocations.

use std::collections::BTreeSet;
use std::path::PathBuf;

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::formula::VERSION_SEPARATOR;
use crate::runtime::Runtime;

/// Default executable name, overridable with `--brew` / `BVM_BREW`.
const DEFAULT_BREW: &str = "brew";

pub struct Homebrew<'a, R: Runtime> {
    runtime: &'a R,
    program: PathBuf,
}

impl<'a, R: Runtime> Homebrew<'a, R> {
    pub fn new(runtime: &'a R, program: Option<PathBuf>) -> Self {
        Self {
            runtime,
            program: program.unwrap_or_else(|| PathBuf::from(DEFAULT_BREW)),
        }
    }

    /// All formulae Homebrew currently reports as installed.
    pub fn list_installed(&self) -> Result<BTreeSet<String>> {
        let output = self
            .runtime
            .run_capture(&self.program, &["list", "--formula"])
            .map_err(|source| self.backend_unreachable(source))?;
        if !output.success {
            return Err(Error::Backend {
                detail: "'brew list --formula' exited with a failure".to_string(),
                source: None,
            });
        }
        Ok(output
            .stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Exact-match membership in the installed formula list.
    pub fn is_installed(&self, name: &str) -> Result<bool> {
        Ok(self.list_installed()?.contains(name))
    }

    /// Installed versioned variants of `base`, e.g. `python@3.11` for `python`.
    pub fn installed_variants(&self, base: &str) -> Result<Vec<String>> {
        let prefix = format!("{base}{VERSION_SEPARATOR}");
        Ok(self
            .list_installed()?
            .into_iter()
            .filter(|name| name.starts_with(&prefix))
            .collect())
    }

    /// Install prefix of a formula, e.g. `/opt/homebrew/opt/python@3.11`.
    pub fn prefix(&self, name: &str) -> Result<PathBuf> {
        let output = self
            .runtime
            .run_capture(&self.program, &["--prefix", name])
            .map_err(|source| self.backend_unreachable(source))?;
        if !output.success {
            return Err(Error::Backend {
                detail: format!("'brew --prefix {name}' exited with a failure"),
                source: None,
            });
        }
        Ok(PathBuf::from(output.stdout.trim()))
    }

    /// Best-effort unlink. Failure is expected when nothing is linked; it is
    /// logged and never surfaced.
    pub fn try_unlink(&self, name: &str) {
        match self.runtime.run_quiet(&self.program, &["unlink", name]) {
            Ok(true) => debug!("Unlinked {}", name),
            Ok(false) => debug!("brew unlink {} exited non-zero, continuing", name),
            Err(e) => warn!("brew unlink {} could not run: {}, continuing", name, e),
        }
    }

    /// Best-effort force link, used when only the prefix lookup needs to
    /// resolve and a later probe is the authoritative check.
    pub fn try_link_overwrite(&self, name: &str) {
        match self
            .runtime
            .run_interactive(&self.program, &["link", "--force", "--overwrite", name])
        {
            Ok(true) => debug!("Linked {}", name),
            Ok(false) => debug!("brew link {} exited non-zero, continuing", name),
            Err(e) => warn!("brew link {} could not run: {}, continuing", name, e),
        }
    }

    /// Force link with overwrite. A failure here means the system default
    /// was not changed.
    pub fn link_overwrite(&self, name: &str) -> Result<()> {
        let linked = self
            .runtime
            .run_interactive(&self.program, &["link", "--force", "--overwrite", name])
            .map_err(|source| self.backend_unreachable(source))?;
        if linked {
            Ok(())
        } else {
            Err(Error::Link {
                formula: name.to_string(),
            })
        }
    }

    fn backend_unreachable(&self, source: anyhow::Error) -> Error {
        Error::Backend {
            detail: format!("could not run {:?}", self.program),
            source: Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{MockRuntime, ProcessOutput};
    use crate::test_utils::expect_list;
    use std::path::Path;

    #[test]
    fn test_list_installed_parses_lines() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_run_capture()
            .withf(|program, args| program == Path::new("brew") && args == ["list", "--formula"])
            .returning(|_, _| {
                Ok(ProcessOutput {
                    success: true,
                    stdout: "git\npython\npython@3.11\n\n  \n".to_string(),
                })
            });

        let brew = Homebrew::new(&runtime, None);
        let installed = brew.list_installed().unwrap();
        assert_eq!(installed.len(), 3);
        assert!(installed.contains("python@3.11"));
    }

    #[test]
    fn test_is_installed_requires_exact_match() {
        let mut runtime = MockRuntime::new();
        expect_list(&mut runtime, &["python@3.11"]);

        let brew = Homebrew::new(&runtime, None);
        assert!(brew.is_installed("python@3.11").unwrap());
        assert!(!brew.is_installed("python").unwrap());
        assert!(!brew.is_installed("python@3").unwrap());
    }

    #[test]
    fn test_installed_variants_filters_on_versioned_prefix() {
        let mut runtime = MockRuntime::new();
        expect_list(
            &mut runtime,
            &["python", "python@3.11", "python@3.9", "pythonic", "ruby@3.2"],
        );

        let brew = Homebrew::new(&runtime, None);
        let variants = brew.installed_variants("python").unwrap();
        assert_eq!(variants, vec!["python@3.11", "python@3.9"]);
    }

    #[test]
    fn test_installed_variants_empty_when_none_match() {
        let mut runtime = MockRuntime::new();
        expect_list(&mut runtime, &["git", "ruby"]);

        let brew = Homebrew::new(&runtime, None);
        assert!(brew.installed_variants("python").unwrap().is_empty());
    }

    #[test]
    fn test_spawn_failure_is_backend_error() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_run_capture()
            .returning(|_, _| Err(anyhow::anyhow!("No such file or directory")));

        let brew = Homebrew::new(&runtime, None);
        let err = brew.is_installed("python@3.11").unwrap_err();
        assert!(matches!(err, Error::Backend { .. }));
    }

    #[test]
    fn test_failing_list_is_backend_error() {
        let mut runtime = MockRuntime::new();
        runtime.expect_run_capture().returning(|_, _| {
            Ok(ProcessOutput {
                success: false,
                stdout: String::new(),
            })
        });

        let brew = Homebrew::new(&runtime, None);
        let err = brew.list_installed().unwrap_err();
        assert!(matches!(err, Error::Backend { .. }));
    }

    #[test]
    fn test_prefix_trims_trailing_newline() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_run_capture()
            .withf(|_, args| args == ["--prefix", "python@3.11"])
            .returning(|_, _| {
                Ok(ProcessOutput {
                    success: true,
                    stdout: "/opt/homebrew/opt/python@3.11\n".to_string(),
                })
            });

        let brew = Homebrew::new(&runtime, None);
        let prefix = brew.prefix("python@3.11").unwrap();
        assert_eq!(prefix, PathBuf::from("/opt/homebrew/opt/python@3.11"));
    }

    #[test]
    fn test_program_override_is_used() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_run_capture()
            .withf(|program, _| program == Path::new("/fake/brew"))
            .returning(|_, _| {
                Ok(ProcessOutput {
                    success: true,
                    stdout: String::new(),
                })
            });

        let brew = Homebrew::new(&runtime, Some(PathBuf::from("/fake/brew")));
        assert!(brew.list_installed().unwrap().is_empty());
    }

    #[test]
    fn test_try_unlink_swallows_non_zero_exit() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_run_quiet()
            .withf(|_, args| args == ["unlink", "python"])
            .returning(|_, _| Ok(false));

        let brew = Homebrew::new(&runtime, None);
        brew.try_unlink("python"); // must not panic or error
    }

    #[test]
    fn test_try_unlink_swallows_spawn_failure() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_run_quiet()
            .returning(|_, _| Err(anyhow::anyhow!("brew is gone")));

        let brew = Homebrew::new(&runtime, None);
        brew.try_unlink("python");
    }

    #[test]
    fn test_try_link_overwrite_swallows_failure() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_run_interactive()
            .withf(|_, args| args == ["link", "--force", "--overwrite", "python@3.11"])
            .returning(|_, _| Ok(false));

        let brew = Homebrew::new(&runtime, None);
        brew.try_link_overwrite("python@3.11");
    }

    #[test]
    fn test_link_overwrite_failure_is_link_error() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_run_interactive()
            .withf(|_, args| args == ["link", "--force", "--overwrite", "python@3.11"])
            .returning(|_, _| Ok(false));

        let brew = Homebrew::new(&runtime, None);
        let err = brew.link_overwrite("python@3.11").unwrap_err();
        match err {
            Error::Link { formula } => assert_eq!(formula, "python@3.11"),
            other => panic!("Expected Link error, got {other:?}"),
        }
    }

    #[test]
    fn test_link_overwrite_success() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_run_interactive()
            .returning(|_, _| Ok(true));

        let brew = Homebrew::new(&runtime, None);
        brew.link_overwrite("python@3.11").unwrap();
    }
}
