//! Formula naming and argument validation.
//!
//! Homebrew installs parallel versions of a formula under suffixed names
//! (`python@3.11`). This module derives that versioned name from the two
//! positional command arguments and rejects malformed invocations.

use crate::error::{Error, Result};

/// Separator between a base formula name and its version suffix.
pub const VERSION_SEPARATOR: char = '@';

/// A validated (base name, version) pair from command arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormulaRequest {
    name: String,
    version: String,
}

impl FormulaRequest {
    /// Validate the two positional arguments of a `use`/`set` invocation.
    ///
    /// A missing or empty argument is a usage error. A base name that
    /// already carries the `@` separator means the user typed the combined
    /// `name@version` form; the error suggests the corrected two-argument
    /// invocation.
    pub fn from_args(
        name: Option<&str>,
        version: Option<&str>,
        command: &'static str,
    ) -> Result<Self> {
        let (Some(name), Some(version)) = (name, version) else {
            return Err(Error::Usage { command });
        };
        if name.is_empty() || version.is_empty() {
            return Err(Error::Usage { command });
        }

        if name.contains(VERSION_SEPARATOR) {
            let mut parts = name.split(VERSION_SEPARATOR);
            let base = parts.next().unwrap_or_default();
            let suggested = parts.next().unwrap_or_default();
            return Err(Error::Syntax {
                command,
                given: name.to_string(),
                name: base.to_string(),
                version: suggested.to_string(),
            });
        }

        Ok(Self {
            name: name.to_string(),
            version: version.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// The suffixed name Homebrew uses for this version, e.g. `python@3.11`.
    pub fn versioned_name(&self) -> String {
        format!("{}{}{}", self.name, VERSION_SEPARATOR, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_args_valid() {
        let request = FormulaRequest::from_args(Some("python"), Some("3.11"), "use").unwrap();
        assert_eq!(request.name(), "python");
        assert_eq!(request.version(), "3.11");
        assert_eq!(request.versioned_name(), "python@3.11");
    }

    #[test]
    fn test_from_args_missing_version() {
        let err = FormulaRequest::from_args(Some("python"), None, "use").unwrap_err();
        assert!(matches!(err, Error::Usage { command: "use" }));
    }

    #[test]
    fn test_from_args_missing_both() {
        let err = FormulaRequest::from_args(None, None, "set").unwrap_err();
        assert!(matches!(err, Error::Usage { command: "set" }));
    }

    #[test]
    fn test_from_args_empty_strings_are_usage_errors() {
        assert!(matches!(
            FormulaRequest::from_args(Some(""), Some("3.11"), "use").unwrap_err(),
            Error::Usage { .. }
        ));
        assert!(matches!(
            FormulaRequest::from_args(Some("python"), Some(""), "use").unwrap_err(),
            Error::Usage { .. }
        ));
    }

    #[test]
    fn test_from_args_combined_name_is_usage_error_without_second_argument() {
        // `bvm use python@3.11` parses as a lone name; the usage check comes
        // before the separator check.
        let err = FormulaRequest::from_args(Some("python@3.11"), None, "use").unwrap_err();
        assert!(matches!(err, Error::Usage { command: "use" }));
    }

    #[test]
    fn test_from_args_separator_in_name_is_syntax_error() {
        let err = FormulaRequest::from_args(Some("python@3.11"), Some("3.11"), "use").unwrap_err();
        match err {
            Error::Syntax {
                command,
                given,
                name,
                version,
            } => {
                assert_eq!(command, "use");
                assert_eq!(given, "python@3.11");
                assert_eq!(name, "python");
                assert_eq!(version, "3.11");
            }
            other => panic!("Expected Syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_from_args_suggestion_splits_on_separator() {
        // Matches split semantics: the first two separator-delimited parts.
        let err =
            FormulaRequest::from_args(Some("python@3.11@extra"), Some("x"), "set").unwrap_err();
        match err {
            Error::Syntax { name, version, .. } => {
                assert_eq!(name, "python");
                assert_eq!(version, "3.11");
            }
            other => panic!("Expected Syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_versioned_name_concatenates_with_separator() {
        let request = FormulaRequest::from_args(Some("node"), Some("18"), "use").unwrap();
        assert_eq!(request.versioned_name(), "node@18");
    }
}
