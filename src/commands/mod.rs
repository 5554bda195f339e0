//! Command handlers.
//!
//! Each command is a plain function over the injected [`crate::runtime::Runtime`],
//! so the handlers are pure functions of (arguments, backend state) and the
//! Homebrew backend can be replaced with a test double.

mod set_default;
mod use_version;

pub use set_default::set_default;
pub use use_version::use_version;

/// Informational progress line, Homebrew-style.
pub(crate) fn ohai(message: impl AsRef<str>) {
    println!("==> {}", message.as_ref());
}
