pub mod brew;
pub mod commands;
pub mod error;
pub mod formula;
pub mod runtime;
pub mod session;
