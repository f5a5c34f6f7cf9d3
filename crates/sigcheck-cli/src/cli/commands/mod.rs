//! CLI command handlers.

mod check;

pub use check::run_check;
