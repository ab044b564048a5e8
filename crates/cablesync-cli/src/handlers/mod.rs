//! Command handlers.
//!
//! Each handler receives the composed [`CliContext`](crate::bootstrap::CliContext)
//! and the parsed arguments for its command. Handlers delegate the work to
//! `AppCore` services and only own the terminal output.
//!
//! Handlers return `anyhow::Result`; `main` maps the error to an exit code
//! through [`CliError`](crate::error::CliError).

pub mod check;
pub mod forward;
pub mod list;
pub mod query;
pub mod run;
pub mod seed;
