//! Presentation helpers for terminal output.

mod tables;

pub use tables::{format_field_value, format_optional, print_separator, truncate_string};
