//! Table formatting utilities for CLI output.

use cablesync_core::FieldValue;

/// Truncates a string to a maximum number of characters, adding "..." if needed.
///
/// # Examples
///
/// ```rust
/// use cablesync_cli::presentation::truncate_string;
///
/// assert_eq!(truncate_string("Hello", 10), "Hello");
/// assert_eq!(truncate_string("Hello World", 8), "Hello...");
/// ```
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Print a horizontal separator line.
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

/// Format an optional value for table display, returning a default if None.
pub fn format_optional<T: std::fmt::Display>(value: Option<T>, default: &str) -> String {
    value.map_or_else(|| default.to_string(), |v| v.to_string())
}

/// Render a field value the way line protocol would show it, minus type suffixes.
pub fn format_field_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Float(v) => v.to_string(),
        FieldValue::Integer(v) => v.to_string(),
        FieldValue::Boolean(v) => v.to_string(),
        FieldValue::String(v) => v.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string_no_truncation_needed() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("exactly10!", 10), "exactly10!");
    }

    #[test]
    fn test_truncate_string_with_truncation() {
        assert_eq!(truncate_string("Substation-Alpha", 10), "Substat...");
    }

    #[test]
    fn test_truncate_string_multibyte() {
        assert_eq!(truncate_string("Sübstätion-Nörth", 8), "Sübst...");
    }

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(Some(3), "--"), "3");
        assert_eq!(format_optional(None::<u32>, "--"), "--");
    }

    #[test]
    fn test_format_field_value() {
        assert_eq!(format_field_value(&FieldValue::Float(3.5)), "3.5");
        assert_eq!(format_field_value(&FieldValue::Integer(7)), "7");
        assert_eq!(format_field_value(&FieldValue::String("ok".to_string())), "ok");
    }
}
