//! InfluxDB line protocol encoding.
//!
//! ```text
//! measurement[,tag=value...] field=value[,field=value...] timestamp_ns
//! ```
//!
//! Tags and fields come out in key order because [`Point`] stores them in
//! ordered maps.

use std::fmt::Write as _;

use cablesync_core::{FieldValue, Point};

use crate::error::{InfluxError, InfluxResult};

/// Encode one point as a single line (no trailing newline).
pub fn encode_point(point: &Point) -> InfluxResult<String> {
    if point.measurement.is_empty() {
        return Err(InfluxError::Encoding("measurement is empty".to_string()));
    }
    if point.fields.is_empty() {
        return Err(InfluxError::Encoding(format!(
            "point for '{}' has no fields",
            point.measurement
        )));
    }
    let timestamp = point.timestamp.timestamp_nanos_opt().ok_or_else(|| {
        InfluxError::Encoding(format!(
            "timestamp {} is outside the nanosecond range",
            point.timestamp
        ))
    })?;

    let mut line = escape_measurement(&point.measurement);

    for (key, value) in &point.tags {
        if value.is_empty() {
            continue;
        }
        let _ = write!(line, ",{}={}", escape_key(key), escape_key(value));
    }

    let mut separator = ' ';
    for (key, value) in &point.fields {
        line.push(separator);
        let _ = write!(line, "{}={}", escape_key(key), format_field(key, value)?);
        separator = ',';
    }

    let _ = write!(line, " {timestamp}");
    Ok(line)
}

/// Encode a batch as newline-separated lines.
pub fn encode_points(points: &[Point]) -> InfluxResult<String> {
    let lines = points
        .iter()
        .map(encode_point)
        .collect::<InfluxResult<Vec<_>>>()?;
    Ok(lines.join("\n"))
}

fn escape_measurement(s: &str) -> String {
    escape(s, &[',', ' '])
}

/// Escaping shared by tag keys, tag values and field keys.
fn escape_key(s: &str) -> String {
    escape(s, &[',', '=', ' '])
}

fn escape(s: &str, special: &[char]) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if special.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn format_field(key: &str, value: &FieldValue) -> InfluxResult<String> {
    Ok(match value {
        FieldValue::Float(v) => {
            if !v.is_finite() {
                return Err(InfluxError::Encoding(format!(
                    "field '{key}' is not a finite number"
                )));
            }
            v.to_string()
        }
        FieldValue::Integer(v) => format!("{v}i"),
        FieldValue::Boolean(v) => v.to_string(),
        FieldValue::String(v) => {
            let mut quoted = String::with_capacity(v.len() + 2);
            quoted.push('"');
            for c in v.chars() {
                if c == '"' || c == '\\' {
                    quoted.push('\\');
                }
                quoted.push(c);
            }
            quoted.push('"');
            quoted
        }
    })
}
