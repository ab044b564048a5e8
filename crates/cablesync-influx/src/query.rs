//! Flux read-back of forwarded points.
//!
//! [`FluxQuery`] renders a small, fixed-shape Flux pipeline; the response is
//! InfluxDB's CSV (optionally annotated), parsed into [`QueryRecord`]s.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use cablesync_core::{FieldValue, SENSOR_MEASUREMENT};

use crate::client::InfluxClient;
use crate::error::{InfluxError, InfluxResult};
use crate::http::{HttpBackend, HttpRequest};

/// Columns InfluxDB adds to every row; everything else is a tag.
const RESERVED_COLUMNS: &[&str] = &[
    "", "result", "table", "_start", "_stop", "_time", "_value", "_field", "_measurement",
];

const DURATION_UNITS: &[&str] = &["ns", "us", "µs", "ms", "s", "m", "h", "d", "w", "mo", "y"];

/// Builder for the read-back query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FluxQuery {
    bucket: String,
    start: String,
    measurement: String,
    field: String,
    cable_id: Option<String>,
    phase: Option<String>,
    section: Option<String>,
}

impl FluxQuery {
    /// Query `bucket` for the `value` field of the last hour.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            start: "-1h".to_string(),
            measurement: SENSOR_MEASUREMENT.to_string(),
            field: "value".to_string(),
            cable_id: None,
            phase: None,
            section: None,
        }
    }

    /// Range start: a relative duration such as `-30m` or an RFC 3339 time.
    #[must_use]
    pub fn range(mut self, start: impl Into<String>) -> Self {
        self.start = start.into();
        self
    }

    #[must_use]
    pub fn measurement(mut self, measurement: impl Into<String>) -> Self {
        self.measurement = measurement.into();
        self
    }

    #[must_use]
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    #[must_use]
    pub fn cable_id(mut self, cable_id: impl Into<String>) -> Self {
        self.cable_id = Some(cable_id.into());
        self
    }

    #[must_use]
    pub fn phase(mut self, phase: impl Into<String>) -> Self {
        self.phase = Some(phase.into());
        self
    }

    #[must_use]
    pub fn section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Render the Flux source.
    pub fn render(&self) -> InfluxResult<String> {
        let start = range_start_expr(&self.start)?;

        let mut flux = format!(
            "from(bucket: {})\n  |> range(start: {start})\n  |> filter(fn: (r) => r._measurement == {})",
            flux_string(&self.bucket),
            flux_string(&self.measurement),
        );
        let tag_filters = [
            ("cableID", &self.cable_id),
            ("phase", &self.phase),
            ("section", &self.section),
        ];
        for (tag, value) in tag_filters {
            if let Some(value) = value {
                flux.push_str(&format!(
                    "\n  |> filter(fn: (r) => r.{tag} == {})",
                    flux_string(value)
                ));
            }
        }
        flux.push_str(&format!(
            "\n  |> filter(fn: (r) => r._field == {})",
            flux_string(&self.field)
        ));
        Ok(flux)
    }
}

/// Check a range start without building a query.
///
/// Accepts a Flux duration (`-1h`, `-1h30m`) or an RFC 3339 time and
/// returns it trimmed.
pub fn check_range_start(start: &str) -> InfluxResult<String> {
    range_start_expr(start)?;
    Ok(start.trim().to_string())
}

fn range_start_expr(start: &str) -> InfluxResult<String> {
    let start = start.trim();
    if is_duration_literal(start) {
        Ok(start.to_string())
    } else if DateTime::parse_from_rfc3339(start).is_ok() {
        Ok(format!("time(v: {})", flux_string(start)))
    } else {
        Err(InfluxError::InvalidConfig(format!(
            "range start '{start}' is neither a duration nor an RFC 3339 time"
        )))
    }
}

/// Quote a Flux string literal.
fn flux_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' | '\\' | '$' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// `-1h`, `30m`, `-1h30m` and the like.
fn is_duration_literal(s: &str) -> bool {
    let mut rest = s.strip_prefix('-').unwrap_or(s);
    if rest.is_empty() {
        return false;
    }
    while !rest.is_empty() {
        let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        if digits == 0 {
            return false;
        }
        rest = &rest[digits..];
        // Longest unit first so "mo" and "ms" win over "m"
        let Some(unit) = DURATION_UNITS
            .iter()
            .filter(|u| rest.starts_with(*u))
            .max_by_key(|u| u.len())
        else {
            return false;
        };
        rest = &rest[unit.len()..];
    }
    true
}

/// One row of a query result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryRecord {
    pub time: DateTime<Utc>,
    pub measurement: String,
    pub field: String,
    pub value: FieldValue,
    pub tags: BTreeMap<String, String>,
}

/// Parse InfluxDB CSV into records.
///
/// Annotation rows (`#...`) are skipped; a blank line ends a table and the
/// next row is read as that table's header. Header rows repeated inside a
/// table are ignored.
pub fn parse_csv(body: &str) -> InfluxResult<Vec<QueryRecord>> {
    let mut header: Option<Vec<String>> = None;
    let mut records = Vec::new();

    for line in body.lines() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            header = None;
            continue;
        }
        if line.starts_with('#') {
            continue;
        }

        let cells = split_csv_line(line)?;
        match &header {
            None => {
                if !cells.iter().any(|c| c == "_time") || !cells.iter().any(|c| c == "_value") {
                    return Err(InfluxError::InvalidResponse {
                        message: format!("CSV header lacks _time or _value: {line}"),
                    });
                }
                header = Some(cells);
            }
            Some(columns) if *columns == cells => {}
            Some(columns) => records.push(record_from_row(columns, cells)?),
        }
    }

    Ok(records)
}

fn record_from_row(columns: &[String], cells: Vec<String>) -> InfluxResult<QueryRecord> {
    if cells.len() != columns.len() {
        return Err(InfluxError::InvalidResponse {
            message: format!(
                "row has {} cells but the header has {} columns",
                cells.len(),
                columns.len()
            ),
        });
    }

    let mut time = None;
    let mut value = None;
    let mut measurement = String::new();
    let mut field = String::new();
    let mut tags = BTreeMap::new();

    for (column, cell) in columns.iter().zip(cells) {
        match column.as_str() {
            "_time" => {
                let parsed = DateTime::parse_from_rfc3339(&cell).map_err(|e| {
                    InfluxError::InvalidResponse {
                        message: format!("bad _time '{cell}': {e}"),
                    }
                })?;
                time = Some(parsed.with_timezone(&Utc));
            }
            "_value" => value = Some(parse_value(cell)),
            "_measurement" => measurement = cell,
            "_field" => field = cell,
            name if RESERVED_COLUMNS.contains(&name) => {}
            name => {
                tags.insert(name.to_string(), cell);
            }
        }
    }

    match (time, value) {
        (Some(time), Some(value)) => Ok(QueryRecord {
            time,
            measurement,
            field,
            value,
            tags,
        }),
        _ => Err(InfluxError::InvalidResponse {
            message: "row without _time or _value".to_string(),
        }),
    }
}

fn parse_value(cell: String) -> FieldValue {
    if let Ok(v) = cell.parse::<f64>() {
        return FieldValue::Float(v);
    }
    match cell.as_str() {
        "true" => FieldValue::Boolean(true),
        "false" => FieldValue::Boolean(false),
        _ => FieldValue::String(cell),
    }
}

/// Split one CSV line, honouring double-quoted cells with `""` escapes.
fn split_csv_line(line: &str) -> InfluxResult<Vec<String>> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, in_quotes) {
            ('"', true) if chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            ('"', true) => in_quotes = false,
            ('"', false) if current.is_empty() => in_quotes = true,
            (',', false) => cells.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    if in_quotes {
        return Err(InfluxError::InvalidResponse {
            message: format!("unterminated quote in CSV row: {line}"),
        });
    }
    cells.push(current);
    Ok(cells)
}

impl<B: HttpBackend> InfluxClient<B> {
    /// Run `query` against the configured organisation.
    pub async fn query_values(&self, query: &FluxQuery) -> InfluxResult<Vec<QueryRecord>> {
        let mut url = self.endpoint(&["api", "v2", "query"]);
        url.query_pairs_mut().append_pair("org", &self.config.org);

        let request = self
            .authorize(HttpRequest::post(url, query.render()?))
            .header("Content-Type", "application/vnd.flux")
            .header("Accept", "application/csv");
        let response = self.execute(&request).await?;

        let records = parse_csv(&response.body)?;
        tracing::debug!(records = records.len(), "Flux query complete");
        Ok(records)
    }
}
