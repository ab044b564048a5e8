//! Query command handler.
//!
//! Reads recently written points back from InfluxDB.

use anyhow::Result;
use chrono::SecondsFormat;

use cablesync_influx::{FluxQuery, QueryRecord, check_range_start};

use crate::bootstrap::CliContext;
use crate::commands::QueryArgs;
use crate::error::CliError;
use crate::presentation::{format_field_value, format_optional, print_separator};

/// Build the Flux query for the given arguments.
pub fn build_query(bucket: &str, args: &QueryArgs) -> FluxQuery {
    let mut query = FluxQuery::new(bucket)
        .range(args.range.clone())
        .field(args.field.clone());
    if let Some(cable_id) = args.cable_id {
        query = query.cable_id(cable_id.to_string());
    }
    if let Some(phase) = args.phase {
        query = query.phase(phase.as_str());
    }
    if let Some(section) = args.section {
        query = query.section(section.to_string());
    }
    query
}

/// Execute the query command.
pub async fn execute(ctx: &CliContext, args: &QueryArgs) -> Result<Vec<QueryRecord>> {
    check_range_start(&args.range).map_err(|e| CliError::Usage(e.to_string()))?;
    ctx.require_influx_token()?;

    let query = build_query(&ctx.settings().influx_bucket, args);
    tracing::debug!(flux = %query.render()?, "Running read-back query");
    let records = ctx.influx().query_values(&query).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(records);
    }

    if records.is_empty() {
        println!("No points found for range {}.", args.range);
        return Ok(records);
    }

    println!(
        "{:<25} {:<8} {:<8} {:<8} {:<8} {:<15} {:<7} Value",
        "Time", "Cable", "Section", "Phase", "Location", "Metric", "Status"
    );
    print_separator(95);
    for record in &records {
        println!("{}", format_record(record));
    }
    println!("\n{} record(s)", records.len());

    Ok(records)
}

fn format_record(record: &QueryRecord) -> String {
    let tag = |key: &str| format_optional(record.tags.get(key), "--");
    format!(
        "{:<25} {:<8} {:<8} {:<8} {:<8} {:<15} {:<7} {}",
        record.time.to_rfc3339_opts(SecondsFormat::Secs, true),
        tag("cableID"),
        tag("section"),
        tag("phase"),
        tag("location"),
        tag("metric"),
        tag("status"),
        format_field_value(&record.value)
    )
}
