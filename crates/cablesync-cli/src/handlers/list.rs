//! List command handler.
//!
//! Displays the stored cables in a formatted table, or as JSON.

use anyhow::Result;

use cablesync_core::{AssetStatus, Cable};

use crate::bootstrap::CliContext;
use crate::presentation::{print_separator, truncate_string};

/// Execute the list command.
///
/// # Arguments
///
/// * `ctx` - The CLI context providing access to `AppCore`
/// * `status` - Only list cables with this status, if given
/// * `json` - Print the stored documents instead of a table
pub async fn execute(ctx: &CliContext, status: Option<AssetStatus>, json: bool) -> Result<()> {
    let cables = ctx.app().assets().list(status).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&cables)?);
        return Ok(());
    }

    if cables.is_empty() {
        println!("No cables found in the {} store.", ctx.settings().store);
        println!("Use 'cablesync seed' to generate some.");
        return Ok(());
    }

    println!("Found {} cable(s):\n", cables.len());
    println!(
        "{:<6} {:<10} {:<8} {:<9} {:<12} {:<12} {:<7} {:<9} Sensors",
        "ID", "Name", "Voltage", "Status", "Source", "Target", "Feeder", "Sections"
    );
    print_separator(90);

    for cable in &cables {
        println!("{}", format_row(cable));
    }

    Ok(())
}

fn format_row(cable: &Cable) -> String {
    let source = format!(
        "{} ({})",
        cable.source_substation.name, cable.source_substation.adwh_id
    );
    let target = format!(
        "{} ({})",
        cable.target_substation.name, cable.target_substation.adwh_id
    );
    format!(
        "{:<6} {:<10} {:<8} {:<9} {:<12} {:<12} {:<7} {:<9} {}",
        cable.circuit_id,
        truncate_string(&cable.circuit_name, 10),
        cable.circuit_voltage,
        cable.status,
        truncate_string(&source, 12),
        truncate_string(&target, 12),
        cable.feeder_number,
        cable.no_of_sections,
        cable.sensor_count()
    )
}
