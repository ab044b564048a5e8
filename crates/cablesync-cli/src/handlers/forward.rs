//! Forward command handler.

use anyhow::Result;

use cablesync_core::{CoreError, ForwardSummary, load_fixture};

use crate::bootstrap::CliContext;
use crate::commands::ForwardArgs;

/// Execute the forward command.
///
/// Loads the fixture, joins it with every cable of the requested status and
/// writes the resulting points. The token is checked before any I/O.
pub async fn execute(ctx: &CliContext, args: &ForwardArgs) -> Result<ForwardSummary> {
    ctx.require_influx_token()?;

    let path = args
        .fixture
        .as_deref()
        .unwrap_or(&ctx.settings().fixture_path);
    let index = load_fixture(path).await.map_err(CoreError::from)?;

    if index.is_empty() {
        println!("Fixture {} holds no readings; nothing to forward.", path.display());
    }

    let summary = ctx.app().forwarding().forward(&index, args.status).await?;

    println!(
        "Forwarded {} point(s) from {} {} cable(s) ({} sensor(s) scanned) to bucket '{}'",
        summary.points_written,
        summary.cables_scanned,
        args.status,
        summary.sensors_scanned,
        ctx.settings().influx_bucket
    );
    Ok(summary)
}
