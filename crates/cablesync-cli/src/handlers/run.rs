//! Run command handler: seed, then forward.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::commands::{ForwardArgs, SeedArgs};
use crate::handlers::{forward, seed};

/// Execute the full pipeline.
///
/// The token is required up front so a missing credential does not leave a
/// freshly seeded store with nothing forwarded.
pub async fn execute(ctx: &CliContext, seeding: &SeedArgs, forwarding: &ForwardArgs) -> Result<()> {
    ctx.require_influx_token()?;
    seed::execute(ctx, seeding).await?;
    forward::execute(ctx, forwarding).await?;
    Ok(())
}
