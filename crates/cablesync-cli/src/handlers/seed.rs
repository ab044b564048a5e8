//! Seed command handler.

use anyhow::Result;

use cablesync_core::SeedSummary;

use crate::bootstrap::CliContext;
use crate::commands::SeedArgs;

/// Execute the seed command.
///
/// Replaces the stored cables with a freshly generated set unless
/// `--keep-existing` was given.
pub async fn execute(ctx: &CliContext, args: &SeedArgs) -> Result<SeedSummary> {
    let summary = ctx
        .app()
        .seeding()
        .seed(args.generator_config(), !args.keep_existing)
        .await?;

    println!(
        "Seeded {} cable(s): {} active, {} inactive, {} sensor(s)",
        summary.inserted, summary.active, summary.inactive, summary.sensors
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::context;

    fn args(circuits: u32, keep_existing: bool) -> SeedArgs {
        SeedArgs {
            circuits,
            sections: 2,
            seed: Some(7),
            keep_existing,
            first_sensor_id: 1,
        }
    }

    #[tokio::test]
    async fn test_seed_replaces_by_default() {
        let (ctx, _writer, _db) = context(None).await;

        let first = execute(&ctx, &args(5, false)).await.unwrap();
        assert_eq!(first.inserted, 5);
        assert_eq!(first.active + first.inactive, 5);
        assert_eq!(first.sensors, 5 * 2 * 9);

        execute(&ctx, &args(3, false)).await.unwrap();
        assert_eq!(ctx.app().assets().count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_seed_keep_existing_appends() {
        let (ctx, _writer, _db) = context(None).await;
        execute(&ctx, &args(2, false)).await.unwrap();
        execute(&ctx, &args(2, true)).await.unwrap();
        assert_eq!(ctx.app().assets().count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_seed_rejects_zero_circuits() {
        let (ctx, _writer, _db) = context(None).await;
        let err = execute(&ctx, &args(0, false)).await.unwrap_err();
        let cli: crate::CliError = err.into();
        assert_eq!(cli.exit_code(), 2);
    }
}
