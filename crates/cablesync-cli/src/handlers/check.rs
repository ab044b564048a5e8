//! Check command handler.
//!
//! Verifies that both backing services answer before a longer run.

use anyhow::Result;

use crate::bootstrap::CliContext;

/// Execute the check command.
///
/// Pings the document store and asks InfluxDB for its health. Both are
/// reported; the first failure is returned after printing.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    let settings = ctx.settings();

    let store = match ctx.app().assets().ping().await {
        Ok(()) => ctx.app().assets().count().await,
        Err(e) => Err(e),
    };
    let store = match store {
        Ok(count) => {
            println!("Document store ({}): ok, {count} cable(s)", settings.store);
            Ok(())
        }
        Err(e) => {
            println!("Document store ({}): FAILED ({e})", settings.store);
            Err(e)
        }
    };

    let influx = match ctx.app().points_health().await {
        Ok(()) => {
            println!("InfluxDB ({}): ok", settings.influx_url);
            Ok(())
        }
        Err(e) => {
            println!("InfluxDB ({}): FAILED ({e})", settings.influx_url);
            Err(e)
        }
    };

    if settings.influx_token.is_none() {
        println!("Note: no InfluxDB token set; forward and query will refuse to run.");
    }

    store?;
    influx?;
    Ok(())
}
