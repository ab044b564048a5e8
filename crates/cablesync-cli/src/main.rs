//! CLI entry point - the composition root.
//!
//! This is the ONLY place where infrastructure is wired together via bootstrap.
//! Command dispatch routes to handlers which delegate to `AppCore`.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use cablesync_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

#[tokio::main]
async fn main() {
    // .env values only fill variables that are not already set
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        tracing::error!("{err}");
        std::process::exit(err.exit_code());
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "debug" } else { "info" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let Some(command) = cli.command.as_ref() else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let settings = cli.settings()?;
    let ctx = bootstrap(CliConfig::new(settings)).await?;

    match command {
        Commands::Check => handlers::check::execute(&ctx).await?,
        Commands::Seed(args) => {
            handlers::seed::execute(&ctx, args).await?;
        }
        Commands::Forward(args) => {
            handlers::forward::execute(&ctx, args).await?;
        }
        Commands::Run {
            seeding,
            forwarding,
        } => handlers::run::execute(&ctx, seeding, forwarding).await?,
        Commands::List { status, json } => handlers::list::execute(&ctx, *status, *json).await?,
        Commands::Query(args) => {
            handlers::query::execute(&ctx, args).await?;
        }
    }

    Ok(())
}
