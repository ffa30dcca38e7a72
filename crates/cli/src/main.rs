use anyhow::Context;
use clap::{Parser, Subcommand};

use shelf_kernel::settings::Settings;

/// Operate the SHELF book service
#[derive(Debug, Parser)]
#[command(name = "shelf", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP service until ctrl-c
    Serve,
    /// Check that the configured database answers a ping
    Ping,
    /// Print the resolved configuration as JSON, credentials masked
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load SHELF settings")?;
    shelf_telemetry::init(&settings.telemetry)?;
    tracing::debug!(command = ?cli.command, env = ?settings.environment, "dispatching");

    match cli.command {
        Command::Serve => shelf_app::run(settings).await,
        Command::Ping => ping(&settings).await,
        Command::Config => print_config(settings),
    }
}

async fn ping(settings: &Settings) -> anyhow::Result<()> {
    let db = shelf_db::connect(&settings.database).await?;
    let outcome = db.ping().await;
    db.shutdown().await;
    outcome?;

    println!(
        "database '{}' at {} is reachable",
        settings.database.database,
        settings.database.redacted_uri()
    );
    Ok(())
}

fn print_config(mut settings: Settings) -> anyhow::Result<()> {
    settings.database.uri = settings.database.redacted_uri();
    let rendered =
        serde_json::to_string_pretty(&settings).context("failed to render configuration")?;
    println!("{}", rendered);
    Ok(())
}
