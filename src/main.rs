//! Sales Predictor - Main Entry Point
//!
//! Serves the prediction API by default; `predict` and `check` work offline.

use clap::Parser;
use sales_predictor::cli::{cmd_check, cmd_predict, cmd_serve, resolve_config, ArtifactArgs, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sales_predictor=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve { port, host, artifacts }) => {
            cmd_serve(resolve_config(host, port, artifacts)).await?;
        }
        Some(Commands::Predict { input, artifacts }) => {
            cmd_predict(&input, &resolve_config(None, None, artifacts))?;
        }
        Some(Commands::Check { artifacts }) => {
            cmd_check(&resolve_config(None, None, artifacts))?;
        }
        None => {
            cmd_serve(resolve_config(None, None, ArtifactArgs::default())).await?;
        }
    }

    Ok(())
}
