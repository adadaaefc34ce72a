//! Sales Predictor CLI Module
//!
//! Command-line interface for serving, offline prediction and artifact checks.

use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::inference::{format_prediction, InferenceContext};
use crate::schema::{SalesRequest, API_TITLE};
use crate::server::{run_server, ServerConfig};

// ─── Styling helpers ───────────────────────────────────────────────────────────

fn dim(s: &str) -> ColoredString   { s.truecolor(100, 100, 100) }
fn muted(s: &str) -> ColoredString { s.truecolor(140, 140, 140) }
fn ok(s: &str) -> ColoredString    { s.truecolor(100, 210, 120) }
fn bad(s: &str) -> ColoredString   { s.truecolor(230, 110, 110) }

fn kv(key: &str, val: &str) {
    println!("  {} {}", muted(&format!("{:<22}", key)), val.white());
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

// ─── Arguments ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "sales-predictor")]
#[command(author, version, about = "Retail sales prediction service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Artifact locations; unset flags fall back to the environment.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ArtifactArgs {
    /// Path to the regression model artifact (JSON)
    #[arg(short, long)]
    pub model: Option<PathBuf>,

    /// Path to the ordered feature-name list (JSON array)
    #[arg(short, long)]
    pub features: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default when no command is given)
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        #[command(flatten)]
        artifacts: ArtifactArgs,
    },

    /// Validate a JSON request file and print its prediction
    Predict {
        /// Request payload file
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        artifacts: ArtifactArgs,
    },

    /// Load both artifacts and print a summary
    Check {
        #[command(flatten)]
        artifacts: ArtifactArgs,
    },
}

/// Environment defaults overridden by any flag that was given.
pub fn resolve_config(host: Option<String>, port: Option<u16>, artifacts: ArtifactArgs) -> ServerConfig {
    let defaults = ServerConfig::default();
    ServerConfig {
        host: host.unwrap_or(defaults.host),
        port: port.unwrap_or(defaults.port),
        model_path: artifacts.model.unwrap_or(defaults.model_path),
        feature_names_path: artifacts.features.unwrap_or(defaults.feature_names_path),
    }
}

// ─── Commands ──────────────────────────────────────────────────────────────────

pub async fn cmd_serve(config: ServerConfig) -> anyhow::Result<()> {
    section(&format!("{} v{}", API_TITLE, env!("CARGO_PKG_VERSION")));
    kv("Predict", &format!("http://{}:{}/predict", config.host, config.port));
    kv("Health", &format!("http://{}:{}/", config.host, config.port));
    kv("Model", &config.model_path.display().to_string());
    kv("Features", &config.feature_names_path.display().to_string());
    println!();
    println!("  {}", dim("ctrl+c to stop"));
    println!();

    run_server(config).await
}

/// Run one prediction from a payload file.
///
/// Validation failures are printed one per field and returned as an error.
pub fn cmd_predict(input: &Path, config: &ServerConfig) -> anyhow::Result<f64> {
    let context = InferenceContext::load(&config.model_path, &config.feature_names_path)?;
    let bytes = std::fs::read(input)?;

    let request = match SalesRequest::from_slice(&bytes) {
        Ok(request) => request,
        Err(failure) => {
            section("Validation failed");
            for err in failure.errors() {
                let field = err.field().unwrap_or("body");
                println!("  {} {} {}", bad("✗"), field.white(), dim(&err.msg));
            }
            println!();
            return Err(failure.into());
        }
    };

    let start = Instant::now();
    let value = context.predict(&request)?;
    println!(
        "  {} {} {}",
        ok("✓"),
        format_prediction(value),
        dim(&format!("({:.2}ms)", start.elapsed().as_secs_f64() * 1000.0))
    );
    Ok(value)
}

pub fn cmd_check(config: &ServerConfig) -> anyhow::Result<()> {
    let context = InferenceContext::load(&config.model_path, &config.feature_names_path)?;
    let model = context.model();

    section("Model");
    kv("Path", &config.model_path.display().to_string());
    kv("Trees", &model.n_trees().to_string());
    kv("Max depth", &model.max_depth().to_string());
    kv("Bias / scale", &format!("{} / {}", model.bias, model.scale));
    kv("Features", &model.feature_names.join(", "));
    kv("Categorical features", &model.categorical_features.join(", "));

    section("Feature list");
    kv("Path", &config.feature_names_path.display().to_string());
    kv("Columns", &context.feature_names().join(", "));
    if context.features_agree() {
        println!("  {} feature list matches the model", ok("✓"));
    } else {
        println!("  {} feature list differs from the model; predictions will fail", bad("✗"));
    }
    println!();
    Ok(())
}
