//! # soko
//!
//! Offline companion to soko-server: generate a demonstration model
//! artifact, inspect an artifact against the canonical schema, or score a
//! single request without standing up the HTTP server.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use forecast_facade::{
    canonical_schema, ColumnWeights, ForecastRequest, LinearModel, ModelArtifact,
    PredictionService,
};

type CliResult<T> = std::result::Result<T, String>;

#[derive(Parser)]
#[command(name = "soko")]
#[command(about = "Commodity price forecast tooling", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a small demonstration model artifact
    MakeModel {
        /// Where to write the artifact
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Load an artifact and report its schema
    Inspect {
        /// Artifact file
        #[arg(short, long)]
        model: PathBuf,
    },

    /// Score one forecast request from a JSON file
    Score {
        /// Artifact file
        #[arg(short, long)]
        model: PathBuf,

        /// JSON file holding a forecast request
        #[arg(short, long)]
        request: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::MakeModel { output } => make_model(&output),
        Commands::Inspect { model } => inspect(&model),
        Commands::Score { model, request } => score(&model, &request),
    };
    if let Err(message) = result {
        eprintln!("error: {message}");
        std::process::exit(1);
    }
}

fn make_model(output: &PathBuf) -> CliResult<()> {
    let artifact = demo_artifact();
    let json = serde_json::to_string_pretty(&artifact)
        .map_err(|error| format!("failed to serialize artifact: {error}"))?;
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|error| format!("failed to create {}: {error}", parent.display()))?;
        }
    }
    fs::write(output, json)
        .map_err(|error| format!("failed to write {}: {error}", output.display()))?;
    println!(
        "wrote {} v{} to {}",
        artifact.name,
        artifact.version,
        output.display()
    );
    Ok(())
}

fn inspect(model: &PathBuf) -> CliResult<()> {
    let artifact = ModelArtifact::from_path(model).map_err(|error| error.to_string())?;
    println!("name:    {}", artifact.name);
    println!("version: {}", artifact.version);
    println!("columns: {}", artifact.schema.describe());
    match canonical_schema().check_schema(&artifact.schema) {
        Ok(()) => println!("schema:  matches the canonical column set"),
        Err(error) => println!("schema:  MISMATCH - {error}"),
    }
    Ok(())
}

fn score(model: &PathBuf, request: &PathBuf) -> CliResult<()> {
    let predictor = LinearModel::from_path(model).map_err(|error| error.to_string())?;
    let content = fs::read_to_string(request)
        .map_err(|error| format!("failed to read {}: {error}", request.display()))?;
    let parsed: ForecastRequest = serde_json::from_str(&content)
        .map_err(|error| format!("failed to parse {}: {error}", request.display()))?;

    let service = PredictionService::new(Arc::new(predictor));
    let forecast = service.predict(&parsed).map_err(|error| error.to_string())?;
    let json = serde_json::to_string_pretty(&forecast)
        .map_err(|error| format!("failed to serialize forecast: {error}"))?;
    println!("{json}");
    Ok(())
}

/// A small hand-weighted artifact over the canonical schema, enough for a
/// fresh checkout to serve plausible responses.
fn demo_artifact() -> ModelArtifact {
    let mut columns = BTreeMap::new();
    columns.insert(
        "commodity".to_string(),
        ColumnWeights::Category {
            weights: BTreeMap::from([
                ("maize".to_string(), 4.0),
                ("beans".to_string(), 52.0),
                ("potatoes".to_string(), 18.0),
                ("kales".to_string(), 9.0),
                ("tomatoes".to_string(), 31.0),
            ]),
            fallback: 20.0,
        },
    );
    columns.insert(
        "market".to_string(),
        ColumnWeights::Category {
            weights: BTreeMap::from([
                ("bungoma-town".to_string(), 1.5),
                ("kitale".to_string(), 0.8),
                ("webuye".to_string(), 1.1),
            ]),
            fallback: 1.0,
        },
    );
    columns.insert(
        "county".to_string(),
        ColumnWeights::Category {
            weights: BTreeMap::from([
                ("bungoma".to_string(), 0.4),
                ("trans-nzoia".to_string(), 0.2),
            ]),
            fallback: 0.3,
        },
    );
    columns.insert(
        "month".to_string(),
        ColumnWeights::Numeric {
            coefficient: 0.35,
            mean: 6.5,
        },
    );
    columns.insert(
        "year".to_string(),
        ColumnWeights::Numeric {
            coefficient: 0.0,
            mean: 2026.0,
        },
    );
    columns.insert(
        "price_lag1".to_string(),
        ColumnWeights::Numeric {
            coefficient: 0.55,
            mean: 38.0,
        },
    );
    columns.insert(
        "price_lag2".to_string(),
        ColumnWeights::Numeric {
            coefficient: 0.15,
            mean: 38.0,
        },
    );
    columns.insert(
        "price_rolling_avg".to_string(),
        ColumnWeights::Numeric {
            coefficient: 0.2,
            mean: 38.0,
        },
    );
    ModelArtifact {
        name: "monthly-wholesale-price".to_string(),
        version: "2".to_string(),
        schema: canonical_schema(),
        intercept: 8.0,
        columns,
    }
}
