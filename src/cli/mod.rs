// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap, loads the trained artifact once, and hands the work to
// Layer 2. Nothing in here computes a feature or a score.
//
// Artifact loading happens before anything is served or
// printed; if it fails, the process exits with an error.

pub mod commands;

use std::{fs, path::Path, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Commands, PredictArgs, SchemaArgs, ServeArgs};

use crate::application::predict_use_case::PredictUseCase;
use crate::domain::raw::RawAttributeSet;
use crate::domain::traits::RiskAssessor;
use crate::infra::artifact_store::ArtifactStore;
use crate::infra::settings::Settings;
use crate::ml::predictor::Predictor;

#[derive(Parser, Debug)]
#[command(
    name = "heart-risk",
    version,
    about = "Score heart disease risk from patient attributes with a pre-trained classifier."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch to the chosen subcommand.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Predict(args) => run_predict(args),
            Commands::Serve(args)   => run_serve(args),
            Commands::Schema(args)  => run_schema(args),
        }
    }
}

/// Load the artifact pair or fail the whole process.
fn load_predictor(settings: &Settings) -> Result<Arc<Predictor>> {
    let predictor = ArtifactStore::new(settings.clone())
        .load()
        .context("Cannot start without a valid model artifact")?;
    Ok(Arc::new(predictor))
}

/// Score one submission. The artifact is loaded before the
/// submission is read, so a broken deployment fails the same way
/// whatever the input.
fn run_predict(args: PredictArgs) -> Result<()> {
    let settings: Settings = args.artifact.clone().into();
    let use_case = PredictUseCase::new(load_predictor(&settings)?);

    let raw = match &args.json {
        Some(path) => read_submission(path)?,
        None => args.to_raw(),
    };

    let result = use_case.assess(&raw)?;
    println!("{result}");
    Ok(())
}

/// A submission saved as a JSON object of attribute values.
fn read_submission(path: &Path) -> Result<RawAttributeSet> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Cannot read submission '{}'", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("'{}' is not a JSON object of attributes", path.display()))
}

/// Load the artifact, then block on the HTTP server until it stops.
fn run_serve(args: ServeArgs) -> Result<()> {
    let settings: Settings = args.into();
    let use_case = PredictUseCase::new(load_predictor(&settings)?);

    tracing::info!("Serving intake form on http://{}", settings.bind);
    let runtime = tokio::runtime::Runtime::new().context("Cannot start async runtime")?;
    runtime.block_on(crate::web::serve(&settings.bind, Arc::new(use_case)))
}

/// Print the classifier summary and its columns, one per line.
fn run_schema(args: SchemaArgs) -> Result<()> {
    let settings: Settings = args.artifact.into();
    let predictor = load_predictor(&settings)?;

    println!("{}", predictor.classifier_name());
    for (i, column) in predictor.schema().columns().iter().enumerate() {
        println!("{i:>3}  {column}");
    }
    Ok(())
}
