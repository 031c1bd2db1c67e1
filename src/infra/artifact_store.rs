// ============================================================
// Layer 6 — Artifact Store
// ============================================================
// Loads the trained model and its column list from disk.
//
// What the training pipeline leaves behind:
//   artifacts/
//     model.json          ← classifier, tagged by "kind"
//     model_columns.json  ← ["BMI", "PhysicalHealth", ...]
//
// Both files are read exactly once, at process start. Any
// problem (missing file, bad JSON, a tree pointing nowhere,
// a feature count that disagrees with the column list) is an
// ArtifactLoad error and the process does not start.

use std::{fs, path::Path, sync::Arc};

use serde::de::DeserializeOwned;

use crate::domain::error::{RiskError, RiskResult};
use crate::domain::feature_vector::FeatureSchema;
use crate::infra::settings::Settings;
use crate::ml::model::ModelArtifact;
use crate::ml::predictor::Predictor;

pub struct ArtifactStore {
    settings: Settings,
}

impl ArtifactStore {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Load the column list and the classifier and bind them into a
    /// Predictor. The result is meant to be wrapped in an Arc and
    /// shared for the life of the process.
    pub fn load(&self) -> RiskResult<Predictor> {
        let columns_path = self.settings.columns_path();
        let model_path   = self.settings.model_path();

        tracing::info!("Loading column schema from '{}'", columns_path.display());
        let columns: Vec<String> = read_json(&columns_path)?;
        let schema = FeatureSchema::new(columns)
            .map_err(|e| RiskError::artifact(&columns_path, e))?;

        tracing::info!("Loading classifier from '{}'", model_path.display());
        let artifact: ModelArtifact = read_json(&model_path)?;
        let classifier = artifact
            .into_classifier()
            .map_err(|e| RiskError::artifact(&model_path, e))?;

        Predictor::new(classifier, Arc::new(schema), model_path)
    }

    /// Write an artifact pair in the layout `load` expects.
    /// Used to stage fixtures and hand-built models.
    pub fn save(&self, model: &ModelArtifact, schema: &FeatureSchema) -> RiskResult<()> {
        let dir = &self.settings.artifact_dir;
        fs::create_dir_all(dir)
            .map_err(|e| RiskError::artifact(dir, e.to_string()))?;

        write_json(&self.settings.model_path(), model)?;
        write_json(&self.settings.columns_path(), &schema.columns())?;

        tracing::debug!("Saved artifact to '{}'", dir.display());
        Ok(())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> RiskResult<T> {
    let text = fs::read_to_string(path)
        .map_err(|e| RiskError::artifact(path, e.to_string()))?;
    serde_json::from_str(&text)
        .map_err(|e| RiskError::artifact(path, format!("malformed JSON: {e}")))
}

fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> RiskResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| RiskError::artifact(path, e.to_string()))?;
    fs::write(path, json)
        .map_err(|e| RiskError::artifact(path, e.to_string()))
}
