// ============================================================
// Layer 6 — Runtime Settings
// ============================================================
// Everything the process needs to know at startup. The CLI
// layer builds this from flags and environment variables; no
// other layer sees clap types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_ARTIFACT_DIR: &str = "artifacts";
pub const DEFAULT_MODEL_FILE:   &str = "model.json";
pub const DEFAULT_COLUMNS_FILE: &str = "model_columns.json";
pub const DEFAULT_BIND:         &str = "127.0.0.1:8080";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Directory holding the model and its column list
    pub artifact_dir: PathBuf,
    /// Classifier file name inside artifact_dir
    pub model_file:   String,
    /// Column list file name inside artifact_dir
    pub columns_file: String,
    /// Address the form server listens on
    pub bind:         String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            artifact_dir: PathBuf::from(DEFAULT_ARTIFACT_DIR),
            model_file:   DEFAULT_MODEL_FILE.to_string(),
            columns_file: DEFAULT_COLUMNS_FILE.to_string(),
            bind:         DEFAULT_BIND.to_string(),
        }
    }
}

impl Settings {
    /// `<artifact_dir>/<model_file>`
    pub fn model_path(&self) -> PathBuf {
        self.artifact_dir.join(&self.model_file)
    }

    /// `<artifact_dir>/<columns_file>`
    pub fn columns_path(&self) -> PathBuf {
        self.artifact_dir.join(&self.columns_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let s = Settings::default();
        assert_eq!(s.model_path(), PathBuf::from("artifacts/model.json"));
        assert_eq!(s.columns_path(), PathBuf::from("artifacts/model_columns.json"));
    }
}
