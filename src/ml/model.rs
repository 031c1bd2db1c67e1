// ============================================================
// Layer 5 — Model Artifact
// ============================================================
// The classifier file is JSON tagged by "kind":
//
//   { "kind": "random_forest", "n_features": 37, "trees": [...] }
//   { "kind": "logistic", "coefficients": [...], "intercept": -1.2 }
//
// Parsing and structural validation happen once, at load time.
// After that the classifier is immutable.

use serde::{Deserialize, Serialize};

use crate::domain::traits::Classifier;
use crate::ml::forest::RandomForest;
use crate::ml::logistic::LogisticRegression;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    RandomForest(RandomForest),
    Logistic(LogisticRegression),
}

impl ModelArtifact {
    /// Structural checks for whichever model this is. The message
    /// becomes the reason of an ArtifactLoad error.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            ModelArtifact::RandomForest(f) => f.validate(),
            ModelArtifact::Logistic(m)     => m.validate(),
        }
    }

    /// Validate and hand back the classifier behind a trait object.
    pub fn into_classifier(self) -> Result<Box<dyn Classifier>, String> {
        self.validate()?;
        Ok(match self {
            ModelArtifact::RandomForest(f) => Box::new(f),
            ModelArtifact::Logistic(m)     => Box::new(m),
        })
    }
}
