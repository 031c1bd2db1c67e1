// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The rest of the system only sees these traits:
//
//   - Classifier   → anything that turns an aligned feature
//                    slice into P(at risk)
//   - RiskAssessor → anything that turns a raw submission into
//                    a PredictionResult
//
// The ml layer provides the classifiers; the application layer
// provides the assessor. The web and CLI layers only depend on
// RiskAssessor.

use crate::domain::error::RiskResult;
use crate::domain::prediction::PredictionResult;
use crate::domain::raw::RawAttributeSet;

// ─── Classifier ───────────────────────────────────────────────────────────────
/// A trained binary classifier.
///
/// Implementations:
///   - RandomForest       → averaged decision trees
///   - LogisticRegression → linear model with a sigmoid link
pub trait Classifier: Send + Sync {
    /// Number of inputs the classifier was trained on.
    fn n_features(&self) -> usize;

    /// Probability of the positive class. `features` has exactly
    /// `n_features()` entries; the predictor enforces this.
    fn predict_proba(&self, features: &[f64]) -> f64;

    /// Short human-readable description for logs.
    fn name(&self) -> String;
}

// ─── RiskAssessor ─────────────────────────────────────────────────────────────
/// One submission in, one decision out.
pub trait RiskAssessor: Send + Sync {
    fn assess(&self, raw: &RawAttributeSet) -> RiskResult<PredictionResult>;
}
