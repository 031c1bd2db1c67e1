// ============================================================
// Layer 2 — PredictUseCase
// ============================================================
// One submission, start to finish:
//
//   Step 1: Validate + encode the raw set   (Layer 4 - data)
//   Step 2: Run the classifier              (Layer 5 - ml)
//   Step 3: Hand the result back for display (Layer 1)
//
// Each call is independent. The only shared state is the
// Predictor, which is read-only after startup.

use std::sync::Arc;

use crate::data::encoder::FeatureEncoder;
use crate::domain::error::{RiskError, RiskResult};
use crate::domain::prediction::PredictionResult;
use crate::domain::raw::RawAttributeSet;
use crate::domain::traits::RiskAssessor;
use crate::ml::predictor::Predictor;

pub struct PredictUseCase {
    encoder:   FeatureEncoder,
    predictor: Arc<Predictor>,
}

impl PredictUseCase {
    /// The encoder always uses the schema that shipped with the
    /// predictor, so the two cannot drift apart.
    pub fn new(predictor: Arc<Predictor>) -> Self {
        let encoder = FeatureEncoder::new(Arc::clone(predictor.schema()));
        Self { encoder, predictor }
    }
}

impl RiskAssessor for PredictUseCase {
    fn assess(&self, raw: &RawAttributeSet) -> RiskResult<PredictionResult> {
        // ── Step 1: Encode ────────────────────────────────────────────────────
        let vector = self.encoder.encode(raw).inspect_err(|e| {
            if let RiskError::InvalidInput { .. } = e {
                tracing::warn!("Rejected submission: {e}");
            }
        })?;

        // ── Step 2: Predict ───────────────────────────────────────────────────
        // A mismatch here means the encoder and the artifact disagree,
        // which is a packaging bug rather than anything the user did.
        let result = self.predictor.predict(&vector).inspect_err(|e| {
            tracing::error!("Prediction failed: {e}");
        })?;

        tracing::info!(
            "Assessment: {:?} (confidence {:.2})",
            result.label,
            result.confidence()
        );
        Ok(result)
    }
}
