// ============================================================
// Layer 5 — Predictor
// ============================================================
// Binds a classifier to the column schema it was trained on.
//
// Built once at startup; afterwards it is read-only and shared
// behind an Arc. A Predictor that exists is known to agree with
// its schema on the number of features, so the only thing left
// to check per call is that the vector was encoded against the
// same schema.

use std::sync::Arc;

use crate::domain::error::{RiskError, RiskResult};
use crate::domain::feature_vector::{EncodedFeatureVector, FeatureSchema};
use crate::domain::prediction::PredictionResult;
use crate::domain::traits::Classifier;

pub struct Predictor {
    classifier: Box<dyn Classifier>,
    schema:     Arc<FeatureSchema>,
}

impl std::fmt::Debug for Predictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predictor")
            .field("classifier", &self.classifier.name())
            .field("columns", &self.schema.len())
            .finish()
    }
}

impl Predictor {
    /// Fails with ArtifactLoad when the classifier and the schema
    /// disagree on the number of features. `source` names where the
    /// pair came from for the error message.
    pub fn new(
        classifier: Box<dyn Classifier>,
        schema:     Arc<FeatureSchema>,
        source:     impl Into<std::path::PathBuf>,
    ) -> RiskResult<Self> {
        if classifier.n_features() != schema.len() {
            return Err(RiskError::artifact(
                source,
                format!(
                    "classifier expects {} features but the schema lists {} columns",
                    classifier.n_features(),
                    schema.len()
                ),
            ));
        }
        tracing::info!("Predictor ready: {} over {} columns", classifier.name(), schema.len());
        Ok(Self { classifier, schema })
    }

    /// The column list the classifier was trained on. Encoders are
    /// built from this so they cannot drift from the model.
    pub fn schema(&self) -> &Arc<FeatureSchema> {
        &self.schema
    }

    /// Human-readable summary, e.g. "random forest (100 trees, max depth 12)".
    pub fn classifier_name(&self) -> String {
        self.classifier.name()
    }

    /// Score one encoded vector.
    ///
    /// Fails with SchemaMismatch when the vector was encoded against
    /// a different column list, and with Inference when the classifier
    /// returns something that is not a probability.
    pub fn predict(&self, vector: &EncodedFeatureVector) -> RiskResult<PredictionResult> {
        let expected = self.schema.len();
        if vector.len() != expected {
            return Err(RiskError::SchemaMismatch {
                expected,
                actual: vector.len(),
                detail: "vector length differs from schema".to_string(),
            });
        }
        if vector.schema() != self.schema.as_ref() {
            let first_diff = self
                .schema
                .columns()
                .iter()
                .zip(vector.schema().columns())
                .position(|(a, b)| a != b)
                .unwrap_or(expected.min(vector.schema().len()));
            return Err(RiskError::SchemaMismatch {
                expected,
                actual: vector.schema().len(),
                detail: format!("columns differ starting at position {first_diff}"),
            });
        }

        let p = self.classifier.predict_proba(vector.values());
        if !p.is_finite() {
            return Err(RiskError::Inference {
                reason: format!("{} returned probability {p}", self.classifier.name()),
            });
        }
        let result = PredictionResult::from_probability(p);
        tracing::debug!("Predicted {:?} (p={:.4})", result.label, result.probability);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::prediction::RiskLabel;
    use crate::ml::logistic::LogisticRegression;

    fn schema(cols: &[&str]) -> Arc<FeatureSchema> {
        Arc::new(FeatureSchema::new(cols.iter().map(|s| s.to_string()).collect()).unwrap())
    }

    /// Always answers the same probability.
    struct Fixed(f64, usize);

    impl Classifier for Fixed {
        fn n_features(&self) -> usize {
            self.1
        }

        fn predict_proba(&self, _: &[f64]) -> f64 {
            self.0
        }

        fn name(&self) -> String {
            "fixed".into()
        }
    }

    #[test]
    fn test_feature_count_mismatch_fails_at_load() {
        let err = Predictor::new(Box::new(Fixed(0.5, 3)), schema(&["A", "B"]), "model.json")
            .unwrap_err();
        assert!(matches!(err, RiskError::ArtifactLoad { .. }));
    }

    #[test]
    fn test_predicts_label_and_probability() {
        let s = schema(&["A", "B"]);
        let clf = LogisticRegression { coefficients: vec![2.0, 0.0], intercept: -1.0 };
        let p = Predictor::new(Box::new(clf), Arc::clone(&s), "model.json").unwrap();

        let pos = p.predict(&EncodedFeatureVector::new(Arc::clone(&s), vec![3.0, 0.0])).unwrap();
        assert_eq!(pos.label, RiskLabel::AtRisk);
        let neg = p.predict(&EncodedFeatureVector::new(s, vec![0.0, 0.0])).unwrap();
        assert_eq!(neg.label, RiskLabel::NotAtRisk);
        assert!(neg.probability > 0.0 && neg.probability < 0.5);
    }

    #[test]
    fn test_wrong_length_is_schema_mismatch() {
        let s = schema(&["A", "B"]);
        let p = Predictor::new(Box::new(Fixed(0.9, 2)), Arc::clone(&s), "m").unwrap();
        let short = EncodedFeatureVector::new(s, vec![1.0]);
        let err = p.predict(&short).unwrap_err();
        assert!(matches!(err, RiskError::SchemaMismatch { expected: 2, actual: 1, .. }));
    }

    #[test]
    fn test_overflowing_logit_is_refused() {
        // Finite weights, but 1e308 * 10 overflows and inf - inf is NaN.
        let s = schema(&["A", "B"]);
        let clf = LogisticRegression { coefficients: vec![1e308, -1e308], intercept: 0.0 };
        let p = Predictor::new(Box::new(clf), Arc::clone(&s), "model.json").unwrap();
        let err = p.predict(&EncodedFeatureVector::new(s, vec![10.0, 10.0])).unwrap_err();
        assert!(matches!(err, RiskError::Inference { .. }));
        assert!(!err.is_user_error());
    }

    #[test]
    fn test_foreign_schema_is_schema_mismatch() {
        let p = Predictor::new(Box::new(Fixed(0.9, 2)), schema(&["A", "B"]), "m").unwrap();
        let v = EncodedFeatureVector::new(schema(&["A", "C"]), vec![1.0, 0.0]);
        let err = p.predict(&v).unwrap_err();
        assert!(matches!(err, RiskError::SchemaMismatch { ref detail, .. } if detail.contains("position 1")));
    }
}
