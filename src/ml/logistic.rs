// ============================================================
// Layer 5 — Logistic Regression
// ============================================================
// p = sigmoid(w · x + b)

use serde::{Deserialize, Serialize};

use crate::domain::traits::Classifier;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub coefficients: Vec<f64>,
    pub intercept:    f64,
}

fn sigmoid(z: f64) -> f64 {
    // Split on sign so exp() never overflows
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

impl LogisticRegression {
    /// Non-empty and finite. Finite weights can still overflow on
    /// extreme inputs; the predictor refuses those scores.
    pub fn validate(&self) -> Result<(), String> {
        if self.coefficients.is_empty() {
            return Err("no coefficients".to_string());
        }
        if let Some(i) = self.coefficients.iter().position(|w| !w.is_finite()) {
            return Err(format!("coefficient {i} is not finite"));
        }
        if !self.intercept.is_finite() {
            return Err("intercept is not finite".to_string());
        }
        Ok(())
    }
}

impl Classifier for LogisticRegression {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict_proba(&self, features: &[f64]) -> f64 {
        let z: f64 = self
            .coefficients
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept;
        sigmoid(z)
    }

    fn name(&self) -> String {
        format!("logistic regression ({} coefficients)", self.coefficients.len())
    }
}
