// ============================================================
// Layer 3 — Prediction Result
// ============================================================
// A derived value that lives only as long as it takes to show
// it. `probability` is always P(at risk); `confidence()` is the
// probability of whichever label was predicted.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLabel {
    NotAtRisk,
    AtRisk,
}

impl RiskLabel {
    /// The model's class index for this label.
    pub fn class(self) -> u8 {
        match self {
            RiskLabel::NotAtRisk => 0,
            RiskLabel::AtRisk    => 1,
        }
    }

    /// argmax over [1 - p, p]; a tie goes to the first class.
    pub fn from_probability(p: f64) -> Self {
        if p > 0.5 {
            RiskLabel::AtRisk
        } else {
            RiskLabel::NotAtRisk
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    pub label:       RiskLabel,
    pub probability: f64,
}

impl PredictionResult {
    /// Expects a finite P(at risk); the predictor refuses anything
    /// else before it gets here. Rounding noise outside [0, 1] is clamped.
    pub fn from_probability(p: f64) -> Self {
        let probability = p.clamp(0.0, 1.0);
        Self { label: RiskLabel::from_probability(probability), probability }
    }

    pub fn at_risk(&self) -> bool {
        self.label == RiskLabel::AtRisk
    }

    /// `p` when at risk, `1 - p` otherwise.
    pub fn confidence(&self) -> f64 {
        match self.label {
            RiskLabel::AtRisk    => self.probability,
            RiskLabel::NotAtRisk => 1.0 - self.probability,
        }
    }

    /// The sentence shown to the user.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PredictionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label {
            RiskLabel::AtRisk => write!(
                f,
                "Patient is AT RISK of heart disease. Confidence: {:.2}",
                self.confidence()
            ),
            RiskLabel::NotAtRisk => write!(
                f,
                "Patient is NOT at risk of heart disease. Confidence: {:.2}",
                self.confidence()
            ),
        }
    }
}
