// ============================================================
// Layer 3 — Error Taxonomy
// ============================================================
// Four failure kinds exist, and none of them is retried:
//
//   ArtifactLoad   — model or column files missing/corrupt.
//                    Fatal at startup.
//   InvalidInput   — a raw value outside its declared domain.
//                    Rejected at the edge, never defaulted.
//   SchemaMismatch — encoded vector does not fit the loaded
//                    artifact. A packaging bug, not a user error.
//   Inference      — the classifier produced a score that is not
//                    a probability (NaN, overflow). Never shown
//                    to the user as a result.
//
// Library layers return RiskResult<T>; only the CLI layer
// converts into anyhow for reporting.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RiskError {
    #[error("cannot load artifact '{}': {reason}", path.display())]
    ArtifactLoad { path: PathBuf, reason: String },

    #[error("invalid input for '{field}' (got {value:?}): {reason}")]
    InvalidInput {
        field:  String,
        value:  String,
        reason: String,
    },

    #[error("schema mismatch: expected {expected} columns, got {actual}: {detail}")]
    SchemaMismatch {
        expected: usize,
        actual:   usize,
        detail:   String,
    },

    #[error("classifier produced an unusable score: {reason}")]
    Inference { reason: String },
}

pub type RiskResult<T> = Result<T, RiskError>;

impl RiskError {
    pub fn artifact(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ArtifactLoad { path: path.into(), reason: reason.into() }
    }

    pub fn invalid(
        field:  impl Into<String>,
        value:  impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidInput {
            field:  field.into(),
            value:  value.into(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by what the user submitted, as opposed
    /// to errors in how the process was packaged or started.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message_names_field_and_value() {
        let e = RiskError::invalid("smoking", "maybe", "expected one of: no, yes");
        let msg = e.to_string();
        assert!(msg.contains("smoking"));
        assert!(msg.contains("\"maybe\""));
        assert!(e.is_user_error());
    }

    #[test]
    fn test_artifact_error_is_not_user_error() {
        let e = RiskError::artifact("models/model.json", "not found");
        assert!(e.to_string().contains("models/model.json"));
        assert!(!e.is_user_error());
    }

    #[test]
    fn test_inference_error_is_not_user_error() {
        let e = RiskError::Inference { reason: "probability is NaN".into() };
        assert!(e.to_string().contains("NaN"));
        assert!(!e.is_user_error());
    }
}
