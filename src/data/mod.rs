// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// From a submitted form to a model-ready vector:
//
//   RawAttributeSet   (strings and numbers, unchecked)
//       │
//       ▼
//   PatientAttributes (closed domains, validated)
//       │
//       ▼
//   FeatureEncoder    → indicators, one-hot bins, numeric pass-through
//       │
//       ▼
//   EncodedFeatureVector (schema order, missing columns = 0)
//
// The encoder is a pure function of its input and the schema.

/// One-hot encoding and schema alignment
pub mod encoder;
