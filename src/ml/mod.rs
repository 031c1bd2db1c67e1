// ============================================================
// Layer 5 — ML / Model Layer
// ============================================================
// Everything that knows how a classifier computes lives here.
// No other layer looks inside a model; they only see the
// Classifier trait and the Predictor.
//
//   model.rs     — the JSON artifact, tagged by model kind
//   forest.rs    — averaged decision trees
//   logistic.rs  — linear model with a sigmoid link
//   predictor.rs — classifier + schema, checks every vector
//                  against the schema before inference

/// Tagged model artifact and its validation
pub mod model;

/// Random forest classifier
pub mod forest;

/// Logistic regression classifier
pub mod logistic;

/// Schema-checked inference entry point
pub mod predictor;
