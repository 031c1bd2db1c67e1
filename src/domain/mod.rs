// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types and traits describing what the system is
// about: patient attributes, the column schema, the encoded
// vector, the prediction, and the errors that can occur.
//
// Rules for this layer:
//   - NO file I/O or network calls
//   - NO model internals
//   - Only plain Rust structs, enums, and traits

// Closed domains for every form attribute
pub mod attributes;

// Untyped submission and its conversion to typed attributes
pub mod raw;

// Column schema and the vector laid out against it
pub mod feature_vector;

// Label + probability
pub mod prediction;

// ArtifactLoad / InvalidInput / SchemaMismatch
pub mod error;

// Core abstractions (traits) that other layers implement
pub mod traits;
