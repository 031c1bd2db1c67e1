// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that don't belong to any one business
// layer:
//
//   artifact_store.rs — reads the trained classifier and its
//                       column list from disk once at startup
//                       and binds them into a Predictor
//
//   settings.rs       — where the artifacts live and where the
//                       form server listens
//
// Reference: Rust Book §9 (Error Handling)

/// Model + column list loading
pub mod artifact_store;

/// Startup settings
pub mod settings;
