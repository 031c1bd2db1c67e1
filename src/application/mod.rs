// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer wires the other layers together for one goal:
// turning a submission into a risk decision.
//
// Rules for this layer:
//   - No model math here (that's Layer 5)
//   - No HTML, printing or argument parsing (that's Layer 1)
//   - No file access (that's Layer 6)
//   - Only workflow coordination

// The encode → predict workflow
pub mod predict_use_case;
