// ============================================================
// Layer 3 — Feature Schema and Encoded Feature Vector
// ============================================================
// The schema is the ordered column list the trained model
// expects. It ships next to the model and is never built here.
//
// An EncodedFeatureVector is always laid out in exactly that
// order and carries the schema it was built against, so the
// predictor can refuse a vector meant for a different model.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Ordered, non-empty list of unique column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct FeatureSchema {
    columns: Vec<String>,
}

impl FeatureSchema {
    /// Returns an error message when the column list is empty
    /// or names a column twice.
    pub fn new(columns: Vec<String>) -> Result<Self, String> {
        if columns.is_empty() {
            return Err("schema has no columns".to_string());
        }
        let mut seen = HashSet::with_capacity(columns.len());
        for c in &columns {
            if !seen.insert(c.as_str()) {
                return Err(format!("duplicate column '{c}'"));
            }
        }
        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }
}

impl TryFrom<Vec<String>> for FeatureSchema {
    type Error = String;

    fn try_from(columns: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(columns)
    }
}

impl From<FeatureSchema> for Vec<String> {
    fn from(schema: FeatureSchema) -> Self {
        schema.columns
    }
}

/// Numeric model input, one value per schema column.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedFeatureVector {
    schema: Arc<FeatureSchema>,
    values: Vec<f64>,
}

impl EncodedFeatureVector {
    /// Callers are expected to supply exactly one value per column;
    /// the predictor re-checks this before inference.
    pub fn new(schema: Arc<FeatureSchema>, values: Vec<f64>) -> Self {
        Self { schema, values }
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Look up a value by column name.
    pub fn get(&self, column: &str) -> Option<f64> {
        self.schema
            .position(column)
            .and_then(|i| self.values.get(i).copied())
    }

    /// (column, value) pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.schema
            .columns()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}
