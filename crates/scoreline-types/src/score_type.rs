use serde::{Deserialize, Serialize};

use crate::digest::digest_ref;

/// Opaque identifier of a score type.
///
/// Derived from the score type's name only, so the same metric reported with
/// different orientation metadata still keys to the same ledger slot.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScoreTypeRef([u8; 32]);

impl ScoreTypeRef {
    /// Derive the identifier for a score type name.
    pub fn named(name: &str) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"scoreline-score-type-v1:");
        hasher.update(name.as_bytes());
        Self(*hasher.finalize().as_bytes())
    }
}

digest_ref!(ScoreTypeRef, "score");

/// A named metric and its orientation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreType {
    /// Metric name (e.g. "q-value", "hyperscore").
    pub name: String,
    /// Whether larger values are better.
    pub higher_better: bool,
}

impl ScoreType {
    pub fn new(name: impl Into<String>, higher_better: bool) -> Self {
        Self {
            name: name.into(),
            higher_better,
        }
    }

    /// The identifier used as a ledger key.
    pub fn id(&self) -> ScoreTypeRef {
        ScoreTypeRef::named(&self.name)
    }
}
