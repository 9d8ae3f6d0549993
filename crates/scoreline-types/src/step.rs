use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::digest::digest_ref;

/// Opaque identifier of a processing step.
///
/// A `ProcessingStepRef` is the BLAKE3 digest of a [`ProcessingStep`]
/// descriptor. Identical descriptors always produce the same reference, so
/// two producers describing the same step agree on its identity without
/// sharing a registry. Callers with their own identity scheme can wrap a
/// pre-computed digest with [`ProcessingStepRef::from_hash`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProcessingStepRef([u8; 32]);

digest_ref!(ProcessingStepRef, "step");

/// Descriptor of one stage of a processing pipeline.
///
/// Only the identity-bearing parts are modelled: which software ran, which
/// version, and which named actions it performed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingStep {
    /// Name of the software that performed the step.
    pub software: String,
    /// Software version string.
    pub version: String,
    /// Named actions performed by the step (e.g. "filtering", "scoring").
    pub actions: BTreeSet<String>,
}

impl ProcessingStep {
    /// Create a step descriptor with no actions.
    pub fn new(software: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            software: software.into(),
            version: version.into(),
            actions: BTreeSet::new(),
        }
    }

    /// Builder-style helper adding a named action.
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.actions.insert(action.into());
        self
    }

    /// Derive the identifier of this step.
    pub fn id(&self) -> ProcessingStepRef {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"scoreline-step-v1:");
        update_field(&mut hasher, self.software.as_bytes());
        update_field(&mut hasher, self.version.as_bytes());
        for action in &self.actions {
            update_field(&mut hasher, action.as_bytes());
        }
        ProcessingStepRef(*hasher.finalize().as_bytes())
    }
}

// Length-prefixed so that ("ab", "c") and ("a", "bc") hash differently.
fn update_field(hasher: &mut blake3::Hasher, bytes: &[u8]) {
    hasher.update(&(bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TypeError;

    #[test]
    fn id_is_deterministic() {
        let step = ProcessingStep::new("SearchEngine", "2.1").with_action("scoring");
        assert_eq!(step.id(), step.clone().id());
    }

    #[test]
    fn different_versions_produce_different_ids() {
        let a = ProcessingStep::new("SearchEngine", "2.1");
        let b = ProcessingStep::new("SearchEngine", "2.2");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn field_boundaries_are_significant() {
        let a = ProcessingStep::new("ab", "c");
        let b = ProcessingStep::new("a", "bc");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn actions_are_part_of_identity() {
        let bare = ProcessingStep::new("Filter", "1.0");
        let with_action = bare.clone().with_action("fdr");
        assert_ne!(bare.id(), with_action.id());
    }

    #[test]
    fn action_insertion_order_does_not_matter() {
        let a = ProcessingStep::new("Filter", "1.0")
            .with_action("fdr")
            .with_action("dedup");
        let b = ProcessingStep::new("Filter", "1.0")
            .with_action("dedup")
            .with_action("fdr");
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn hex_roundtrip_with_prefix() {
        let id = ProcessingStep::new("Tool", "1").id();
        let prefixed = format!("step:{}", id.to_hex());
        assert_eq!(ProcessingStepRef::from_hex(&prefixed).unwrap(), id);
    }

    #[test]
    fn from_hex_rejects_short_input() {
        let err = ProcessingStepRef::from_hex("abcd").unwrap_err();
        assert_eq!(
            err,
            TypeError::InvalidLength {
                expected: 32,
                actual: 2
            }
        );
    }

    #[test]
    fn from_hex_rejects_non_hex() {
        assert!(matches!(
            ProcessingStepRef::from_hex("zz"),
            Err(TypeError::InvalidHex(_))
        ));
    }

    #[test]
    fn display_uses_short_form() {
        let id = ProcessingStepRef::from_hash([0xab; 32]);
        assert_eq!(format!("{id}"), "step:abababab");
        assert_eq!(format!("{id:?}"), "ProcessingStepRef(abababab)");
    }

    #[test]
    fn serde_roundtrip() {
        let id = ProcessingStep::new("Tool", "1").id();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: ProcessingStepRef = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn ordering_is_consistent() {
        let a = ProcessingStepRef::from_hash([0; 32]);
        let b = ProcessingStepRef::from_hash([1; 32]);
        assert!(a < b);
    }
}
