//! Foundation types for Scoreline.
//!
//! This crate provides the opaque identifiers that the step/score ledger keys
//! on, and the descriptors they are derived from. The ledger itself never
//! looks inside an identifier; it only compares them.
//!
//! # Key Types
//!
//! - [`ProcessingStepRef`] -- Identifier of one stage of a processing pipeline
//! - [`ScoreTypeRef`] -- Identifier of a kind of score (a named metric)
//! - [`ProcessingStep`] -- Software/version/actions descriptor of a step
//! - [`ScoreType`] -- Name and orientation of a score

mod digest;
pub mod error;
pub mod score_type;
pub mod step;

pub use error::{TypeError, TypeResult};
pub use score_type::{ScoreType, ScoreTypeRef};
pub use step::{ProcessingStep, ProcessingStepRef};
