//! Scored processing results for Scoreline.
//!
//! A scored processing result is any item that has been through one or more
//! processing steps and carries scores: it owns a [`StepScoreLedger`] plus a
//! flat map of meta information. Merging two results merges both.
//!
//! Items compose this behaviour by implementing [`ScoredProcessing`] (four
//! accessors; everything else is provided), or by embedding the ready-made
//! [`ScoredProcessingResult`].
//!
//! [`StepScoreLedger`]: scoreline_ledger::StepScoreLedger

pub mod error;
pub mod meta;
pub mod record;

pub use error::{RecordError, RecordResult};
pub use meta::{MetaInfo, MetaValue};
pub use record::{ScoredProcessing, ScoredProcessingResult};
