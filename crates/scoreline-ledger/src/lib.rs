//! Step/score ledger for Scoreline.
//!
//! Records, for one processed item, which processing steps were applied to it
//! (in order of first application) and the scores each step produced. A step
//! appears at most once; re-applying it updates its scores in place.
//!
//! Scores can be looked up for a specific step, or across all steps in
//! "most recent first" order, where the last-appended step wins.
//!
//! # Key Types
//!
//! - [`StepScoreLedger`] -- The ordered, step-unique collection
//! - [`AppliedStep`] -- One step option and its score map
//! - [`AppliedStepMut`] -- Handle to an entry inside a ledger; only its scores are writable
//! - [`ByStep`] / [`ByStepMut`] -- Views keyed by step option
//! - [`ScoreLookup`] / [`StepScoreLookup`] -- Lookup results (value or NaN, found flag)

pub mod applied;
pub mod ledger;
pub mod lookup;

pub use applied::{AppliedStep, AppliedStepMut, ScoreMap};
pub use ledger::{ByStep, ByStepMut, IterMut, StepScoreLedger};
pub use lookup::{ScoreLookup, StepScoreLookup};
