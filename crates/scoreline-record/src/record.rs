//! The [`ScoredProcessing`] trait and the [`ScoredProcessingResult`] record.

use std::ops::AddAssign;

use scoreline_ledger::{AppliedStep, ScoreLookup, ScoreMap, StepScoreLedger, StepScoreLookup};
use scoreline_types::{ProcessingStepRef, ScoreTypeRef};
use tracing::debug;

use crate::meta::MetaInfo;

/// An item that carries processing steps, scores, and meta information.
///
/// Implementors provide access to their ledger and meta map; score
/// bookkeeping and merging come for free. All methods delegate to
/// [`StepScoreLedger`], so lookups never fail and signal misses through
/// the `found` flag.
pub trait ScoredProcessing {
    fn steps_and_scores(&self) -> &StepScoreLedger;

    fn steps_and_scores_mut(&mut self) -> &mut StepScoreLedger;

    fn meta(&self) -> &MetaInfo;

    fn meta_mut(&mut self) -> &mut MetaInfo;

    /// Record an applied step; scores of an already-known step are updated.
    fn add_applied_step(&mut self, applied: AppliedStep) {
        self.steps_and_scores_mut().add_applied(applied);
    }

    /// Record a processing step and its scores (possibly none).
    fn add_processing_step(&mut self, step: ProcessingStepRef, scores: ScoreMap) {
        self.steps_and_scores_mut().add_step(Some(step), scores);
    }

    /// Record a score, optionally tied to a processing step.
    fn add_score(&mut self, score_type: ScoreTypeRef, value: f64, step: Option<ProcessingStepRef>) {
        self.steps_and_scores_mut().add_score(score_type, value, step);
    }

    /// Score of the given type, from the most recent step that has one.
    fn get_score(&self, score_type: &ScoreTypeRef) -> ScoreLookup {
        self.steps_and_scores().get_score(score_type)
    }

    /// Score of the given type recorded under exactly `step`.
    fn get_step_score(
        &self,
        score_type: &ScoreTypeRef,
        step: Option<&ProcessingStepRef>,
    ) -> ScoreLookup {
        self.steps_and_scores().get_step_score(score_type, step)
    }

    /// Like [`get_score`](Self::get_score), also naming the step.
    fn get_score_and_step(
        &self,
        score_type: &ScoreTypeRef,
    ) -> StepScoreLookup<'_, ProcessingStepRef> {
        self.steps_and_scores().get_score_and_step(score_type)
    }

    /// Merge another item's steps, scores, and meta information into this one.
    ///
    /// Scores and meta values from `other` replace this item's on collision.
    fn merge_from(&mut self, other: &Self) {
        self.steps_and_scores_mut().merge(other.steps_and_scores());
        self.meta_mut().merge(other.meta());
        debug!(
            steps = self.steps_and_scores().len(),
            meta_keys = self.meta().len(),
            "merged scored processing result"
        );
    }
}

/// Standalone scored processing result: a ledger plus meta information.
///
/// Items with no further state can use this directly; richer items embed it
/// and forward the [`ScoredProcessing`] accessors.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScoredProcessingResult {
    pub steps_and_scores: StepScoreLedger,
    pub meta: MetaInfo,
}

impl ScoredProcessingResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing ledger.
    pub fn with_steps(steps_and_scores: StepScoreLedger) -> Self {
        Self {
            steps_and_scores,
            meta: MetaInfo::new(),
        }
    }
}

impl ScoredProcessing for ScoredProcessingResult {
    fn steps_and_scores(&self) -> &StepScoreLedger {
        &self.steps_and_scores
    }

    fn steps_and_scores_mut(&mut self) -> &mut StepScoreLedger {
        &mut self.steps_and_scores
    }

    fn meta(&self) -> &MetaInfo {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut MetaInfo {
        &mut self.meta
    }
}

impl AddAssign<&ScoredProcessingResult> for ScoredProcessingResult {
    fn add_assign(&mut self, other: &ScoredProcessingResult) {
        self.merge_from(other);
    }
}
