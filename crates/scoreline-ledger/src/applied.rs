//! A single processing step applied to an item, with its scores.

use std::collections::BTreeMap;

use scoreline_types::{ProcessingStepRef, ScoreTypeRef};

/// Scores keyed by score type. Each score type holds exactly one value.
pub type ScoreMap<T = ScoreTypeRef> = BTreeMap<T, f64>;

/// A processing step that was applied to an item, possibly with scores.
///
/// The step is optional: scores that are not tied to any processing step are
/// recorded under `None`. The step is fixed at construction. Entries held
/// inside a ledger are edited through [`AppliedStepMut`], never through
/// `&mut AppliedStep`.
#[derive(Clone, Debug, PartialEq)]
pub struct AppliedStep<S = ProcessingStepRef, T = ScoreTypeRef> {
    step: Option<S>,
    /// Scores produced by (or attached to) this step.
    pub scores: ScoreMap<T>,
}

impl<S, T: Ord> AppliedStep<S, T> {
    /// Create an entry with no scores.
    pub fn new(step: Option<S>) -> Self {
        Self {
            step,
            scores: BTreeMap::new(),
        }
    }

    /// Create an entry with the given scores.
    pub fn with_scores(step: Option<S>, scores: ScoreMap<T>) -> Self {
        Self { step, scores }
    }

    /// Create an entry holding a single score.
    pub fn single(step: Option<S>, score_type: T, value: f64) -> Self {
        let mut scores = BTreeMap::new();
        scores.insert(score_type, value);
        Self { step, scores }
    }

    /// The processing step, or `None` for step-less scores.
    pub fn step(&self) -> Option<&S> {
        self.step.as_ref()
    }

    /// The score recorded for `score_type`, if any.
    pub fn score(&self, score_type: &T) -> Option<f64> {
        self.scores.get(score_type).copied()
    }

    /// Set (or overwrite) a score.
    pub fn set_score(&mut self, score_type: T, value: f64) {
        self.scores.insert(score_type, value);
    }

    /// Split into the step option and the score map.
    pub fn into_parts(self) -> (Option<S>, ScoreMap<T>) {
        (self.step, self.scores)
    }
}

/// Mutable handle to an entry held inside a ledger.
///
/// Exposes the step read-only and the scores read-write. The entry itself
/// cannot be replaced through the handle.
#[derive(Debug)]
pub struct AppliedStepMut<'a, S, T> {
    step: Option<&'a S>,
    scores: &'a mut ScoreMap<T>,
}

impl<'a, S, T: Ord> AppliedStepMut<'a, S, T> {
    /// The processing step, or `None` for step-less scores.
    pub fn step(&self) -> Option<&'a S> {
        self.step
    }

    pub fn scores(&self) -> &ScoreMap<T> {
        self.scores
    }

    pub fn scores_mut(&mut self) -> &mut ScoreMap<T> {
        self.scores
    }

    /// The score recorded for `score_type`, if any.
    pub fn score(&self, score_type: &T) -> Option<f64> {
        self.scores.get(score_type).copied()
    }

    /// Set (or overwrite) a score.
    pub fn set_score(&mut self, score_type: T, value: f64) {
        self.scores.insert(score_type, value);
    }

    /// Give up the handle, keeping mutable access to the scores.
    pub fn into_scores_mut(self) -> &'a mut ScoreMap<T> {
        self.scores
    }
}

impl<S, T> AppliedStep<S, T> {
    /// Split borrow: step read-only, scores mutable.
    pub(crate) fn handle_mut(&mut self) -> AppliedStepMut<'_, S, T> {
        AppliedStepMut {
            step: self.step.as_ref(),
            scores: &mut self.scores,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entry_has_no_scores() {
        let entry: AppliedStep<u32, &str> = AppliedStep::new(Some(7));
        assert_eq!(entry.step(), Some(&7));
        assert!(entry.scores.is_empty());
    }

    #[test]
    fn step_less_entry() {
        let entry: AppliedStep<u32, &str> = AppliedStep::single(None, "pep", 0.01);
        assert_eq!(entry.step(), None);
        assert_eq!(entry.score(&"pep"), Some(0.01));
    }

    #[test]
    fn set_score_overwrites() {
        let mut entry: AppliedStep<u32, &str> = AppliedStep::single(Some(1), "q", 0.5);
        entry.set_score("q", 0.2);
        assert_eq!(entry.score(&"q"), Some(0.2));
        assert_eq!(entry.scores.len(), 1);
    }

    #[test]
    fn equality_considers_step_and_scores() {
        let a: AppliedStep<u32, &str> = AppliedStep::single(Some(1), "q", 0.5);
        let b = AppliedStep::single(Some(1), "q", 0.5);
        let c = AppliedStep::single(Some(2), "q", 0.5);
        let d = AppliedStep::single(Some(1), "q", 0.6);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn into_parts_returns_fields() {
        let entry: AppliedStep<u32, &str> = AppliedStep::single(Some(3), "s", 1.5);
        let (step, scores) = entry.into_parts();
        assert_eq!(step, Some(3));
        assert_eq!(scores.get("s"), Some(&1.5));
    }

    #[test]
    fn handle_reads_step_and_edits_scores() {
        let mut entry: AppliedStep<u32, &str> = AppliedStep::single(Some(9), "q", 0.5);
        {
            let mut handle = entry.handle_mut();
            assert_eq!(handle.step(), Some(&9));
            handle.set_score("q", 0.1);
            handle.scores_mut().insert("pep", 0.2);
            assert_eq!(handle.score(&"pep"), Some(0.2));
        }
        assert_eq!(entry.step(), Some(&9));
        assert_eq!(entry.score(&"q"), Some(0.1));
        assert_eq!(entry.scores.len(), 2);
    }
}
