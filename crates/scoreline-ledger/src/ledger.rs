//! The [`StepScoreLedger`]: applied steps in order, unique per step.
//!
//! Entries live in a single `Vec` in order of first application. A position
//! index maps each step option to its entry: `absent` holds the position of
//! the step-less entry and `positions` the positions of entries with a step.
//! Entries are never removed, so positions stay valid for the life of the
//! ledger.
//!
//! # Invariants
//!
//! - At most one entry per step option (including at most one `None`).
//! - Entries keep the position they were first appended at.
//! - Every position in the index points at the entry with that step.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::AddAssign;

use scoreline_types::{ProcessingStepRef, ScoreTypeRef};
use tracing::{debug, trace};

use crate::applied::{AppliedStep, AppliedStepMut, ScoreMap};
use crate::lookup::{ScoreLookup, StepScoreLookup};

/// Ordered record of the processing steps applied to an item and the scores
/// each produced.
///
/// The ledger is a plain value: `Clone` is a deep copy, and it is `Send` and
/// `Sync` whenever the step and score type references are.
#[derive(Clone, Debug)]
pub struct StepScoreLedger<S = ProcessingStepRef, T = ScoreTypeRef> {
    /// All entries, in order of first application.
    entries: Vec<AppliedStep<S, T>>,
    /// Position of the step-less entry, if there is one.
    absent: Option<usize>,
    /// Position of each entry that has a step.
    positions: BTreeMap<S, usize>,
}

impl<S, T> Default for StepScoreLedger<S, T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            absent: None,
            positions: BTreeMap::new(),
        }
    }
}

impl<S: PartialEq, T: PartialEq> PartialEq for StepScoreLedger<S, T> {
    fn eq(&self, other: &Self) -> bool {
        // The index is derived from the entries.
        self.entries == other.entries
    }
}

impl<S: Ord + Clone, T: Ord> StepScoreLedger<S, T> {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct step options recorded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, step: Option<&S>) -> Option<usize> {
        match step {
            None => self.absent,
            Some(step) => self.positions.get(step).copied(),
        }
    }

    // ---------------------------------------------------------------
    // Mutation
    // ---------------------------------------------------------------

    /// Record an applied step.
    ///
    /// If the step option is new, the entry is appended. Otherwise its scores
    /// are written into the existing entry, overwriting values for score
    /// types already present; the entry keeps its position.
    pub fn add_applied(&mut self, applied: AppliedStep<S, T>) {
        if let Some(pos) = self.position(applied.step()) {
            let (_, scores) = applied.into_parts();
            self.entries[pos].scores.extend(scores);
            return;
        }

        let pos = self.entries.len();
        match applied.step() {
            None => self.absent = Some(pos),
            Some(step) => {
                self.positions.insert(step.clone(), pos);
            }
        }
        trace!(position = pos, scores = applied.scores.len(), "appended step entry");
        self.entries.push(applied);
    }

    /// Record a step (or `None` for step-less scores) with the given scores.
    ///
    /// Pass an empty map to register the step without scores.
    pub fn add_step(&mut self, step: Option<S>, scores: ScoreMap<T>) {
        self.add_applied(AppliedStep::with_scores(step, scores));
    }

    /// Record a single score, optionally attached to a step.
    pub fn add_score(&mut self, score_type: T, value: f64, step: Option<S>) {
        self.add_applied(AppliedStep::single(step, score_type, value));
    }

    /// Merge another ledger into this one.
    ///
    /// Entries of `other` are added in `other`'s order. Steps new to `self`
    /// are appended; shared steps keep their position here and take
    /// `other`'s value on score type collisions. The result depends on merge
    /// order: when merging several sources, the last one merged wins.
    pub fn merge(&mut self, other: &Self)
    where
        T: Clone,
    {
        let before = self.entries.len();
        for applied in &other.entries {
            self.add_applied(applied.clone());
        }
        debug!(
            merged = other.entries.len(),
            appended = self.entries.len() - before,
            total = self.entries.len(),
            "merged step ledgers"
        );
    }

    // ---------------------------------------------------------------
    // Lookup
    // ---------------------------------------------------------------

    /// Look up a score across all steps, most recent first.
    pub fn get_score(&self, score_type: &T) -> ScoreLookup {
        self.get_score_and_step(score_type).into()
    }

    /// Look up a score for exactly one step option.
    pub fn get_step_score(&self, score_type: &T, step: Option<&S>) -> ScoreLookup {
        self.by_step()
            .get(step)
            .and_then(|applied| applied.score(score_type))
            .map_or_else(ScoreLookup::miss, ScoreLookup::hit)
    }

    /// Look up a score across all steps, most recent first, also returning
    /// the step option it was recorded under.
    pub fn get_score_and_step(&self, score_type: &T) -> StepScoreLookup<'_, S> {
        self.entries
            .iter()
            .rev()
            .find_map(|applied| {
                applied
                    .score(score_type)
                    .map(|value| StepScoreLookup::hit(value, applied.step()))
            })
            .unwrap_or_else(StepScoreLookup::miss)
    }

    /// Returns `true` if an entry exists for the step option.
    pub fn contains_step(&self, step: Option<&S>) -> bool {
        self.position(step).is_some()
    }

    /// Step options in order of first application.
    pub fn steps(&self) -> impl DoubleEndedIterator<Item = Option<&S>> + '_ {
        self.entries.iter().map(AppliedStep::step)
    }

    /// Every score type recorded under any step.
    pub fn score_types(&self) -> BTreeSet<&T> {
        self.entries
            .iter()
            .flat_map(|applied| applied.scores.keys())
            .collect()
    }

    // ---------------------------------------------------------------
    // Views
    // ---------------------------------------------------------------

    /// Entries in order of first application.
    pub fn iter(&self) -> std::slice::Iter<'_, AppliedStep<S, T>> {
        self.entries.iter()
    }

    /// Mutable entries in order of first application.
    ///
    /// Only scores are writable; an entry's step cannot be changed.
    pub fn iter_mut(&mut self) -> IterMut<'_, S, T> {
        IterMut {
            inner: self.entries.iter_mut(),
        }
    }

    /// View of the entries keyed by step option.
    pub fn by_step(&self) -> ByStep<'_, S, T> {
        ByStep { ledger: self }
    }

    /// Mutable view of the entries keyed by step option.
    pub fn by_step_mut(&mut self) -> ByStepMut<'_, S, T> {
        ByStepMut { ledger: self }
    }

    /// Entry positions in step-option order (`None` first).
    fn key_order(&self) -> impl DoubleEndedIterator<Item = usize> + '_ {
        self.absent
            .into_iter()
            .chain(self.positions.values().copied())
    }
}

/// Read-only view of a ledger keyed by step option.
///
/// Backed by the ledger's own entries; iteration is in step-option order,
/// with the step-less entry first.
pub struct ByStep<'a, S, T> {
    ledger: &'a StepScoreLedger<S, T>,
}

impl<'a, S: Ord + Clone, T: Ord> ByStep<'a, S, T> {
    /// The entry for a step option.
    pub fn get(&self, step: Option<&S>) -> Option<&'a AppliedStep<S, T>> {
        let ledger = self.ledger;
        ledger.position(step).map(|pos| &ledger.entries[pos])
    }

    pub fn contains(&self, step: Option<&S>) -> bool {
        self.ledger.contains_step(step)
    }

    pub fn len(&self) -> usize {
        self.ledger.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    /// Entries in step-option order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &'a AppliedStep<S, T>> + 'a {
        let ledger = self.ledger;
        ledger.key_order().map(move |pos| &ledger.entries[pos])
    }

    /// Step options in sorted order.
    pub fn steps(&self) -> impl DoubleEndedIterator<Item = Option<&'a S>> + 'a {
        self.iter().map(AppliedStep::step)
    }
}

/// Mutable view of a ledger keyed by step option.
///
/// Scores can be edited in place; entries cannot be re-keyed or removed.
pub struct ByStepMut<'a, S, T> {
    ledger: &'a mut StepScoreLedger<S, T>,
}

impl<S: Ord + Clone, T: Ord> ByStepMut<'_, S, T> {
    /// The entry for a step option.
    pub fn get(&self, step: Option<&S>) -> Option<&AppliedStep<S, T>> {
        self.ledger
            .position(step)
            .map(|pos| &self.ledger.entries[pos])
    }

    /// The entry for a step option, with its scores writable.
    pub fn get_mut(&mut self, step: Option<&S>) -> Option<AppliedStepMut<'_, S, T>> {
        let pos = self.ledger.position(step)?;
        self.ledger.entries.get_mut(pos).map(AppliedStep::handle_mut)
    }

    pub fn contains(&self, step: Option<&S>) -> bool {
        self.ledger.contains_step(step)
    }

    /// Mutable entries in step-option order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = AppliedStepMut<'_, S, T>> + '_ {
        let order: Vec<usize> = self.ledger.key_order().collect();
        let mut slots: Vec<Option<&mut AppliedStep<S, T>>> =
            self.ledger.entries.iter_mut().map(Some).collect();
        order.into_iter().filter_map(move |pos| {
            slots
                .get_mut(pos)
                .and_then(Option::take)
                .map(AppliedStep::handle_mut)
        })
    }
}

/// Mutable iterator over a ledger's entries in order of first application.
///
/// Yields [`AppliedStepMut`] handles, so scores can be edited but entries
/// cannot be replaced.
pub struct IterMut<'a, S, T> {
    inner: std::slice::IterMut<'a, AppliedStep<S, T>>,
}

impl<'a, S, T> Iterator for IterMut<'a, S, T> {
    type Item = AppliedStepMut<'a, S, T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(AppliedStep::handle_mut)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<S, T> DoubleEndedIterator for IterMut<'_, S, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(AppliedStep::handle_mut)
    }
}

impl<S, T> ExactSizeIterator for IterMut<'_, S, T> {}

impl<'a, S, T> IntoIterator for &'a StepScoreLedger<S, T> {
    type Item = &'a AppliedStep<S, T>;
    type IntoIter = std::slice::Iter<'a, AppliedStep<S, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<'a, S, T> IntoIterator for &'a mut StepScoreLedger<S, T> {
    type Item = AppliedStepMut<'a, S, T>;
    type IntoIter = IterMut<'a, S, T>;

    fn into_iter(self) -> Self::IntoIter {
        IterMut {
            inner: self.entries.iter_mut(),
        }
    }
}

impl<S, T> IntoIterator for StepScoreLedger<S, T> {
    type Item = AppliedStep<S, T>;
    type IntoIter = std::vec::IntoIter<AppliedStep<S, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<S: Ord + Clone, T: Ord> Extend<AppliedStep<S, T>> for StepScoreLedger<S, T> {
    fn extend<I: IntoIterator<Item = AppliedStep<S, T>>>(&mut self, iter: I) {
        for applied in iter {
            self.add_applied(applied);
        }
    }
}

impl<S: Ord + Clone, T: Ord> FromIterator<AppliedStep<S, T>> for StepScoreLedger<S, T> {
    fn from_iter<I: IntoIterator<Item = AppliedStep<S, T>>>(iter: I) -> Self {
        let mut ledger = Self::new();
        ledger.extend(iter);
        ledger
    }
}

impl<S: Ord + Clone, T: Ord + Clone> AddAssign<&StepScoreLedger<S, T>> for StepScoreLedger<S, T> {
    fn add_assign(&mut self, other: &StepScoreLedger<S, T>) {
        self.merge(other);
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    type Ledger = StepScoreLedger<u8, u8>;

    /// (step option, score type, value)
    type Op = (Option<u8>, u8, i32);

    fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
        prop::collection::vec((prop::option::of(0u8..8), 0u8..4, -1000i32..1000), 0..48)
    }

    fn apply(ops: &[Op]) -> Ledger {
        let mut ledger = Ledger::new();
        for &(step, score_type, value) in ops {
            ledger.add_score(score_type, f64::from(value), step);
        }
        ledger
    }

    fn first_seen_order(ops: &[Op]) -> Vec<Option<u8>> {
        let mut order = Vec::new();
        for &(step, _, _) in ops {
            if !order.contains(&step) {
                order.push(step);
            }
        }
        order
    }

    proptest! {
        /// Every step option appears exactly once, and the keyed view finds it.
        #[test]
        fn steps_are_unique(ops in arb_ops()) {
            let ledger = apply(&ops);
            let distinct: BTreeSet<Option<u8>> = ops.iter().map(|op| op.0).collect();
            prop_assert_eq!(ledger.len(), distinct.len());
            for applied in &ledger {
                let found = ledger.by_step().get(applied.step());
                prop_assert_eq!(found.map(AppliedStep::step), Some(applied.step()));
            }
        }

        /// Entries are ordered by first application.
        #[test]
        fn order_is_first_application(ops in arb_ops()) {
            let ledger = apply(&ops);
            let order: Vec<Option<u8>> = ledger.steps().map(|s| s.copied()).collect();
            prop_assert_eq!(order, first_seen_order(&ops));
        }

        /// The last write for a (step, score type) pair is what a lookup returns.
        #[test]
        fn last_write_wins(ops in arb_ops()) {
            let ledger = apply(&ops);
            let mut expected: BTreeMap<(Option<u8>, u8), i32> = BTreeMap::new();
            for &(step, score_type, value) in &ops {
                expected.insert((step, score_type), value);
            }
            for ((step, score_type), value) in expected {
                let lookup = ledger.get_step_score(&score_type, step.as_ref());
                prop_assert!(lookup.found);
                prop_assert_eq!(lookup.value, f64::from(value));
            }
        }

        /// Score edits through the mutable views never unhook an entry from
        /// the step index.
        #[test]
        fn mutable_views_preserve_index(ops in arb_ops(), edits in arb_ops()) {
            let mut ledger = apply(&ops);
            let order: Vec<Option<u8>> = ledger.steps().map(|s| s.copied()).collect();

            for &(step, score_type, value) in &edits {
                if let Some(mut applied) = ledger.by_step_mut().get_mut(step.as_ref()) {
                    applied.set_score(score_type, f64::from(value));
                }
            }
            for (i, mut applied) in ledger.iter_mut().enumerate() {
                if i % 2 == 0 {
                    applied.scores_mut().clear();
                }
            }
            for mut applied in ledger.by_step_mut().iter_mut() {
                applied.set_score(u8::MAX, 0.0);
            }

            let after: Vec<Option<u8>> = ledger.steps().map(|s| s.copied()).collect();
            prop_assert_eq!(&after, &order);
            for applied in &ledger {
                let found = ledger.by_step().get(applied.step());
                prop_assert_eq!(found.map(AppliedStep::step), Some(applied.step()));
            }

            let len = ledger.len();
            for &(step, score_type, value) in &ops {
                ledger.add_score(score_type, f64::from(value), step);
            }
            prop_assert_eq!(ledger.len(), len);
        }

        /// Merging is the same as replaying the other ledger's entries.
        #[test]
        fn merge_matches_sequential_application(left in arb_ops(), right in arb_ops()) {
            let mut merged = apply(&left);
            let before: Vec<Option<u8>> = merged.steps().map(|s| s.copied()).collect();
            merged.merge(&apply(&right));

            let after: Vec<Option<u8>> = merged.steps().map(|s| s.copied()).collect();
            prop_assert_eq!(&after[..before.len()], &before[..]);

            let mut replayed = apply(&left);
            replayed.extend(apply(&right));
            prop_assert_eq!(merged, replayed);
        }
    }
}
