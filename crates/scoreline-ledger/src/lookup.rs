//! Results of score lookups.
//!
//! Lookups never fail. A miss is reported through the `found` flag, with the
//! value set to NaN; check the flag (or use `as_option`), not the number.

/// A score lookup result: the value (NaN on a miss) and whether it was found.
#[derive(Clone, Copy, Debug)]
pub struct ScoreLookup {
    pub value: f64,
    pub found: bool,
}

impl ScoreLookup {
    pub fn hit(value: f64) -> Self {
        Self { value, found: true }
    }

    pub fn miss() -> Self {
        Self {
            value: f64::NAN,
            found: false,
        }
    }

    /// `Some(value)` if found.
    pub fn as_option(&self) -> Option<f64> {
        self.found.then_some(self.value)
    }
}

impl From<ScoreLookup> for (f64, bool) {
    fn from(lookup: ScoreLookup) -> Self {
        (lookup.value, lookup.found)
    }
}

/// A score lookup result that also names the step the score came from.
///
/// On a hit for a step-less score, `step` is `None` and `found` is `true`.
#[derive(Debug)]
pub struct StepScoreLookup<'a, S> {
    pub value: f64,
    pub step: Option<&'a S>,
    pub found: bool,
}

impl<'a, S> StepScoreLookup<'a, S> {
    pub fn hit(value: f64, step: Option<&'a S>) -> Self {
        Self {
            value,
            step,
            found: true,
        }
    }

    pub fn miss() -> Self {
        Self {
            value: f64::NAN,
            step: None,
            found: false,
        }
    }

    /// `Some((value, step))` if found.
    pub fn as_option(&self) -> Option<(f64, Option<&'a S>)> {
        self.found.then_some((self.value, self.step))
    }
}

impl<S> Clone for StepScoreLookup<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for StepScoreLookup<'_, S> {}

impl<S> From<StepScoreLookup<'_, S>> for ScoreLookup {
    fn from(lookup: StepScoreLookup<'_, S>) -> Self {
        Self {
            value: lookup.value,
            found: lookup.found,
        }
    }
}
