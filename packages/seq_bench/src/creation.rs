use std::iter;

use rand::seq::SliceRandom;

use crate::{Sequence, Value};

/// The state a container is put into before the measured chain runs.
///
/// Filling is never part of the measurement.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum Create {
    /// No elements.
    #[default]
    Empty,

    /// `N` elements with keys `0..N` in ascending order.
    FilledAscending,

    /// `N` elements with keys `0..N` in a random order that differs between trials.
    FilledShuffled,

    /// `N` copies of one default-constructed prototype.
    ///
    /// The container owns the copies directly. No handles are kept outside it, so
    /// [`Creation::clean()`] has nothing to release for this policy and destroying the
    /// container drops every element.
    SmartFilled,
}

/// Puts containers into the state selected by a [`Create`] policy.
///
/// Holds scratch memory between a fill and the matching [`clean()`](Self::clean), which the
/// benchmark loop calls after every trial so that nothing allocated for setup outlives it.
#[derive(Debug)]
pub struct Creation {
    policy: Create,
    shuffled_keys: Vec<usize>,
}

impl Creation {
    /// Creates the filler for `policy`.
    #[must_use]
    pub fn new(policy: Create) -> Self {
        Self {
            policy,
            shuffled_keys: Vec::new(),
        }
    }

    /// The policy this filler applies.
    #[must_use]
    pub fn policy(&self) -> Create {
        self.policy
    }

    /// Fills the empty `container` up to nominal size `size`.
    pub fn fill<T: Value>(&mut self, container: &mut impl Sequence<T>, size: usize) {
        match self.policy {
            Create::Empty => {}
            Create::FilledAscending => container.extend_back((0..size).map(T::from_key)),
            Create::FilledShuffled => {
                self.shuffled_keys.clear();
                self.shuffled_keys.extend(0..size);
                self.shuffled_keys.shuffle(&mut rand::rng());

                container.extend_back(self.shuffled_keys.iter().copied().map(T::from_key));
            }
            Create::SmartFilled => {
                let prototype = T::default();
                container.extend_back(iter::repeat_n(prototype, size));
            }
        }
    }

    /// Releases the scratch memory held since the last fill.
    pub fn clean(&mut self) {
        self.shuffled_keys = Vec::new();
    }
}
