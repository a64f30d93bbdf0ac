//! The outcome of aggregating one markup.

use std::collections::HashSet;
use std::fmt;

use statgram_core::{CandidateElement, Harmony};

/// Total harmony and the ill-formed elements, in evaluation order.
///
/// `total` is the sum of the ill-formed elements' harmonies, so it is zero
/// exactly when `ill_formed` is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct HarmonyResult<E> {
    pub total: Harmony,
    pub ill_formed: Vec<E>,
    /// Number of elements aggregated, well-formed or not.
    pub evaluated: usize,
}

impl<E> Default for HarmonyResult<E> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<E> HarmonyResult<E> {
    /// The result for an empty markup: `(0, ∅)`.
    pub fn empty() -> Self {
        Self {
            total: Harmony::ZERO,
            ill_formed: Vec::new(),
            evaluated: 0,
        }
    }

    /// Returns true if no element was penalized.
    pub fn is_well_formed(&self) -> bool {
        self.ill_formed.is_empty()
    }

    pub fn ill_formed_count(&self) -> usize {
        self.ill_formed.len()
    }

    pub fn well_formed_count(&self) -> usize {
        self.evaluated - self.ill_formed.len()
    }
}

impl<E: CandidateElement> HarmonyResult<E> {
    pub(crate) fn record(&mut self, element: &E, harmony: Harmony) {
        self.evaluated += 1;
        if !harmony.is_well_formed() {
            self.total += harmony;
            self.ill_formed.push(element.clone());
        }
    }

    pub fn is_ill_formed(&self, element: &E) -> bool {
        self.ill_formed.contains(element)
    }

    /// The ill-formed elements as a set, ready for pruning.
    pub fn ill_formed_set(&self) -> HashSet<E> {
        self.ill_formed.iter().cloned().collect()
    }
}

impl<E> fmt::Display for HarmonyResult<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "harmony {} ({} of {} elements ill-formed)",
            self.total,
            self.ill_formed.len(),
            self.evaluated
        )
    }
}
