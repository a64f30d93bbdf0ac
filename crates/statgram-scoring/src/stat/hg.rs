//! Harmonic Grammar: weighted sum with a min-0 threshold.

use std::collections::BTreeSet;

use statgram_core::{ConstraintName, Harmony, Mark, Result};

use super::HarmonyFunction;
use crate::api::weights::ConstraintWeights;

/// Static HG harmony function.
///
/// A subnode's score is the weighted sum of its marks; its harmony is the
/// score if negative and zero otherwise, so surplus positive evidence
/// saturates rather than rewarding the subnode.
///
/// # Example
///
/// ```
/// use std::collections::BTreeSet;
/// use statgram_core::{Harmony, Mark};
/// use statgram_scoring::{ConstraintWeights, HarmonyFunction, HgStat};
///
/// let hg = HgStat::new(
///     ConstraintWeights::try_from_pairs([("NoB", 1.0), ("PreferB", 2.0)]).unwrap(),
/// );
/// let marks = BTreeSet::from([Mark::violation("NoB"), Mark::satisfaction("PreferB")]);
/// assert_eq!(hg.subnode_harmony(&marks).unwrap(), Harmony::ZERO);
///
/// let marks = BTreeSet::from([Mark::violation("NoB")]);
/// assert_eq!(hg.subnode_harmony(&marks).unwrap(), Harmony::of(-1.0));
/// ```
#[derive(Debug, Clone)]
pub struct HgStat {
    weights: ConstraintWeights,
}

impl HgStat {
    pub fn new(weights: ConstraintWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ConstraintWeights {
        &self.weights
    }

    /// Weighted sum of the marks before thresholding.
    pub fn score(&self, marks: &BTreeSet<Mark>) -> Result<f64> {
        let mut score = 0.0;
        for mark in marks {
            score += self.weights.weight(&mark.constraint)? * f64::from(mark.value);
        }
        Ok(score)
    }
}

impl HarmonyFunction for HgStat {
    fn semantics(&self) -> &'static str {
        "HG"
    }

    fn subnode_harmony(&self, marks: &BTreeSet<Mark>) -> Result<Harmony> {
        let score = self.score(marks)?;
        Ok(if score < 0.0 {
            Harmony::of(score)
        } else {
            Harmony::ZERO
        })
    }

    /// The heaviest violated constraint of a penalized subnode.
    fn decisive_constraint(&self, marks: &BTreeSet<Mark>) -> Result<Option<ConstraintName>> {
        if self.score(marks)? >= 0.0 {
            return Ok(None);
        }
        let mut heaviest: Option<(&Mark, f64)> = None;
        for mark in marks.iter().filter(|m| m.is_violation()) {
            let penalty = -self.weights.weight(&mark.constraint)? * f64::from(mark.value);
            if heaviest.map_or(true, |(_, p)| penalty > p) {
                heaviest = Some((mark, penalty));
            }
        }
        Ok(heaviest.map(|(m, _)| m.constraint.clone()))
    }

    fn ensure_covers(&self, names: &[&str]) -> Result<()> {
        self.weights.ensure_covers(names.iter().copied())
    }
}
