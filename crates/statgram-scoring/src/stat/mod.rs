//! Harmony aggregation (Stat).
//!
//! A [`HarmonyFunction`] reduces the marks on one subnode to a harmony
//! value. Element harmony is the sum over its subnodes; an element is
//! ill-formed iff its harmony is strictly negative. Two semantics are
//! provided:
//!
//! - [`HgStat`]: weighted sum with a min-0 threshold (Harmonic Grammar)
//! - [`OtStat`]: strict domination by the highest-ranked mark (Optimality Theory)
//!
//! Exactly one is chosen per run; [`Stat`] carries that choice at runtime.

mod hg;
mod ot;
mod result;


use std::collections::BTreeSet;

use tracing::debug;

use statgram_core::{CandidateElement, ConstraintName, Harmony, Mark, Result};

use crate::api::ranks::ConstraintRanks;
use crate::api::weights::ConstraintWeights;
use crate::eval::{Markup, SubnodeMarks};

pub use hg::HgStat;
pub use ot::OtStat;
pub use result::HarmonyResult;

/// Reduces the marks on one subnode to a (non-positive) harmony.
pub trait HarmonyFunction: Send + Sync {
    /// Short name of the semantics, used in log events.
    fn semantics(&self) -> &'static str;

    /// Harmony of one subnode. Empty mark sets have zero harmony.
    fn subnode_harmony(&self, marks: &BTreeSet<Mark>) -> Result<Harmony>;

    /// The constraint that decided the subnode's harmony, if any.
    fn decisive_constraint(&self, marks: &BTreeSet<Mark>) -> Result<Option<ConstraintName>> {
        let _ = marks;
        Ok(None)
    }

    /// Fails if any of `names` cannot be looked up.
    fn ensure_covers(&self, names: &[&str]) -> Result<()>;
}

/// The aggregation semantics chosen for one run.
#[derive(Debug, Clone)]
pub enum Stat {
    Hg(HgStat),
    Ot(OtStat),
}

impl Stat {
    /// Harmonic Grammar with the given weights.
    pub fn hg(weights: ConstraintWeights) -> Self {
        Stat::Hg(HgStat::new(weights))
    }

    /// Optimality Theory with the given ranking.
    pub fn ot(ranks: ConstraintRanks) -> Self {
        Stat::Ot(OtStat::new(ranks))
    }
}

impl HarmonyFunction for Stat {
    fn semantics(&self) -> &'static str {
        match self {
            Stat::Hg(f) => f.semantics(),
            Stat::Ot(f) => f.semantics(),
        }
    }

    fn subnode_harmony(&self, marks: &BTreeSet<Mark>) -> Result<Harmony> {
        match self {
            Stat::Hg(f) => f.subnode_harmony(marks),
            Stat::Ot(f) => f.subnode_harmony(marks),
        }
    }

    fn decisive_constraint(&self, marks: &BTreeSet<Mark>) -> Result<Option<ConstraintName>> {
        match self {
            Stat::Hg(f) => f.decisive_constraint(marks),
            Stat::Ot(f) => f.decisive_constraint(marks),
        }
    }

    fn ensure_covers(&self, names: &[&str]) -> Result<()> {
        match self {
            Stat::Hg(f) => f.ensure_covers(names),
            Stat::Ot(f) => f.ensure_covers(names),
        }
    }
}

impl<F: HarmonyFunction + ?Sized> HarmonyFunction for &F {
    fn semantics(&self) -> &'static str {
        (**self).semantics()
    }

    fn subnode_harmony(&self, marks: &BTreeSet<Mark>) -> Result<Harmony> {
        (**self).subnode_harmony(marks)
    }

    fn decisive_constraint(&self, marks: &BTreeSet<Mark>) -> Result<Option<ConstraintName>> {
        (**self).decisive_constraint(marks)
    }

    fn ensure_covers(&self, names: &[&str]) -> Result<()> {
        (**self).ensure_covers(names)
    }
}

/// Harmony of one element: the sum of its subnode harmonies.
pub fn element_harmony<F: HarmonyFunction + ?Sized>(marks: &SubnodeMarks, f: &F) -> Result<Harmony> {
    let mut total = Harmony::ZERO;
    for subnode_marks in marks.values() {
        total += f.subnode_harmony(subnode_marks)?;
    }
    Ok(total)
}

/// Computes total harmony and the ill-formed elements of a markup.
///
/// Fails on the first constraint the harmony function cannot look up, or
/// on an unresolvable OT rank tie; no partial result is returned.
pub fn stat<E, F>(markup: &Markup<E>, f: &F) -> Result<HarmonyResult<E>>
where
    E: CandidateElement,
    F: HarmonyFunction + ?Sized,
{
    let mut result = HarmonyResult::empty();
    for entry in markup {
        let harmony = element_harmony(&entry.marks, f)?;
        result.record(&entry.element, harmony);
    }

    debug!(
        event = "stat_done",
        semantics = f.semantics(),
        elements = markup.len(),
        ill_formed = result.ill_formed_count(),
        total_harmony = result.total.value(),
    );
    Ok(result)
}
