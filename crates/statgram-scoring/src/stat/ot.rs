//! Optimality Theory: strict domination by the highest-ranked mark.

use std::collections::BTreeSet;

use tracing::trace;

use statgram_core::{ConstraintName, Harmony, Mark, Result, StatgramError};

use super::HarmonyFunction;
use crate::api::ranks::ConstraintRanks;

/// Static OT harmony function.
///
/// Only the highest-ranked mark on a subnode matters: a violation there makes
/// the subnode ill-formed with the fixed penalty [`Harmony::PENALTY`], however
/// many lower-ranked constraints agree or disagree.
///
/// Constraints sharing the top rank on one subnode are resolved only when
/// their marks agree in polarity; disagreeing ties fail with
/// [`StatgramError::RankTie`]. An agreeing tie has no decisive constraint.
#[derive(Debug, Clone)]
pub struct OtStat {
    ranks: ConstraintRanks,
}

impl OtStat {
    pub fn new(ranks: ConstraintRanks) -> Self {
        Self { ranks }
    }

    pub fn ranks(&self) -> &ConstraintRanks {
        &self.ranks
    }

    /// The marks carrying the highest rank present, with that rank.
    fn top_marks<'m>(&self, marks: &'m BTreeSet<Mark>) -> Result<Option<(u32, Vec<&'m Mark>)>> {
        let mut top: Option<(u32, Vec<&Mark>)> = None;
        for mark in marks {
            let rank = self.ranks.rank(&mark.constraint)?;
            let best = top.as_ref().map(|(r, _)| *r);
            match best {
                Some(r) if rank < r => {}
                Some(r) if rank == r => {
                    if let Some((_, group)) = top.as_mut() {
                        group.push(mark);
                    }
                }
                _ => top = Some((rank, vec![mark])),
            }
        }
        Ok(top)
    }

    /// The mark that decides the subnode, and whether a single constraint
    /// carries it. An agreeing tie decides the outcome but names no one
    /// constraint.
    fn decide<'m>(&self, marks: &'m BTreeSet<Mark>) -> Result<Option<(&'m Mark, bool)>> {
        let Some((rank, group)) = self.top_marks(marks)? else {
            return Ok(None);
        };
        let first = group[0];
        let mut constraints: Vec<String> = group.iter().map(|m| m.constraint.to_string()).collect();
        constraints.sort_unstable();
        constraints.dedup();
        if constraints.len() == 1 {
            return Ok(Some((first, true)));
        }

        let disagree = group
            .iter()
            .any(|m| m.is_violation() != first.is_violation());
        if disagree {
            return Err(StatgramError::RankTie { rank, constraints });
        }
        trace!(event = "rank_tie_agrees", rank, constraints = ?constraints);
        Ok(Some((first, false)))
    }
}

impl HarmonyFunction for OtStat {
    fn semantics(&self) -> &'static str {
        "OT"
    }

    fn subnode_harmony(&self, marks: &BTreeSet<Mark>) -> Result<Harmony> {
        Ok(match self.decide(marks)?.map(|(mark, _)| mark) {
            Some(mark) if mark.is_violation() => Harmony::PENALTY,
            _ => Harmony::ZERO,
        })
    }

    fn decisive_constraint(&self, marks: &BTreeSet<Mark>) -> Result<Option<ConstraintName>> {
        Ok(match self.decide(marks)? {
            Some((mark, true)) => Some(mark.constraint.clone()),
            _ => None,
        })
    }

    fn ensure_covers(&self, names: &[&str]) -> Result<()> {
        self.ranks.ensure_covers(names.iter().copied())
    }
}
