//! Harmony analysis types for per-element explanation.
//!
//! This module breaks a harmony result down by element and subnode, so a
//! caller can report which constraints made an element ill-formed, and
//! tallies each constraint's marks across the whole markup.

use std::collections::BTreeMap;
use std::fmt;

use statgram_core::{CandidateElement, ConstraintName, Harmony, Mark, Result, Subnode};

use crate::eval::Markup;
use crate::stat::HarmonyFunction;

/// Breakdown of one subnode of an element.
#[derive(Debug, Clone, PartialEq)]
pub struct SubnodeAnalysis {
    /// The subnode.
    pub subnode: Subnode,
    /// Marks on the subnode, in mark order.
    pub marks: Vec<Mark>,
    /// Harmony of the subnode.
    pub harmony: Harmony,
    /// Constraint that decided the harmony: the top-ranked mark under OT,
    /// the heaviest violation of a penalized subnode under HG. `None` when
    /// tied top-ranked constraints decide together.
    pub decisive: Option<ConstraintName>,
}

impl SubnodeAnalysis {
    /// Returns true if the subnode was penalized.
    pub fn is_ill_formed(&self) -> bool {
        !self.harmony.is_well_formed()
    }
}

/// Breakdown of one evaluated element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementAnalysis<E> {
    /// The element.
    pub element: E,
    /// Sum of the subnode harmonies.
    pub harmony: Harmony,
    /// Per-subnode breakdown, in subnode order.
    pub subnodes: Vec<SubnodeAnalysis>,
}

impl<E> ElementAnalysis<E> {
    /// Returns true if the element's harmony is strictly negative.
    pub fn is_ill_formed(&self) -> bool {
        !self.harmony.is_well_formed()
    }

    /// Returns the number of marks across subnodes.
    pub fn mark_count(&self) -> usize {
        self.subnodes.iter().map(|s| s.marks.len()).sum()
    }

    /// Returns the penalized subnodes.
    pub fn ill_formed_subnodes(&self) -> impl Iterator<Item = &SubnodeAnalysis> {
        self.subnodes.iter().filter(|s| s.is_ill_formed())
    }
}

/// One constraint's marks across a markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintTally {
    /// Number of negative marks.
    pub violations: usize,
    /// Number of positive marks.
    pub satisfactions: usize,
    /// Number of penalized subnodes this constraint decided.
    pub decisive: usize,
}

/// Complete harmony explanation with per-element and per-constraint breakdowns.
#[derive(Debug, Clone)]
pub struct HarmonyExplanation<E> {
    /// Name of the aggregation semantics ("HG" or "OT").
    pub semantics: &'static str,
    /// The total harmony.
    pub total: Harmony,
    /// Per-element breakdown, in evaluation order.
    pub elements: Vec<ElementAnalysis<E>>,
    /// Per-constraint tallies keyed by constraint name.
    pub tallies: BTreeMap<ConstraintName, ConstraintTally>,
}

impl<E> HarmonyExplanation<E> {
    /// Returns the ill-formed elements' analyses.
    pub fn ill_formed(&self) -> impl Iterator<Item = &ElementAnalysis<E>> {
        self.elements.iter().filter(|e| e.is_ill_formed())
    }

    /// Returns the number of ill-formed elements.
    pub fn ill_formed_count(&self) -> usize {
        self.ill_formed().count()
    }

    /// Returns the tally of one constraint.
    pub fn tally(&self, constraint: &str) -> Option<&ConstraintTally> {
        self.tallies.get(constraint)
    }

    /// Returns constraints sorted by violation count, most violated first.
    pub fn most_violated(&self) -> Vec<(&str, usize)> {
        let mut counts: Vec<(&str, usize)> = self
            .tallies
            .iter()
            .filter(|(_, t)| t.violations > 0)
            .map(|(name, t)| (&**name, t.violations))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        counts
    }
}

impl<E: fmt::Display> fmt::Display for HarmonyExplanation<E> {
    /// Lists every ill-formed element with the marks on its penalized subnodes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} harmony {} ({} of {} elements ill-formed)",
            self.semantics,
            self.total,
            self.ill_formed_count(),
            self.elements.len()
        )?;
        for analysis in self.ill_formed() {
            writeln!(f, "  {} : {}", analysis.element, analysis.harmony)?;
            for sub in analysis.ill_formed_subnodes() {
                let marks = sub
                    .marks
                    .iter()
                    .map(|m| format!("{}{:+}", m.constraint, m.value))
                    .collect::<Vec<_>>()
                    .join(" ");
                writeln!(f, "    [{}] {} -> {}", sub.subnode, marks, sub.harmony)?;
            }
        }
        Ok(())
    }
}

/// Explains the harmony of every element in a markup.
///
/// The totals agree with [`crate::stat::stat`] on the same input.
pub fn explain<E, F>(markup: &Markup<E>, f: &F) -> Result<HarmonyExplanation<E>>
where
    E: CandidateElement,
    F: HarmonyFunction + ?Sized,
{
    let mut total = Harmony::ZERO;
    let mut elements = Vec::with_capacity(markup.len());
    let mut tallies: BTreeMap<ConstraintName, ConstraintTally> = BTreeMap::new();

    for entry in markup {
        let mut harmony = Harmony::ZERO;
        let mut subnodes = Vec::with_capacity(entry.marks.len());
        for (subnode, marks) in &entry.marks {
            let sub_harmony = f.subnode_harmony(marks)?;
            let decisive = f.decisive_constraint(marks)?;

            for mark in marks {
                let tally = tallies.entry(mark.constraint.clone()).or_default();
                if mark.is_violation() {
                    tally.violations += 1;
                } else {
                    tally.satisfactions += 1;
                }
            }
            if let Some(name) = decisive.as_ref().filter(|_| !sub_harmony.is_well_formed()) {
                tallies.entry(name.clone()).or_default().decisive += 1;
            }

            harmony += sub_harmony;
            subnodes.push(SubnodeAnalysis {
                subnode: subnode.clone(),
                marks: marks.iter().cloned().collect(),
                harmony: sub_harmony,
                decisive,
            });
        }
        if !harmony.is_well_formed() {
            total += harmony;
        }
        elements.push(ElementAnalysis {
            element: entry.element.clone(),
            harmony,
            subnodes,
        });
    }

    Ok(HarmonyExplanation {
        semantics: f.semantics(),
        total,
        elements,
        tallies,
    })
}
