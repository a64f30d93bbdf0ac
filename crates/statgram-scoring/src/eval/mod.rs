//! The evaluator: applies a constraint battery to candidate elements.
//!
//! Logging levels:
//! - **DEBUG**: One summary event per evaluation run
//! - **TRACE**: Marks assigned to each element

mod markup;

#[cfg(test)]
mod tests;

use std::collections::BTreeSet;

use rayon::prelude::*;
use tracing::{debug, trace};

use statgram_core::CandidateElement;

use crate::api::constraint_set::ConstraintSet;

pub use markup::{MarkedElement, Markup, SubnodeMarks};

/// Decides which elements are excluded from scoring.
pub trait IgnorePredicate<E: ?Sized>: Send + Sync {
    fn ignores(&self, element: &E) -> bool;
}

/// Scores every element.
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreNothing;

impl<E: ?Sized> IgnorePredicate<E> for IgnoreNothing {
    #[inline]
    fn ignores(&self, _element: &E) -> bool {
        false
    }
}

/// Skips elements whose label is one of a fixed set, e.g. string delimiters.
///
/// An empty set ignores nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreLabels {
    labels: BTreeSet<String>,
}

impl IgnoreLabels {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl<E: CandidateElement> IgnorePredicate<E> for IgnoreLabels {
    #[inline]
    fn ignores(&self, element: &E) -> bool {
        self.labels.contains(element.label())
    }
}

impl<E: ?Sized, F> IgnorePredicate<E> for F
where
    F: Fn(&E) -> bool + Send + Sync,
{
    #[inline]
    fn ignores(&self, element: &E) -> bool {
        self(element)
    }
}

/// Applies a constraint battery to every non-ignored element.
///
/// Constraints are independent and side-effect free, so the evaluator makes
/// no promise about the order they are applied in, only about the set of
/// marks each element receives.
///
/// # Example
///
/// ```
/// use statgram_core::{constraint, Transition};
/// use statgram_scoring::Evaluator;
///
/// let no_b = constraint("NoB", |t: &Transition| if &*t.label == "b" { -1 } else { 0 });
/// let battery = (no_b,);
///
/// let ts = [Transition::new(0, ">", 1), Transition::new(1, "a", 1), Transition::new(1, "b", 1)];
/// let markup = Evaluator::new(&battery)
///     .ignoring(|t: &Transition| &*t.label == ">")
///     .eval(ts);
///
/// assert_eq!(markup.len(), 2);
/// assert_eq!(markup.ignored_count(), 1);
/// assert_eq!(markup.mark_count(), 1);
/// ```
pub struct Evaluator<'c, C: ?Sized, P = IgnoreNothing> {
    constraints: &'c C,
    ignore: P,
}

impl<'c, C: ?Sized> Evaluator<'c, C, IgnoreNothing> {
    /// Creates an evaluator that scores every element.
    pub fn new(constraints: &'c C) -> Self {
        Self {
            constraints,
            ignore: IgnoreNothing,
        }
    }
}

impl<'c, C: ?Sized, P> Evaluator<'c, C, P> {
    /// Excludes elements matching `predicate` (e.g. boundary delimiters).
    pub fn ignoring<Q>(self, predicate: Q) -> Evaluator<'c, C, Q> {
        Evaluator {
            constraints: self.constraints,
            ignore: predicate,
        }
    }

    /// Returns the battery.
    pub fn constraints(&self) -> &'c C {
        self.constraints
    }

    /// Marks one element.
    pub fn mark<E>(&self, element: E) -> MarkedElement<E>
    where
        E: CandidateElement,
        C: ConstraintSet<E>,
    {
        let mut marks = Vec::new();
        self.constraints.for_each_mark(&element, |m| marks.push(m));
        let mut entry = MarkedElement::new(element);
        for m in marks {
            entry.add(m);
        }
        entry
    }

    /// Evaluates elements sequentially, in iteration order.
    pub fn eval<E, I>(&self, elements: I) -> Markup<E>
    where
        E: CandidateElement,
        I: IntoIterator<Item = E>,
        C: ConstraintSet<E>,
        P: IgnorePredicate<E>,
    {
        let mut markup = Markup::new();
        let mut ignored = 0;
        for element in elements {
            if self.ignore.ignores(&element) {
                ignored += 1;
                continue;
            }
            let entry = self.mark(element);
            trace!(
                event = "element_marked",
                label = entry.element.label(),
                marks = entry.mark_count(),
            );
            markup.insert(entry);
        }
        markup.record_ignored(ignored);
        log_markup(&markup, false);
        markup
    }

    /// Evaluates elements across the rayon thread pool.
    ///
    /// Each element's entry depends only on the element and its bounded
    /// context, so the result equals [`Evaluator::eval`] on the same input.
    pub fn par_eval<E>(&self, elements: Vec<E>) -> Markup<E>
    where
        E: CandidateElement + Send + Sync,
        C: ConstraintSet<E> + Sync,
        P: IgnorePredicate<E>,
    {
        let entries: Vec<Option<MarkedElement<E>>> = elements
            .into_par_iter()
            .map(|element| {
                if self.ignore.ignores(&element) {
                    None
                } else {
                    Some(self.mark(element))
                }
            })
            .collect();

        let ignored = entries.iter().filter(|e| e.is_none()).count();
        let mut markup: Markup<E> = entries.into_iter().flatten().collect();
        markup.record_ignored(ignored);
        log_markup(&markup, true);
        markup
    }
}

fn log_markup<E: CandidateElement>(markup: &Markup<E>, parallel: bool) {
    debug!(
        event = "eval_done",
        parallel,
        elements = markup.len(),
        marked = markup.marked_count(),
        ignored = markup.ignored_count(),
        marks = markup.mark_count(),
    );
}
