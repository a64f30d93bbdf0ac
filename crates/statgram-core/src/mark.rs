//! Marks assigned by constraints to candidate elements.
//!
//! A [`Mark`] records one constraint's signed judgment on one element:
//! `+1` for satisfaction, `-1` for violation. A constraint that does not
//! apply to an element returns a zero mark, which the evaluator drops.

use std::fmt;
use std::sync::Arc;

/// Shared constraint identifier.
///
/// Marks are produced for every element of every candidate, so the name is
/// reference counted rather than copied.
pub type ConstraintName = Arc<str>;

/// Grouping within an element over which marks are aggregated independently.
///
/// # Example
///
/// ```
/// use statgram_core::Subnode;
///
/// assert_eq!(Subnode::default(), Subnode::Root);
/// assert_eq!(Subnode::named("high").to_string(), "high");
/// assert_eq!(Subnode::Root.to_string(), "•");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Subnode {
    /// The implicit single grouping of an element.
    #[default]
    Root,
    /// A named feature grouping, e.g. `"nasal"` or `"high"`.
    Named(Arc<str>),
}

impl Subnode {
    /// Creates a named subnode.
    pub fn named(name: impl Into<Arc<str>>) -> Self {
        Subnode::Named(name.into())
    }

    /// Returns the subnode name; the root is rendered as `•`.
    pub fn as_str(&self) -> &str {
        match self {
            Subnode::Root => "•",
            Subnode::Named(name) => name,
        }
    }
}

impl fmt::Display for Subnode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Subnode {
    fn from(name: &str) -> Self {
        if name == "•" {
            Subnode::Root
        } else {
            Subnode::named(name)
        }
    }
}

/// A single constraint's signed judgment on one element.
///
/// # Example
///
/// ```
/// use statgram_core::{Mark, Subnode};
///
/// let mark = Mark::violation("NoB");
/// assert_eq!(mark.value, -1);
/// assert_eq!(mark.subnode, Subnode::Root);
///
/// let high = Mark::satisfaction("Lower").at("high");
/// assert_eq!(high.subnode, Subnode::named("high"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Mark {
    /// Name of the constraint that assigned the mark.
    pub constraint: ConstraintName,
    /// Signed value, `-1`, `0` or `+1` in every observed battery.
    pub value: i8,
    /// Grouping within the element the mark applies to.
    pub subnode: Subnode,
}

impl Mark {
    /// Creates a mark on the root subnode.
    pub fn new(constraint: impl Into<ConstraintName>, value: i8) -> Self {
        Self {
            constraint: constraint.into(),
            value,
            subnode: Subnode::Root,
        }
    }

    /// A `-1` mark.
    pub fn violation(constraint: impl Into<ConstraintName>) -> Self {
        Self::new(constraint, -1)
    }

    /// A `+1` mark.
    pub fn satisfaction(constraint: impl Into<ConstraintName>) -> Self {
        Self::new(constraint, 1)
    }

    /// A zero mark: the constraint does not apply.
    pub fn none(constraint: impl Into<ConstraintName>) -> Self {
        Self::new(constraint, 0)
    }

    /// Moves the mark to the given subnode.
    pub fn at(mut self, subnode: impl Into<Subnode>) -> Self {
        self.subnode = subnode.into();
        self
    }

    /// Returns true if the constraint did not apply.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.value == 0
    }

    /// Returns true for negative marks.
    #[inline]
    pub fn is_violation(&self) -> bool {
        self.value < 0
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:+}@{}", self.constraint, self.value, self.subnode)
    }
}
