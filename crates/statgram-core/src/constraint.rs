//! Violable constraints.
//!
//! A constraint is a pure function from a candidate element to a [`Mark`].
//! It must not mutate the candidate structure and returns a zero mark when
//! it does not apply.

use std::fmt;

use crate::mark::{ConstraintName, Mark, Subnode};

/// A named, pure mark assigner over elements of type `E`.
pub trait Constraint<E: ?Sized>: Send + Sync {
    /// Name used to look up the constraint's weight or rank.
    fn name(&self) -> &str;

    /// Judges one element.
    fn mark(&self, element: &E) -> Mark;
}

impl<E: ?Sized, C: Constraint<E> + ?Sized> Constraint<E> for Box<C> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn mark(&self, element: &E) -> Mark {
        (**self).mark(element)
    }
}

/// A constraint backed by a closure returning the mark value.
///
/// Every mark it produces is attributed to one fixed subnode.
///
/// # Example
///
/// ```
/// use statgram_core::{Constraint, FnConstraint, Subnode};
///
/// let no_mid = FnConstraint::new("NoMid", |x: &&str| match *x {
///     "i" | "u" => 1,
///     "e" | "o" => -1,
///     _ => 0,
/// })
/// .on_subnode("high");
///
/// let mark = no_mid.mark(&"e");
/// assert_eq!(mark.value, -1);
/// assert_eq!(mark.subnode, Subnode::named("high"));
/// ```
#[derive(Clone)]
pub struct FnConstraint<F> {
    name: ConstraintName,
    subnode: Subnode,
    judge: F,
}

impl<F> FnConstraint<F> {
    /// Creates a constraint that marks the root subnode.
    pub fn new<E: ?Sized>(name: impl Into<ConstraintName>, judge: F) -> Self
    where
        F: Fn(&E) -> i8 + Send + Sync,
    {
        Self {
            name: name.into(),
            subnode: Subnode::Root,
            judge,
        }
    }

    /// Attributes this constraint's marks to a named subnode.
    pub fn on_subnode(mut self, subnode: impl Into<Subnode>) -> Self {
        self.subnode = subnode.into();
        self
    }

    /// Returns the subnode marks are attributed to.
    pub fn subnode(&self) -> &Subnode {
        &self.subnode
    }
}

impl<E: ?Sized, F> Constraint<E> for FnConstraint<F>
where
    F: Fn(&E) -> i8 + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    fn mark(&self, element: &E) -> Mark {
        Mark {
            constraint: self.name.clone(),
            value: (self.judge)(element),
            subnode: self.subnode.clone(),
        }
    }
}

impl<F> fmt::Debug for FnConstraint<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnConstraint")
            .field("name", &self.name)
            .field("subnode", &self.subnode)
            .finish()
    }
}

/// Shorthand for [`FnConstraint::new`].
pub fn constraint<E: ?Sized, F>(name: impl Into<ConstraintName>, judge: F) -> FnConstraint<F>
where
    F: Fn(&E) -> i8 + Send + Sync,
{
    FnConstraint::new(name, judge)
}
