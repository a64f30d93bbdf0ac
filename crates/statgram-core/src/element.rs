//! Candidate elements and the structures that contain them.
//!
//! A candidate structure (an acceptor or a parse tree) is decomposed into
//! elements, which are scored independently. Elements double as lookup keys
//! in a markup, so they must be `Eq + Hash`.

use std::collections::HashSet;
use std::hash::Hash;

/// The unit under evaluation: a transition or a tree node.
///
/// Exposes the local and bounded contextual features constraints read.
pub trait CandidateElement: Clone + Eq + Hash {
    /// The element's own label.
    fn label(&self) -> &str;

    /// Label of the adjacent context on the left (source state, left sibling).
    fn left_context(&self) -> Option<&str>;

    /// Label of the adjacent context on the right (destination state, right sibling).
    fn right_context(&self) -> Option<&str>;
}

/// A bare segment: its own label with no context.
impl CandidateElement for &str {
    #[inline]
    fn label(&self) -> &str {
        self
    }

    #[inline]
    fn left_context(&self) -> Option<&str> {
        None
    }

    #[inline]
    fn right_context(&self) -> Option<&str> {
        None
    }
}

/// A candidate structure whose elements can be enumerated and removed.
///
/// Pruning never mutates the structure in place: the ill-formed set is
/// computed first and a new structure is rebuilt without those elements.
pub trait CandidateStructure: Sized {
    /// Element view borrowed from the structure.
    type Element<'a>: CandidateElement
    where
        Self: 'a;

    /// Enumerates every element in a deterministic order.
    fn elements(&self) -> Vec<Self::Element<'_>>;

    /// Builds the structure left after removing the ill-formed elements.
    ///
    /// Pruning with an empty set returns a structure equal to `self`
    /// (modulo normalisation the structure performs on every prune).
    fn prune<'a>(&'a self, ill_formed: &HashSet<Self::Element<'a>>) -> Self;

    /// Returns true if the structure accepts or contains nothing.
    fn is_empty(&self) -> bool;
}
