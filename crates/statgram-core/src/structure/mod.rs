//! Reference candidate structures.
//!
//! The generator that builds candidates is external; these are the two
//! shapes it produces: an acceptor whose transitions are scored, and a
//! parse tree whose non-terminal nodes are scored.

mod fst;
mod tree;

#[cfg(test)]
mod tests;

pub use fst::{Fst, State, Transition};
pub use tree::{NodeId, ParseTree, TreeNode};
