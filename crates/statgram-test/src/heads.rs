//! Headed parse trees.
//!
//! A daughter is the head of its mother when its label ends in `*`.
//! `ExactlyOneHead` requires every phrasal node (one with a non-terminal
//! daughter) to have exactly one head daughter; pre-terminals are exempt.

use statgram_core::{ParseTree, Result, TreeNode};

use crate::NodeConstraint;

/// Five parses of the terminal string `a b c`: two legal, three not.
pub const HEAD_TREES: [&str; 5] = [
    "(S (X* (A a) (B* b)) (C c))",
    "(S (A a) (Y* (B* b) (C c)))",
    "(S (X (A a) (B* b)) (C c))",
    "(S (A a) (Y* (B* b) (C* c)))",
    "(S (A a) (B b) (C c))",
];

/// Number of legal trees at the front of [`HEAD_TREES`].
pub const LEGAL_HEAD_TREES: usize = 2;

/// Returns true if the label marks a head daughter.
pub fn is_head(label: &str) -> bool {
    label.ends_with('*')
}

fn is_phrasal(node: &TreeNode<'_>) -> bool {
    node.children().any(|c| !c.is_leaf())
}

fn exactly_one_head_mark(node: &TreeNode<'_>) -> i8 {
    if !is_phrasal(node) {
        return 0;
    }
    let heads = node.children().filter(|c| is_head(c.label())).count();
    if heads == 1 {
        0
    } else {
        -1
    }
}

/// `-1` on every phrasal node without exactly one head daughter.
pub fn exactly_one_head() -> NodeConstraint {
    NodeConstraint::new("ExactlyOneHead", exactly_one_head_mark as fn(&TreeNode<'_>) -> i8)
}

/// Parses [`HEAD_TREES`].
pub fn head_trees() -> Result<Vec<ParseTree>> {
    HEAD_TREES.iter().map(|s| ParseTree::parse(s)).collect()
}
