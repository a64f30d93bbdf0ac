//! Grammar G0 in Harmonic Normal Form (Smolensky 1993).
//!
//! ```text
//! S -> A0 | A1 | F0
//! A0 -> B C    A1 -> D E    F0 -> B E
//! B -> b   C -> c   D -> d   E -> e
//! ```
//!
//! Every non-terminal is penalized for needing a mother and daughters, and
//! rewarded for each one the grammar licenses. With unit weights a node
//! licensed by a rule nets exactly zero.

use statgram_core::{ParseTree, Result, TreeNode};

use crate::NodeConstraint;

/// The root symbol.
pub const ROOT: &str = "S";

/// Non-terminals below the root.
pub const NON_TERMINALS: [&str; 7] = ["A0", "A1", "F0", "B", "C", "D", "E"];

/// `(mother, first daughter, second daughter)`.
pub const RULES: [(&str, &str, Option<&str>); 10] = [
    ("S", "A0", None),
    ("S", "A1", None),
    ("S", "F0", None),
    ("A0", "B", Some("C")),
    ("A1", "D", Some("E")),
    ("F0", "B", Some("E")),
    ("B", "b", None),
    ("C", "c", None),
    ("D", "d", None),
    ("E", "e", None),
];

/// Three legal trees followed by two that splice halves of different rules.
pub const G0_TREES: [&str; 5] = [
    "(S (A0 (B b) (C c)))",
    "(S (A1 (D d) (E e)))",
    "(S (F0 (B b) (E e)))",
    "(S (A0 (B b) (E e)))",
    "(S (A1 (D d) (C c)))",
];

/// Number of legal trees at the front of [`G0_TREES`].
pub const LEGAL_G0_TREES: usize = 3;

/// Names of the six G0 constraints, battery order.
pub const G0_CONSTRAINTS: [&str; 6] = [
    "need_parent",
    "need_daught0",
    "need_daught1",
    "good_parent",
    "good_daught0",
    "good_daught1",
];

fn is_non_terminal(label: &str) -> bool {
    NON_TERMINALS.contains(&label)
}

/// Binary-branching non-terminals carry a rule index.
fn is_binary(label: &str) -> bool {
    label.chars().any(|c| c.is_ascii_digit())
}

fn licensed_parent(child: &str, parent: &str) -> bool {
    RULES
        .iter()
        .any(|&(m, d0, d1)| m == parent && (d0 == child || d1 == Some(child)))
}

fn licensed_daughter(mother: &str, position: usize, daughter: &str) -> bool {
    RULES.iter().any(|&(m, d0, d1)| {
        m == mother
            && match position {
                0 => d0 == daughter,
                1 => d1 == Some(daughter),
                _ => false,
            }
    })
}

fn need_parent(node: &TreeNode<'_>) -> i8 {
    if is_non_terminal(node.label()) {
        -1
    } else {
        0
    }
}

fn need_daught0(node: &TreeNode<'_>) -> i8 {
    if is_non_terminal(node.label()) {
        -1
    } else {
        0
    }
}

fn need_daught1(node: &TreeNode<'_>) -> i8 {
    if is_non_terminal(node.label()) && is_binary(node.label()) {
        -1
    } else {
        0
    }
}

fn good_parent(node: &TreeNode<'_>) -> i8 {
    let label = node.label();
    match node.parent() {
        Some(p) if is_non_terminal(label) && licensed_parent(label, p.label()) => 1,
        _ => 0,
    }
}

fn good_daughter(node: &TreeNode<'_>, position: usize) -> i8 {
    let label = node.label();
    match node.child(position) {
        Some(d) if is_non_terminal(label) && licensed_daughter(label, position, d.label()) => 1,
        _ => 0,
    }
}

fn good_daught0(node: &TreeNode<'_>) -> i8 {
    good_daughter(node, 0)
}

fn good_daught1(node: &TreeNode<'_>) -> i8 {
    good_daughter(node, 1)
}

fn node_constraint(name: &str, judge: fn(&TreeNode<'_>) -> i8) -> NodeConstraint {
    NodeConstraint::new(name, judge)
}

/// The six G0 constraints: three penalties, three licensing rewards.
pub fn g0_battery() -> (
    NodeConstraint,
    NodeConstraint,
    NodeConstraint,
    NodeConstraint,
    NodeConstraint,
    NodeConstraint,
) {
    (
        node_constraint("need_parent", need_parent),
        node_constraint("need_daught0", need_daught0),
        node_constraint("need_daught1", need_daught1),
        node_constraint("good_parent", good_parent),
        node_constraint("good_daught0", good_daught0),
        node_constraint("good_daught1", good_daught1),
    )
}

/// Unit weights for every G0 constraint.
pub fn g0_unit_weights() -> Vec<(&'static str, f64)> {
    G0_CONSTRAINTS.iter().map(|&name| (name, 1.0)).collect()
}

/// Parses [`G0_TREES`].
pub fn g0_trees() -> Result<Vec<ParseTree>> {
    G0_TREES.iter().map(|s| ParseTree::parse(s)).collect()
}
