//! Parse trees as candidate structures.
//!
//! Nodes live in an arena in pre-order, so two trees with the same bracket
//! notation compare equal. Leaves are terminal symbols; the scored elements
//! are the non-leaf nodes ([`ParseTree::subtrees`]).

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ptr;

use smallvec::SmallVec;

use crate::element::{CandidateElement, CandidateStructure};
use crate::error::{Result, StatgramError};

/// Index of a node within its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct NodeData {
    label: String,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 2]>,
}

/// An ordered, labelled tree.
///
/// # Example
///
/// ```
/// use statgram_core::ParseTree;
///
/// let tree = ParseTree::parse("(S (A0 (B b) (C c)))").unwrap();
/// let labels: Vec<_> = tree.subtrees().iter().map(|n| n.label().to_string()).collect();
/// assert_eq!(labels, ["S", "A0", "B", "C"]);
/// assert_eq!(tree.leaves(), ["b", "c"]);
/// assert_eq!(tree.to_string(), "(S (A0 (B b) (C c)))");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseTree {
    nodes: Vec<NodeData>,
}

impl ParseTree {
    /// A single leaf.
    pub fn leaf(label: impl Into<String>) -> Self {
        Self {
            nodes: vec![NodeData {
                label: label.into(),
                parent: None,
                children: SmallVec::new(),
            }],
        }
    }

    /// A node over the given subtrees. Empty subtrees are skipped.
    pub fn node(label: impl Into<String>, children: impl IntoIterator<Item = ParseTree>) -> Self {
        let mut tree = Self::leaf(label);
        for child in children {
            if child.is_empty() {
                continue;
            }
            let offset = tree.nodes.len();
            tree.nodes[0].children.push(NodeId(offset));
            for (i, mut data) in child.nodes.into_iter().enumerate() {
                data.parent = match data.parent {
                    Some(p) => Some(NodeId(p.0 + offset)),
                    None if i == 0 => Some(NodeId(0)),
                    None => None,
                };
                for c in data.children.iter_mut() {
                    c.0 += offset;
                }
                tree.nodes.push(data);
            }
        }
        tree
    }

    /// Reads bracket notation, e.g. `(S (A1 (D d) (E e)))`.
    ///
    /// Bare atoms are leaves; double quotes around an atom are stripped.
    pub fn parse(input: &str) -> Result<Self> {
        let tokens = tokenize(input);
        let mut pos = 0;
        let tree = parse_tree(&tokens, &mut pos)?;
        if pos != tokens.len() {
            return Err(StatgramError::Parse(format!(
                "trailing input after tree at token {}",
                pos
            )));
        }
        Ok(tree)
    }

    /// The root node, or `None` for an empty tree.
    pub fn root(&self) -> Option<TreeNode<'_>> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(TreeNode { tree: self, id: NodeId(0) })
        }
    }

    /// Looks up a node by id.
    pub fn get(&self, id: NodeId) -> Option<TreeNode<'_>> {
        (id.0 < self.nodes.len()).then_some(TreeNode { tree: self, id })
    }

    /// Number of nodes, leaves included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Non-leaf nodes in pre-order.
    pub fn subtrees(&self) -> Vec<TreeNode<'_>> {
        (0..self.nodes.len())
            .map(|i| TreeNode { tree: self, id: NodeId(i) })
            .filter(|n| !n.is_leaf())
            .collect()
    }

    /// Leaf labels from left to right.
    pub fn leaves(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|n| n.children.is_empty())
            .map(|n| n.label.as_str())
            .collect()
    }

    /// Rebuilds the tree without the subtrees rooted at `removed`.
    ///
    /// A non-terminal left with no daughters is dropped as well, so pruning
    /// never turns a phrase into a leaf.
    pub fn without_subtrees(&self, removed: &HashSet<NodeId>) -> ParseTree {
        match self.root() {
            Some(root) => rebuild(root, removed),
            None => ParseTree::default(),
        }
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }
}

fn rebuild(node: TreeNode<'_>, removed: &HashSet<NodeId>) -> ParseTree {
    if removed.contains(&node.id) {
        return ParseTree::default();
    }
    if node.is_leaf() {
        return ParseTree::leaf(node.label());
    }
    let daughters: Vec<ParseTree> = node
        .children()
        .map(|c| rebuild(c, removed))
        .filter(|t| !t.is_empty())
        .collect();
    if daughters.is_empty() {
        return ParseTree::default();
    }
    ParseTree::node(node.label(), daughters)
}

fn tokenize(input: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = None;
    for (i, ch) in input.char_indices() {
        if ch == '(' || ch == ')' || ch.is_whitespace() {
            if let Some(s) = start.take() {
                tokens.push(&input[s..i]);
            }
            if !ch.is_whitespace() {
                tokens.push(&input[i..i + 1]);
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        tokens.push(&input[s..]);
    }
    tokens
}

fn parse_tree(tokens: &[&str], pos: &mut usize) -> Result<ParseTree> {
    match tokens.get(*pos) {
        Some(&"(") => {}
        Some(tok) => {
            return Err(StatgramError::Parse(format!(
                "expected '(' but found '{}'",
                tok
            )))
        }
        None => return Err(StatgramError::Parse("empty tree".to_string())),
    }
    *pos += 1;

    let label = match tokens.get(*pos) {
        Some(&"(") | Some(&")") | None => {
            return Err(StatgramError::Parse(format!(
                "missing node label at token {}",
                *pos
            )))
        }
        Some(tok) => unquote(tok),
    };
    *pos += 1;

    let mut children = Vec::new();
    loop {
        match tokens.get(*pos) {
            Some(&")") => {
                *pos += 1;
                return Ok(ParseTree::node(label, children));
            }
            Some(&"(") => children.push(parse_tree(tokens, pos)?),
            Some(tok) => {
                children.push(ParseTree::leaf(unquote(tok)));
                *pos += 1;
            }
            None => {
                return Err(StatgramError::Parse(format!(
                    "unbalanced parentheses in node '{}'",
                    label
                )))
            }
        }
    }
}

fn unquote(token: &str) -> &str {
    token
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(token)
}

impl fmt::Display for ParseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root() {
            Some(root) => write!(f, "{}", root),
            None => f.write_str("()"),
        }
    }
}

impl CandidateStructure for ParseTree {
    type Element<'a> = TreeNode<'a>;

    fn elements(&self) -> Vec<TreeNode<'_>> {
        self.subtrees()
    }

    /// Removes the subtrees rooted at ill-formed nodes.
    fn prune<'a>(&'a self, ill_formed: &HashSet<TreeNode<'a>>) -> ParseTree {
        let removed: HashSet<NodeId> = ill_formed
            .iter()
            .filter(|n| ptr::eq(n.tree, self))
            .map(|n| n.id)
            .collect();
        self.without_subtrees(&removed)
    }

    fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A borrowed view of one node with navigation to its neighbours.
#[derive(Clone, Copy)]
pub struct TreeNode<'t> {
    tree: &'t ParseTree,
    id: NodeId,
}

impl<'t> TreeNode<'t> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'t ParseTree {
        self.tree
    }

    pub fn label(&self) -> &'t str {
        &self.tree.data(self.id).label
    }

    pub fn parent(&self) -> Option<TreeNode<'t>> {
        self.tree
            .data(self.id)
            .parent
            .map(|id| TreeNode { tree: self.tree, id })
    }

    pub fn children(&self) -> impl Iterator<Item = TreeNode<'t>> + 't {
        let tree = self.tree;
        tree.data(self.id)
            .children
            .iter()
            .map(move |&id| TreeNode { tree, id })
    }

    /// The `i`-th daughter.
    pub fn child(&self, i: usize) -> Option<TreeNode<'t>> {
        self.tree
            .data(self.id)
            .children
            .get(i)
            .map(|&id| TreeNode { tree: self.tree, id })
    }

    /// Number of daughters.
    pub fn len(&self) -> usize {
        self.tree.data(self.id).children.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.len() == 0
    }

    /// Index among the parent's daughters; `None` for the root.
    pub fn position(&self) -> Option<usize> {
        let parent = self.tree.data(self.id).parent?;
        self.tree
            .data(parent)
            .children
            .iter()
            .position(|&c| c == self.id)
    }

    pub fn left_sibling(&self) -> Option<TreeNode<'t>> {
        let i = self.position()?;
        self.parent()?.child(i.checked_sub(1)?)
    }

    pub fn right_sibling(&self) -> Option<TreeNode<'t>> {
        let i = self.position()?;
        self.parent()?.child(i + 1)
    }

    /// Iterates over the siblings to the left, nearest first.
    pub fn left_siblings(&self) -> impl Iterator<Item = TreeNode<'t>> {
        std::iter::successors(self.left_sibling(), |n| n.left_sibling())
    }

    /// Iterates over the siblings to the right, nearest first.
    pub fn right_siblings(&self) -> impl Iterator<Item = TreeNode<'t>> {
        std::iter::successors(self.right_sibling(), |n| n.right_sibling())
    }
}

impl PartialEq for TreeNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for TreeNode<'_> {}

impl Hash for TreeNode<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        ptr::hash(self.tree, state);
        self.id.hash(state);
    }
}

impl fmt::Debug for TreeNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeNode")
            .field("id", &self.id.0)
            .field("label", &self.label())
            .finish()
    }
}

impl fmt::Display for TreeNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_leaf() {
            return f.write_str(self.label());
        }
        write!(f, "({}", self.label())?;
        for child in self.children() {
            write!(f, " {}", child)?;
        }
        f.write_str(")")
    }
}

impl CandidateElement for TreeNode<'_> {
    #[inline]
    fn label(&self) -> &str {
        TreeNode::label(self)
    }

    fn left_context(&self) -> Option<&str> {
        self.left_sibling().map(|n| n.label())
    }

    fn right_context(&self) -> Option<&str> {
        self.right_sibling().map(|n| n.label())
    }
}
