//! Tests for the reference candidate structures.

use std::collections::HashSet;

use super::*;
use crate::alphabet::Alphabet;
use crate::element::{CandidateElement, CandidateStructure};

fn ab_acceptor() -> Fst {
    let mut m = Fst::new(0);
    m.add_final(1);
    m.add_transition(0, ">", 1);
    m.add_transition(1, "a", 1);
    m.add_transition(1, "b", 1);
    m
}

// ============================================================================
// Fst tests
// ============================================================================

#[test]
fn test_fst_counts() {
    let m = ab_acceptor();
    assert_eq!(m.num_states(), 2);
    assert_eq!(m.num_transitions(), 3);
    assert!(m.is_final(&State::from(1)));
    assert!(!m.is_final(m.start()));
}

#[test]
fn test_transition_context() {
    let t = Transition::new("p", "a", "a");
    assert_eq!(t.label(), "a");
    assert_eq!(t.left_context(), Some("p"));
    assert_eq!(t.right_context(), Some("a"));
}

#[test]
fn test_accepted_strings_bounded() {
    let strings = ab_acceptor().accepted_strings(2);
    let expected: Vec<&str> = vec![">", "> a", "> b"];
    assert_eq!(strings.iter().map(String::as_str).collect::<Vec<_>>(), expected);
}

#[test]
fn test_trim_removes_stranded_states() {
    let mut m = ab_acceptor();
    m.add_transition(1, "c", 2); // 2 cannot reach a final state
    m.add_transition(3, "d", 1); // 3 is unreachable
    assert_eq!(m.num_states(), 4);

    let trimmed = m.trim();
    assert_eq!(trimmed, ab_acceptor());
}

#[test]
fn test_trim_empty_language() {
    let m = ab_acceptor();
    let gone = m.without_transitions([&Transition::new(0, ">", 1)]).trim();
    assert_eq!(gone.num_transitions(), 0);
    assert_eq!(gone.num_states(), 1);
    assert!(gone.accepts_nothing());
    assert!(CandidateStructure::is_empty(&gone));
    assert!(gone.accepted_strings(5).is_empty());
}

#[test]
fn test_prune_deletes_then_trims() {
    let mut m = Fst::new(0);
    m.add_final(2);
    m.add_transition(0, "a", 1);
    m.add_transition(1, "b", 2);
    m.add_transition(0, "c", 2);

    assert_eq!(m.elements().len(), 3);
    let ill = HashSet::from([Transition::new(0, "a", 1)]);
    let pruned = m.prune(&ill);

    assert_eq!(pruned.num_transitions(), 1);
    assert_eq!(pruned.num_states(), 2);
    assert_eq!(pruned.accepted_strings(3).into_iter().collect::<Vec<_>>(), ["c"]);
}

#[test]
fn test_prune_with_nothing_is_idempotent() {
    let m = ab_acceptor();
    let once = m.prune(&HashSet::new());
    let twice = once.prune(&HashSet::new());
    assert_eq!(once, m);
    assert_eq!(twice, once);
}

#[test]
fn test_left_context_acceptor() {
    let sigma = Alphabet::new(["a", "b"]);
    let m = Fst::left_context_acceptor(&sigma, 1);

    // start, ">", "a", "b", "<"
    assert_eq!(m.num_states(), 5);
    // start->">", eos from 3 contexts, 2 symbols from 3 contexts
    assert_eq!(m.num_transitions(), 1 + 3 + 6);

    let strings = m.accepted_strings(4);
    assert!(strings.contains("> <"));
    assert!(strings.contains("> a b <"));
    assert!(!strings.contains("> a b"));

    let ab = Transition::new("a", "b", "b");
    assert!(m.contains_transition(&ab));
}

#[test]
fn test_left_context_acceptor_window_two() {
    let sigma = Alphabet::new(["a"]);
    let m = Fst::left_context_acceptor(&sigma, 2);
    assert!(m.contains_transition(&Transition::new(">", "a", "> a")));
    assert!(m.contains_transition(&Transition::new("> a", "a", "a a")));
    assert!(m.contains_transition(&Transition::new("a a", "a", "a a")));
    assert_eq!(State::new("> a").last_symbol(), Some("a"));
    assert_eq!(State::new("> a").first_symbol(), Some(">"));
}

// ============================================================================
// ParseTree tests
// ============================================================================

#[test]
fn test_parse_and_display_round_trip() {
    let text = "(S (A1 (D d) (E e)))";
    let tree = ParseTree::parse(text).unwrap();
    assert_eq!(tree.to_string(), text);
    assert_eq!(tree.len(), 6);
}

#[test]
fn test_parse_strips_quotes() {
    let tree = ParseTree::parse(r#"(Syll (s0 "σ"))"#).unwrap();
    assert_eq!(tree.leaves(), ["σ"]);
}

#[test]
fn test_parse_errors() {
    assert!(ParseTree::parse("").is_err());
    assert!(ParseTree::parse("(S (A b)").is_err());
    assert!(ParseTree::parse("(S a) b").is_err());
    assert!(ParseTree::parse("(())").is_err());
    assert!(ParseTree::parse("S").is_err());
}

#[test]
fn test_navigation() {
    let tree = ParseTree::parse("(PrWd (Syll s0) (Ft (StressSyll s2)) (Syll s0))").unwrap();
    let root = tree.root().unwrap();
    assert_eq!(root.len(), 3);
    assert!(root.parent().is_none());
    assert!(root.left_sibling().is_none());

    let ft = root.child(1).unwrap();
    assert_eq!(ft.label(), "Ft");
    assert_eq!(ft.parent().unwrap().label(), "PrWd");
    assert_eq!(ft.left_sibling().unwrap().label(), "Syll");
    assert_eq!(ft.right_sibling().unwrap().label(), "Syll");
    assert_eq!(ft.left_context(), Some("Syll"));
    assert_eq!(ft.position(), Some(1));

    let last = root.child(2).unwrap();
    assert_eq!(last.left_siblings().map(|n| n.label()).collect::<Vec<_>>(), ["Ft", "Syll"]);
    assert!(last.right_sibling().is_none());
}

#[test]
fn test_node_identity_is_per_tree() {
    let a = ParseTree::parse("(S (B b))").unwrap();
    let b = a.clone();
    assert_eq!(a, b);
    assert_ne!(a.root().unwrap(), b.root().unwrap());
    assert_eq!(a.root().unwrap(), a.root().unwrap());
}

#[test]
fn test_tree_prune_removes_subtree() {
    let tree = ParseTree::parse("(S (A0 (B b) (E e)))").unwrap();
    let e = tree.subtrees().into_iter().find(|n| n.label() == "E").unwrap();
    let pruned = tree.prune(&HashSet::from([e]));
    assert_eq!(pruned.to_string(), "(S (A0 (B b)))");

    let unchanged = tree.prune(&HashSet::new());
    assert_eq!(unchanged, tree);
}

#[test]
fn test_tree_prune_drops_emptied_phrases() {
    let tree = ParseTree::parse("(S (A (B b)) (C c))").unwrap();
    let b = tree.subtrees().into_iter().find(|n| n.label() == "B").unwrap();
    let pruned = tree.prune(&HashSet::from([b]));
    assert_eq!(pruned.to_string(), "(S (C c))");
    assert_eq!(pruned.leaves(), ["c"]);

    let only = ParseTree::parse("(S (A (B b)))").unwrap();
    let b = only.subtrees().into_iter().find(|n| n.label() == "B").unwrap();
    assert!(CandidateStructure::is_empty(&only.prune(&HashSet::from([b]))));
}

#[test]
fn test_tree_prune_root_empties_tree() {
    let tree = ParseTree::parse("(S (B b))").unwrap();
    let root = tree.root().unwrap();
    let pruned = tree.prune(&HashSet::from([root]));
    assert!(CandidateStructure::is_empty(&pruned));
    assert_eq!(pruned.to_string(), "()");
}

#[test]
fn test_node_builder_matches_parse() {
    let built = ParseTree::node(
        "S",
        [ParseTree::node(
            "A0",
            [
                ParseTree::node("B", [ParseTree::leaf("b")]),
                ParseTree::node("C", [ParseTree::leaf("c")]),
            ],
        )],
    );
    assert_eq!(built, ParseTree::parse("(S (A0 (B b) (C c)))").unwrap());
}
