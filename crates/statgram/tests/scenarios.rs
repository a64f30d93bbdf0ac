//! End-to-end scenarios: acceptor pruning under HG and OT, and
//! whole-candidate filtering of parse trees.

use std::collections::BTreeSet;

use statgram::prelude::*;
use statgram::{ignore_boundaries, CandidateStructure, Harmony};
use statgram_test::heads::{exactly_one_head, head_trees, LEGAL_HEAD_TREES};
use statgram_test::smolensky::{g0_battery, g0_trees, g0_unit_weights, LEGAL_G0_TREES};
use statgram_test::toy::{a_star, alphabet, context_acceptor, no_b, prefer_b, two_state};

fn weights(pairs: &[(&str, f64)]) -> ConstraintWeights {
    ConstraintWeights::try_from_pairs(pairs.iter().copied()).unwrap()
}

fn labels<'t>(nodes: &[TreeNode<'t>]) -> Vec<&'t str> {
    nodes.iter().map(|n| n.label()).collect()
}

// ============================================================================
// Scenario A: NoB alone
// ============================================================================

#[test]
fn test_no_b_prunes_every_b() {
    let m = two_state();
    let grammar = Grammar::new((no_b(),), Stat::hg(weights(&[("NoB", 1.0)])));
    let pruned = grammar.prune(&m).unwrap();

    assert_eq!(pruned.result.ill_formed_count(), 2);
    assert_eq!(pruned.result.total, Harmony::of(-2.0));
    assert!(pruned.structure.transitions().all(|t| &*t.label != "b"));

    let expected: BTreeSet<String> = a_star(4).into_iter().collect();
    assert_eq!(pruned.structure.accepted_strings(4), expected);
}

#[test]
fn test_no_b_on_delimited_acceptor() {
    let m = context_acceptor();
    let grammar = Grammar::new((no_b(),), Stat::hg(weights(&[("NoB", 1.0)])))
        .ignoring_boundaries(&alphabet());
    let pruned = grammar.prune(&m).unwrap();

    let strings = pruned.structure.accepted_strings(6);
    assert_eq!(strings.len(), 5);
    assert!(strings.contains("> <"));
    assert!(strings.contains("> a a a a <"));
    assert!(strings.iter().all(|s| !s.contains('b')));
    // The state reached by `b` is stranded and trimmed.
    assert!(pruned.structure.states().all(|q| q.label() != "b"));
}

// ============================================================================
// Scenario B: NoB against PreferB
// ============================================================================

#[test]
fn test_hg_threshold_keeps_b() {
    let m = two_state();
    let grammar = Grammar::new(
        (no_b(), prefer_b()),
        Stat::hg(weights(&[("NoB", 1.0), ("PreferB", 2.0)])),
    );
    let pruned = grammar.prune(&m).unwrap();

    assert!(pruned.is_unchanged());
    assert_eq!(pruned.result.total, Harmony::ZERO);
    assert_eq!(pruned.structure, m);
}

#[test]
fn test_ot_ranking_decides_b() {
    let m = two_state();

    let prefer_high = Grammar::new(
        (no_b(), prefer_b()),
        Stat::ot(ConstraintRanks::from_dominance_order(["PreferB", "NoB"])),
    );
    assert!(prefer_high.evaluate(&m).unwrap().is_well_formed());

    let no_b_high = Grammar::new(
        (no_b(), prefer_b()),
        Stat::ot(ConstraintRanks::from_dominance_order(["NoB", "PreferB"])),
    );
    let pruned = no_b_high.prune(&m).unwrap();
    assert_eq!(pruned.result.ill_formed_count(), 2);
    assert_eq!(pruned.result.total, Harmony::of(-2.0));
    assert!(pruned.structure.transitions().all(|t| &*t.label == "a"));
}

// ============================================================================
// Scenario C: ExactlyOneHead
// ============================================================================

#[test]
fn test_headed_trees() {
    let trees = head_trees().unwrap();
    let grammar = Grammar::new(
        (exactly_one_head(),),
        Stat::hg(weights(&[("ExactlyOneHead", 1.0)])),
    );

    for (i, tree) in trees.iter().enumerate() {
        let result = grammar.evaluate(tree).unwrap();
        if i < LEGAL_HEAD_TREES {
            assert_eq!(result.total, Harmony::ZERO, "tree {tree}");
        } else {
            assert!(result.total < Harmony::ZERO, "tree {tree}");
        }
    }

    assert_eq!(labels(&grammar.evaluate(&trees[2]).unwrap().ill_formed), ["S"]);
    assert_eq!(labels(&grammar.evaluate(&trees[3]).unwrap().ill_formed), ["Y*"]);
    assert_eq!(labels(&grammar.evaluate(&trees[4]).unwrap().ill_formed), ["S"]);
}

#[test]
fn test_select_well_formed_discards_whole_trees() {
    let trees = head_trees().unwrap();
    let grammar = Grammar::new(
        (exactly_one_head(),),
        Stat::ot(ConstraintRanks::from_dominance_order(["ExactlyOneHead"])),
    );
    let kept = grammar.select_well_formed(&trees).unwrap();

    assert_eq!(kept.len(), LEGAL_HEAD_TREES);
    for (kept, original) in kept.iter().zip(&trees) {
        assert_eq!(*kept, original);
        assert_eq!(kept.leaves(), ["a", "b", "c"]);
    }
}

#[test]
fn test_tree_prune_removes_ill_subtree() {
    let trees = head_trees().unwrap();
    let grammar = Grammar::new(
        (exactly_one_head(),),
        Stat::hg(weights(&[("ExactlyOneHead", 1.0)])),
    );
    let pruned = grammar.prune(&trees[3]).unwrap();
    assert_eq!(pruned.structure.to_string(), "(S (A a))");

    let pruned = grammar.prune(&trees[2]).unwrap();
    assert!(CandidateStructure::is_empty(&pruned.structure));
}

// ============================================================================
// Smolensky (1993) G0
// ============================================================================

#[test]
fn test_g0_legal_trees_have_zero_harmony() {
    let trees = g0_trees().unwrap();
    let grammar = Grammar::new(g0_battery(), Stat::hg(weights(&g0_unit_weights())));

    for tree in &trees[..LEGAL_G0_TREES] {
        let result = grammar.evaluate(tree).unwrap();
        assert_eq!(result.total, Harmony::ZERO, "tree {tree}");
    }
}

#[test]
fn test_g0_spliced_trees_name_offending_nodes() {
    let trees = g0_trees().unwrap();
    let grammar = Grammar::new(g0_battery(), Stat::hg(weights(&g0_unit_weights())));

    let result = grammar.evaluate(&trees[3]).unwrap();
    assert_eq!(result.total, Harmony::of(-2.0));
    assert_eq!(labels(&result.ill_formed), ["A0", "E"]);

    let result = grammar.evaluate(&trees[4]).unwrap();
    assert_eq!(result.total, Harmony::of(-2.0));
    assert_eq!(labels(&result.ill_formed), ["A1", "C"]);

    let explanation = grammar.explain(&trees[3]).unwrap();
    assert_eq!(explanation.ill_formed_count(), 2);
    assert_eq!(explanation.tally("need_parent").unwrap().violations, 3);
}

#[test]
fn test_g0_select_well_formed() {
    let trees = g0_trees().unwrap();
    let grammar = Grammar::new(g0_battery(), Stat::hg(weights(&g0_unit_weights())));
    let kept = grammar.select_well_formed(&trees).unwrap();
    assert_eq!(kept.len(), LEGAL_G0_TREES);
}

#[test]
fn test_boundaries_predicate_labels() {
    let ignore = ignore_boundaries(&alphabet());
    assert_eq!(ignore.labels().collect::<Vec<_>>(), ["<", ">"]);
}
