//! Tests for the battery, weight/rank tables and harmony analysis.

use statgram_core::{constraint, Constraint, Harmony, Mark, StatgramError, Transition};

use super::analysis::explain;
use super::constraint_set::ConstraintSet;
use super::ranks::ConstraintRanks;
use super::weights::ConstraintWeights;
use crate::eval::Evaluator;
use crate::stat::{stat, Stat};

// ============================================================================
// ConstraintWeights
// ============================================================================

#[test]
fn test_weights_lookup() {
    let weights = ConstraintWeights::try_from_pairs([("NoB", 1.0), ("PreferB", 2.0)]).unwrap();
    assert_eq!(weights.weight("PreferB").unwrap(), 2.0);
    assert_eq!(weights.get("Missing"), None);
    assert_eq!(weights.names(), ["NoB", "PreferB"]);
    assert_eq!(weights.len(), 2);
}

#[test]
fn test_weights_missing_is_error_not_zero() {
    let weights = ConstraintWeights::new();
    assert_eq!(
        weights.weight("NoB").unwrap_err(),
        StatgramError::MissingWeight("NoB".to_string())
    );
}

#[test]
fn test_weights_reject_negative_and_nan() {
    let mut weights = ConstraintWeights::new();
    assert!(matches!(
        weights.insert("NoB", -1.0),
        Err(StatgramError::InvalidWeight { weight, .. }) if weight == -1.0
    ));
    assert!(weights.insert("NoB", f64::NAN).is_err());
    assert!(weights.insert("NoB", f64::INFINITY).is_err());
    assert!(weights.is_empty());

    assert_eq!(weights.insert("NoB", 0.0).unwrap(), None);
    assert_eq!(weights.insert("NoB", 3.0).unwrap(), Some(0.0));
}

#[test]
fn test_weights_ensure_covers() {
    let weights = ConstraintWeights::try_from_pairs([("NoB", 1.0)]).unwrap();
    assert!(weights.ensure_covers(["NoB"]).is_ok());
    assert!(weights.ensure_covers(["NoB", "NoC"]).is_err());
}

// ============================================================================
// ConstraintRanks
// ============================================================================

#[test]
fn test_ranks_from_dominance_order() {
    let ranks = ConstraintRanks::from_dominance_order(["Onset", "NoCoda", "Dep", "Max"]);
    assert_eq!(ranks.rank("Onset").unwrap(), 4);
    assert_eq!(ranks.rank("Max").unwrap(), 1);
    assert!(ranks.dominates("NoCoda", "Dep").unwrap());
    assert!(!ranks.dominates("Max", "Dep").unwrap());
    assert!(ranks.ties().is_empty());
}

#[test]
fn test_ranks_missing_is_error() {
    let ranks = ConstraintRanks::from_dominance_order(["NoB"]);
    assert_eq!(
        ranks.rank("PreferB").unwrap_err(),
        StatgramError::MissingRank("PreferB".to_string())
    );
    assert!(ranks.dominates("NoB", "PreferB").is_err());
}

#[test]
fn test_ranks_ties_and_order() {
    let mut ranks = ConstraintRanks::from_pairs([("B", 2), ("A", 2), ("C", 1), ("D", 3)]);
    assert_eq!(ranks.ties(), vec![(2, vec!["A", "B"])]);
    assert_eq!(ranks.dominance_order(), ["D", "A", "B", "C"]);

    assert_eq!(ranks.insert("A", 4), Some(2));
    assert!(ranks.ties().is_empty());
}

// ============================================================================
// ConstraintSet
// ============================================================================

fn no_b() -> impl Constraint<Transition> {
    constraint("NoB", |t: &Transition| if &*t.label == "b" { -1 } else { 0 })
}

fn prefer_b() -> impl Constraint<Transition> {
    constraint("PreferB", |t: &Transition| if &*t.label == "b" { 1 } else { 0 })
}

#[test]
fn test_tuple_battery_names_and_count() {
    let battery = (no_b(), prefer_b());
    assert_eq!(ConstraintSet::<Transition>::names(&battery), ["NoB", "PreferB"]);
    assert_eq!(ConstraintSet::<Transition>::constraint_count(&battery), 2);
}

#[test]
fn test_tuple_battery_marks_in_order() {
    let battery = (no_b(), prefer_b());
    let mut marks = Vec::new();
    battery.for_each_mark(&Transition::new(0, "b", 1), |m| marks.push(m));
    assert_eq!(marks, vec![Mark::violation("NoB"), Mark::satisfaction("PreferB")]);
}

#[test]
fn test_boxed_battery() {
    let battery: Vec<Box<dyn Constraint<Transition>>> = vec![Box::new(no_b()), Box::new(prefer_b())];
    assert_eq!(ConstraintSet::<Transition>::constraint_count(&battery), 2);
    assert_eq!(ConstraintSet::<Transition>::names(&battery), ["NoB", "PreferB"]);

    let mut marks = Vec::new();
    battery.for_each_mark(&Transition::new(0, "a", 1), |m| marks.push(m));
    assert!(marks.iter().all(Mark::is_zero));
}

#[test]
fn test_empty_battery() {
    let mut count = 0;
    ().for_each_mark(&Transition::new(0, "b", 1), |_| count += 1);
    assert_eq!(count, 0);
    assert_eq!(ConstraintSet::<Transition>::constraint_count(&()), 0);
}

// ============================================================================
// Analysis
// ============================================================================

#[test]
fn test_explain_agrees_with_stat() {
    let battery = (no_b(), prefer_b());
    let ts = [
        Transition::new(0, "a", 0),
        Transition::new(0, "b", 0),
        Transition::new(0, "b", 1),
    ];
    let markup = Evaluator::new(&battery).eval(ts);
    let f = Stat::ot(ConstraintRanks::from_dominance_order(["NoB", "PreferB"]));

    let result = stat(&markup, &f).unwrap();
    let explanation = explain(&markup, &f).unwrap();
    assert_eq!(explanation.total, result.total);
    assert_eq!(explanation.ill_formed_count(), result.ill_formed_count());
    assert_eq!(explanation.semantics, "OT");
    assert_eq!(explanation.elements.len(), 3);
}

#[test]
fn test_explain_reports_decisive_constraint_and_tallies() {
    let battery = (no_b(), prefer_b());
    let markup = Evaluator::new(&battery).eval([Transition::new(0, "b", 1)]);
    let f = Stat::ot(ConstraintRanks::from_dominance_order(["NoB", "PreferB"]));
    let explanation = explain(&markup, &f).unwrap();

    let element = &explanation.elements[0];
    assert!(element.is_ill_formed());
    assert_eq!(element.harmony, Harmony::PENALTY);
    assert_eq!(element.mark_count(), 2);
    assert_eq!(element.subnodes[0].decisive.as_deref(), Some("NoB"));

    let tally = explanation.tally("NoB").unwrap();
    assert_eq!((tally.violations, tally.satisfactions, tally.decisive), (1, 0, 1));
    let tally = explanation.tally("PreferB").unwrap();
    assert_eq!((tally.violations, tally.satisfactions, tally.decisive), (0, 1, 0));
    assert_eq!(explanation.most_violated(), vec![("NoB", 1)]);
}

#[test]
fn test_explain_display_lists_ill_formed() {
    let battery = (no_b(),);
    let markup = Evaluator::new(&battery).eval([Transition::new(0, "a", 1), Transition::new(0, "b", 1)]);
    let f = Stat::hg(ConstraintWeights::try_from_pairs([("NoB", 1.0)]).unwrap());
    let text = explain(&markup, &f).unwrap().to_string();

    assert!(text.starts_with("HG harmony -1 (1 of 2 elements ill-formed)"));
    assert!(text.contains("(0, b, 1) : -1"));
    assert!(text.contains("[•] NoB-1 -> -1"));
    assert!(!text.contains("(0, a, 1)"));
}

#[test]
fn test_explain_propagates_missing_rank() {
    let battery = (no_b(),);
    let markup = Evaluator::new(&battery).eval([Transition::new(0, "b", 1)]);
    let f = Stat::ot(ConstraintRanks::new());
    assert!(explain(&markup, &f).is_err());
}
