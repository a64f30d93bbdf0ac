//! Tests for the evaluator and markup.

use statgram_core::{constraint, Constraint, Fst, Mark, Subnode, Transition};

use super::{Evaluator, MarkedElement, Markup};

fn label_is(t: &Transition, label: &str) -> bool {
    &*t.label == label
}

fn no_b() -> impl Constraint<Transition> {
    constraint("NoB", |t: &Transition| if label_is(t, "b") { -1 } else { 0 })
}

fn prefer_b() -> impl Constraint<Transition> {
    constraint("PreferB", |t: &Transition| if label_is(t, "b") { 1 } else { 0 })
}

fn toy() -> Fst {
    let mut m = Fst::new(0);
    m.add_final(2);
    m.add_transition(0, ">", 1);
    m.add_transition(1, "a", 1);
    m.add_transition(1, "b", 1);
    m.add_transition(1, "<", 2);
    m
}

#[test]
fn test_zero_marks_are_never_stored() {
    let battery = (no_b(), prefer_b());
    let markup = Evaluator::new(&battery).eval(toy().transitions().cloned());

    assert_eq!(markup.len(), 4);
    assert!(markup.iter().flat_map(MarkedElement::all_marks).all(|m| m.value != 0));
    assert_eq!(markup.mark_count(), 2);
    assert_eq!(markup.marked_count(), 1);
}

#[test]
fn test_unmarked_elements_have_empty_entries() {
    let battery = (no_b(),);
    let markup = Evaluator::new(&battery).eval(toy().transitions().cloned());
    let a = markup.get(&Transition::new(1, "a", 1)).unwrap();
    assert!(a.is_unmarked());
    assert_eq!(a.mark_count(), 0);
}

#[test]
fn test_ignored_elements_are_absent() {
    let battery = (no_b(),);
    let markup = Evaluator::new(&battery)
        .ignoring(|t: &Transition| label_is(t, ">") || label_is(t, "<"))
        .eval(toy().transitions().cloned());

    assert_eq!(markup.len(), 2);
    assert_eq!(markup.ignored_count(), 2);
    assert!(!markup.contains(&Transition::new(0, ">", 1)));
    assert!(markup.contains(&Transition::new(1, "b", 1)));
}

#[test]
fn test_marks_grouped_by_subnode() {
    let nasal = constraint("NoNasal", |t: &Transition| if label_is(t, "b") { -1 } else { 0 })
        .on_subnode("nasal");
    let battery = (no_b(), nasal);
    let markup = Evaluator::new(&battery).eval([Transition::new(1, "b", 1)]);
    let entry = markup.get(&Transition::new(1, "b", 1)).unwrap();

    assert_eq!(entry.marks.len(), 2);
    assert!(entry.marks_on(&Subnode::Root).unwrap().contains(&Mark::violation("NoB")));
    assert!(entry
        .marks_on(&Subnode::named("nasal"))
        .unwrap()
        .contains(&Mark::violation("NoNasal").at("nasal")));
}

#[test]
fn test_duplicate_elements_merge() {
    let battery = (no_b(),);
    let b = Transition::new(1, "b", 1);
    let markup = Evaluator::new(&battery).eval([b.clone(), b.clone()]);
    assert_eq!(markup.len(), 1);
    assert_eq!(markup.mark_count(), 1);
}

#[test]
fn test_constraint_order_does_not_change_marks() {
    let forward = (no_b(), prefer_b());
    let backward = (prefer_b(), no_b());
    let ts: Vec<Transition> = toy().transitions().cloned().collect();

    let m1 = Evaluator::new(&forward).eval(ts.clone());
    let m2 = Evaluator::new(&backward).eval(ts);
    for entry in &m1 {
        assert_eq!(Some(entry), m2.get(&entry.element));
    }
}

#[test]
fn test_par_eval_matches_eval() {
    let battery = (no_b(), prefer_b());
    let ts: Vec<Transition> = (0usize..64)
        .flat_map(|i| {
            [
                Transition::new(i, "a", i + 1),
                Transition::new(i, "b", i + 1),
                Transition::new(i, "<", 1000),
            ]
        })
        .collect();
    let evaluator = Evaluator::new(&battery).ignoring(|t: &Transition| label_is(t, "<"));

    let sequential = evaluator.eval(ts.clone());
    let parallel = evaluator.par_eval(ts);

    assert_eq!(sequential.len(), parallel.len());
    assert_eq!(sequential.ignored_count(), parallel.ignored_count());
    for (s, p) in sequential.iter().zip(parallel.iter()) {
        assert_eq!(s, p);
    }
}

#[test]
fn test_boxed_battery_evaluates() {
    let battery: Vec<Box<dyn Constraint<Transition>>> = vec![Box::new(no_b())];
    let markup = Evaluator::new(&battery).eval(toy().transitions().cloned());
    assert_eq!(markup.constraint_names().into_iter().collect::<Vec<_>>(), ["NoB"]);
}

#[test]
fn test_segments_evaluate_directly() {
    let voiced = constraint("NoVoiced", |s: &&str| if matches!(*s, "b" | "d" | "g") { -1 } else { 0 });
    let battery = (voiced,);
    let markup = Evaluator::new(&battery).eval("b a d a".split(' '));

    assert_eq!(markup.len(), 3);
    assert_eq!(markup.get(&"a").map(MarkedElement::is_unmarked), Some(true));
    assert_eq!(markup.marked_count(), 2);
}

#[test]
fn test_markup_from_entries() {
    let mut e = MarkedElement::new("x");
    e.add(Mark::none("NoB"));
    assert!(e.is_unmarked());
    let markup: Markup<&str> = [e].into_iter().collect();
    assert_eq!(markup.len(), 1);
    assert!(!markup.is_empty());
}

#[test]
fn test_ignore_labels() {
    let battery = (no_b(),);
    let markup = Evaluator::new(&battery)
        .ignoring(super::IgnoreLabels::new([">", "<"]))
        .eval(toy().transitions().cloned());
    assert_eq!(markup.len(), 2);
    assert_eq!(markup.ignored_count(), 2);

    let none = super::IgnoreLabels::default();
    assert!(none.is_empty());
    let markup = Evaluator::new(&battery).ignoring(none).eval(toy().transitions().cloned());
    assert_eq!(markup.ignored_count(), 0);
}
