//! The `{a,b}` toy grammar.
//!
//! `NoB` penalizes every `b`; `PreferB` rewards it. Under HG with weights
//! 1.0 / 2.0 the reward wins; under OT the ranking decides.

use statgram_core::{Alphabet, Fst, Transition};

use crate::TransitionConstraint;

/// The alphabet `{a, b}` with the default delimiters.
pub fn alphabet() -> Alphabet {
    Alphabet::new(["a", "b"])
}

/// Two states over `{a, b}`, both final: accepts `{a,b}*` without delimiters.
pub fn two_state() -> Fst {
    let mut m = Fst::new(0);
    m.add_final(0);
    m.add_final(1);
    for src in [0, 1] {
        m.add_transition(src, "a", 1);
        m.add_transition(src, "b", 1);
    }
    m
}

/// A delimited acceptor whose states remember the previous symbol.
pub fn context_acceptor() -> Fst {
    Fst::left_context_acceptor(&alphabet(), 1)
}

fn is_b(t: &Transition) -> bool {
    &*t.label == "b"
}

fn no_b_mark(t: &Transition) -> i8 {
    if is_b(t) {
        -1
    } else {
        0
    }
}

fn prefer_b_mark(t: &Transition) -> i8 {
    if is_b(t) {
        1
    } else {
        0
    }
}

fn no_bb_mark(t: &Transition) -> i8 {
    if is_b(t) && t.src.last_symbol() == Some("b") {
        -1
    } else {
        0
    }
}

/// `-1` on every `b` transition.
pub fn no_b() -> TransitionConstraint {
    TransitionConstraint::new("NoB", no_b_mark as fn(&Transition) -> i8)
}

/// `+1` on every `b` transition.
pub fn prefer_b() -> TransitionConstraint {
    TransitionConstraint::new("PreferB", prefer_b_mark as fn(&Transition) -> i8)
}

/// `-1` on a `b` whose source state was reached by a `b`.
pub fn no_bb() -> TransitionConstraint {
    TransitionConstraint::new("NoBB", no_bb_mark as fn(&Transition) -> i8)
}

/// Strings of `{a}*` up to `max_len` symbols, space-joined.
pub fn a_star(max_len: usize) -> Vec<String> {
    (0..=max_len).map(|n| vec!["a"; n].join(" ")).collect()
}
