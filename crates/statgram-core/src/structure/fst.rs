//! Finite-state acceptor over labelled states.
//!
//! States carry labels that encode a bounded context window (e.g. the last
//! symbol seen), so a transition alone exposes its left and right context.
//! Only the operations evaluation and pruning need live here: enumeration,
//! transition deletion, trimming and bounded string enumeration.

use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};
use std::fmt;
use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::element::{CandidateElement, CandidateStructure};

/// A labelled acceptor state.
///
/// Context-acceptor states are labelled with their context symbols joined
/// by single spaces.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct State(Arc<str>);

impl State {
    /// Creates a state with the given label.
    pub fn new(label: impl Into<Arc<str>>) -> Self {
        State(label.into())
    }

    /// Creates a state labelled with a context window.
    pub fn from_context<S: AsRef<str>>(symbols: &[S]) -> Self {
        let label = symbols
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" ");
        State::new(label)
    }

    /// Returns the state label.
    pub fn label(&self) -> &str {
        &self.0
    }

    /// Iterates over the context symbols encoded in the label.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.0.split_whitespace()
    }

    /// The most recent context symbol.
    pub fn last_symbol(&self) -> Option<&str> {
        self.symbols().last()
    }

    /// The earliest context symbol.
    pub fn first_symbol(&self) -> Option<&str> {
        self.symbols().next()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for State {
    fn from(label: &str) -> Self {
        State::new(label)
    }
}

impl From<String> for State {
    fn from(label: String) -> Self {
        State::new(label)
    }
}

impl From<usize> for State {
    fn from(index: usize) -> Self {
        State::new(index.to_string())
    }
}

/// A labelled arc `src -label-> dest`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Transition {
    pub src: State,
    pub label: Arc<str>,
    pub dest: State,
}

impl Transition {
    /// Creates a transition.
    pub fn new(src: impl Into<State>, label: impl Into<Arc<str>>, dest: impl Into<State>) -> Self {
        Self {
            src: src.into(),
            label: label.into(),
            dest: dest.into(),
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.src, self.label, self.dest)
    }
}

impl CandidateElement for Transition {
    #[inline]
    fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    fn left_context(&self) -> Option<&str> {
        Some(self.src.label())
    }

    #[inline]
    fn right_context(&self) -> Option<&str> {
        Some(self.dest.label())
    }
}

/// A finite-state acceptor with a single start state.
///
/// # Example
///
/// ```
/// use statgram_core::Fst;
///
/// let mut m = Fst::new(0);
/// m.add_final(1);
/// m.add_transition(0, ">", 1);
/// m.add_transition(1, "a", 1);
///
/// let strings = m.accepted_strings(3);
/// assert!(strings.contains("> a a"));
/// assert_eq!(strings.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fst {
    start: State,
    states: BTreeSet<State>,
    finals: BTreeSet<State>,
    transitions: BTreeSet<Transition>,
}

impl Fst {
    /// Creates an acceptor containing only its start state.
    pub fn new(start: impl Into<State>) -> Self {
        let start = start.into();
        let mut states = BTreeSet::new();
        states.insert(start.clone());
        Self {
            start,
            states,
            finals: BTreeSet::new(),
            transitions: BTreeSet::new(),
        }
    }

    /// Adds a state; returns false if it was already present.
    pub fn add_state(&mut self, state: impl Into<State>) -> bool {
        self.states.insert(state.into())
    }

    /// Adds a state and marks it final.
    pub fn add_final(&mut self, state: impl Into<State>) {
        let state = state.into();
        self.states.insert(state.clone());
        self.finals.insert(state);
    }

    /// Adds a transition, adding its endpoints as states.
    pub fn add_transition(
        &mut self,
        src: impl Into<State>,
        label: impl Into<Arc<str>>,
        dest: impl Into<State>,
    ) -> bool {
        let t = Transition::new(src, label, dest);
        self.states.insert(t.src.clone());
        self.states.insert(t.dest.clone());
        self.transitions.insert(t)
    }

    pub fn start(&self) -> &State {
        &self.start
    }

    pub fn states(&self) -> impl Iterator<Item = &State> {
        self.states.iter()
    }

    pub fn finals(&self) -> impl Iterator<Item = &State> {
        self.finals.iter()
    }

    pub fn transitions(&self) -> impl Iterator<Item = &Transition> {
        self.transitions.iter()
    }

    pub fn is_final(&self, state: &State) -> bool {
        self.finals.contains(state)
    }

    pub fn contains_transition(&self, transition: &Transition) -> bool {
        self.transitions.contains(transition)
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    pub fn num_transitions(&self) -> usize {
        self.transitions.len()
    }

    /// Returns a copy without the given transitions. States are kept.
    pub fn without_transitions<'a, I>(&self, dead: I) -> Fst
    where
        I: IntoIterator<Item = &'a Transition>,
    {
        let dead: HashSet<&Transition> = dead.into_iter().collect();
        Fst {
            start: self.start.clone(),
            states: self.states.clone(),
            finals: self.finals.clone(),
            transitions: self
                .transitions
                .iter()
                .filter(|t| !dead.contains(t))
                .cloned()
                .collect(),
        }
    }

    /// Restricts the acceptor to states both reachable from the start and
    /// co-reachable from some final state.
    ///
    /// The start state is always retained. If no final state is reachable
    /// the result accepts nothing: it has no transitions and no finals.
    pub fn trim(&self) -> Fst {
        let mut forward: BTreeMap<&State, Vec<&State>> = BTreeMap::new();
        let mut backward: BTreeMap<&State, Vec<&State>> = BTreeMap::new();
        for t in &self.transitions {
            forward.entry(&t.src).or_default().push(&t.dest);
            backward.entry(&t.dest).or_default().push(&t.src);
        }

        let accessible = reachable([&self.start], &forward);
        let coaccessible = reachable(self.finals.iter(), &backward);
        let useful: BTreeSet<&State> = accessible.intersection(&coaccessible).copied().collect();

        let mut states: BTreeSet<State> = useful.iter().map(|q| (*q).clone()).collect();
        states.insert(self.start.clone());

        Fst {
            start: self.start.clone(),
            states,
            finals: self
                .finals
                .iter()
                .filter(|q| useful.contains(q))
                .cloned()
                .collect(),
            transitions: self
                .transitions
                .iter()
                .filter(|t| useful.contains(&t.src) && useful.contains(&t.dest))
                .cloned()
                .collect(),
        }
    }

    /// Returns true if no final state is reachable from the start.
    pub fn accepts_nothing(&self) -> bool {
        self.trim().finals.is_empty()
    }

    /// Enumerates accepted strings of at most `max_len` transitions.
    ///
    /// Symbols are joined by single spaces; delimiter transitions count
    /// toward the bound like any other transition.
    pub fn accepted_strings(&self, max_len: usize) -> BTreeSet<String> {
        let mut arcs: BTreeMap<&State, Vec<&Transition>> = BTreeMap::new();
        for t in &self.transitions {
            arcs.entry(&t.src).or_default().push(t);
        }

        let mut accepted = BTreeSet::new();
        let mut stack: Vec<(&State, Vec<&str>)> = vec![(&self.start, Vec::new())];
        while let Some((q, path)) = stack.pop() {
            if self.finals.contains(q) {
                accepted.insert(path.join(" "));
            }
            if path.len() == max_len {
                continue;
            }
            for t in arcs.get(q).into_iter().flatten() {
                let mut next = path.clone();
                next.push(&t.label);
                stack.push((&t.dest, next));
            }
        }
        accepted
    }

    /// Builds an acceptor whose states remember the last `context_length`
    /// symbols read.
    ///
    /// Accepted strings have the form `bos x1 ... xn eos` over the alphabet's
    /// segments. The begin delimiter is part of the context, so constraints
    /// can see word-initial position; the single final state is labelled
    /// with the end delimiter.
    pub fn left_context_acceptor(alphabet: &Alphabet, context_length: usize) -> Fst {
        let context_length = context_length.max(1);
        let mut m = Fst::new("");
        let end = State::new(alphabet.eos.as_str());
        m.add_final(end.clone());

        let initial = vec![alphabet.bos.clone()];
        let first = State::from_context(&initial);
        m.add_transition(m.start.clone(), alphabet.bos.as_str(), first);

        let mut seen: HashSet<Vec<String>> = HashSet::new();
        let mut queue = VecDeque::from([initial]);
        while let Some(context) = queue.pop_front() {
            if !seen.insert(context.clone()) {
                continue;
            }
            let src = State::from_context(&context);
            m.add_transition(src.clone(), alphabet.eos.as_str(), end.clone());
            for x in &alphabet.symbols {
                let mut next = context.clone();
                next.push(x.clone());
                if next.len() > context_length {
                    next.remove(0);
                }
                m.add_transition(src.clone(), x.as_str(), State::from_context(&next));
                queue.push_back(next);
            }
        }
        m
    }
}

fn reachable<'a, I>(roots: I, edges: &BTreeMap<&'a State, Vec<&'a State>>) -> BTreeSet<&'a State>
where
    I: IntoIterator<Item = &'a State>,
{
    let mut seen = BTreeSet::new();
    let mut stack: Vec<&State> = roots.into_iter().collect();
    while let Some(q) = stack.pop() {
        if seen.insert(q) {
            stack.extend(edges.get(q).into_iter().flatten().copied());
        }
    }
    seen
}

impl CandidateStructure for Fst {
    type Element<'a> = Transition;

    fn elements(&self) -> Vec<Transition> {
        self.transitions.iter().cloned().collect()
    }

    /// Deletes the ill-formed transitions, then trims states stranded by
    /// the deletion.
    fn prune<'a>(&'a self, ill_formed: &HashSet<Transition>) -> Fst {
        if ill_formed.is_empty() {
            return self.clone();
        }
        self.without_transitions(ill_formed).trim()
    }

    fn is_empty(&self) -> bool {
        self.accepts_nothing()
    }
}
