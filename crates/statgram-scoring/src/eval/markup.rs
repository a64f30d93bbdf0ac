//! Markup: the marks assigned to each evaluated element.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use statgram_core::{CandidateElement, Mark, Subnode};

/// Marks of one element, grouped by subnode.
pub type SubnodeMarks = BTreeMap<Subnode, BTreeSet<Mark>>;

/// An evaluated element and its marks.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkedElement<E> {
    pub element: E,
    pub marks: SubnodeMarks,
}

impl<E> MarkedElement<E> {
    /// Creates an entry with no marks.
    pub fn new(element: E) -> Self {
        Self {
            element,
            marks: BTreeMap::new(),
        }
    }

    /// Records a mark; zero marks are dropped.
    pub fn add(&mut self, mark: Mark) {
        if mark.is_zero() {
            return;
        }
        self.marks
            .entry(mark.subnode.clone())
            .or_default()
            .insert(mark);
    }

    /// Returns true if no constraint applied to the element.
    pub fn is_unmarked(&self) -> bool {
        self.marks.is_empty()
    }

    /// Total number of marks across subnodes.
    pub fn mark_count(&self) -> usize {
        self.marks.values().map(BTreeSet::len).sum()
    }

    /// Marks on one subnode.
    pub fn marks_on(&self, subnode: &Subnode) -> Option<&BTreeSet<Mark>> {
        self.marks.get(subnode)
    }

    /// Iterates over every mark, subnode by subnode.
    pub fn all_marks(&self) -> impl Iterator<Item = &Mark> {
        self.marks.values().flatten()
    }
}

/// Mapping from evaluated element to its marks, in evaluation order.
///
/// Every non-ignored element has an entry, including elements no
/// constraint applied to; ignored elements are only counted.
#[derive(Debug, Clone)]
pub struct Markup<E: CandidateElement> {
    entries: Vec<MarkedElement<E>>,
    index: HashMap<E, usize>,
    ignored: usize,
}

impl<E: CandidateElement> Default for Markup<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: CandidateElement> Markup<E> {
    /// Creates an empty markup.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            ignored: 0,
        }
    }

    /// Adds an entry. Marks for an element seen before are merged.
    pub fn insert(&mut self, entry: MarkedElement<E>) {
        if let Some(&i) = self.index.get(&entry.element) {
            let existing = &mut self.entries[i];
            for mark in entry.marks.into_values().flatten() {
                existing.add(mark);
            }
            return;
        }
        self.index.insert(entry.element.clone(), self.entries.len());
        self.entries.push(entry);
    }

    pub(crate) fn record_ignored(&mut self, count: usize) {
        self.ignored += count;
    }

    /// Looks up an element's entry.
    pub fn get(&self, element: &E) -> Option<&MarkedElement<E>> {
        self.index.get(element).map(|&i| &self.entries[i])
    }

    /// Returns true if the element was evaluated.
    pub fn contains(&self, element: &E) -> bool {
        self.index.contains_key(element)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MarkedElement<E>> {
        self.entries.iter()
    }

    /// Number of evaluated elements.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of elements skipped by the ignore predicate.
    pub fn ignored_count(&self) -> usize {
        self.ignored
    }

    /// Number of evaluated elements with at least one mark.
    pub fn marked_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_unmarked()).count()
    }

    /// Total number of stored marks.
    pub fn mark_count(&self) -> usize {
        self.entries.iter().map(MarkedElement::mark_count).sum()
    }

    /// Names of the constraints that marked at least one element.
    pub fn constraint_names(&self) -> BTreeSet<&str> {
        self.entries
            .iter()
            .flat_map(MarkedElement::all_marks)
            .map(|m| &*m.constraint)
            .collect()
    }
}

impl<'m, E: CandidateElement> IntoIterator for &'m Markup<E> {
    type Item = &'m MarkedElement<E>;
    type IntoIter = std::slice::Iter<'m, MarkedElement<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<E: CandidateElement> FromIterator<MarkedElement<E>> for Markup<E> {
    fn from_iter<I: IntoIterator<Item = MarkedElement<E>>>(iter: I) -> Self {
        let mut markup = Markup::new();
        for entry in iter {
            markup.insert(entry);
        }
        markup
    }
}
