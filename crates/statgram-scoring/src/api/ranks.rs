// Optimality Theory constraint ranking.
//
// A higher rank dominates a lower one. Ranks are expected to form a strict
// total order; ties are reported rather than broken.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;

use statgram_core::{Result, StatgramError};

/// Constraint ranks keyed by constraint name.
///
/// # Example
///
/// ```
/// use statgram_scoring::ConstraintRanks;
///
/// let ranks = ConstraintRanks::from_dominance_order(["PreferB", "NoB"]);
/// assert!(ranks.dominates("PreferB", "NoB").unwrap());
/// assert_eq!(ranks.dominance_order(), ["PreferB", "NoB"]);
/// assert!(ranks.rank("Missing").is_err());
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ConstraintRanks {
    ranks: HashMap<String, u32>,
}

impl Debug for ConstraintRanks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstraintRanks")
            .field("order", &self.dominance_order())
            .finish()
    }
}

impl ConstraintRanks {
    // Creates an empty ranking.
    pub fn new() -> Self {
        Self {
            ranks: HashMap::new(),
        }
    }

    // Ranks constraints from the most to the least dominant.
    pub fn from_dominance_order<I, N>(order: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        let names: Vec<String> = order.into_iter().map(Into::into).collect();
        let top = names.len() as u32;
        let ranks = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| (name, top - i as u32))
            .collect();
        Self { ranks }
    }

    // Creates a ranking from explicit (name, rank) pairs.
    pub fn from_pairs<I, N>(iter: I) -> Self
    where
        I: IntoIterator<Item = (N, u32)>,
        N: Into<String>,
    {
        let ranks = iter.into_iter().map(|(n, r)| (n.into(), r)).collect();
        Self { ranks }
    }

    // Sets the rank of a constraint, returning the previous rank.
    pub fn insert<N: Into<String>>(&mut self, name: N, rank: u32) -> Option<u32> {
        self.ranks.insert(name.into(), rank)
    }

    // Gets the rank if present.
    pub fn get(&self, name: &str) -> Option<u32> {
        self.ranks.get(name).copied()
    }

    // Gets the rank, failing if the constraint is unranked.
    pub fn rank(&self, name: &str) -> Result<u32> {
        self.get(name)
            .ok_or_else(|| StatgramError::MissingRank(name.to_string()))
    }

    // Returns true if `a` strictly outranks `b`.
    pub fn dominates(&self, a: &str, b: &str) -> Result<bool> {
        Ok(self.rank(a)? > self.rank(b)?)
    }

    // Returns true if this constraint is ranked.
    pub fn contains(&self, name: &str) -> bool {
        self.ranks.contains_key(name)
    }

    // Fails on the first unranked name.
    pub fn ensure_covers<'a, I>(&self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for name in names {
            self.rank(name)?;
        }
        Ok(())
    }

    // Returns groups of constraints sharing a rank, lowest rank first.
    pub fn ties(&self) -> Vec<(u32, Vec<&str>)> {
        let mut by_rank: BTreeMap<u32, Vec<&str>> = BTreeMap::new();
        for (name, &rank) in &self.ranks {
            by_rank.entry(rank).or_default().push(name);
        }
        by_rank
            .into_iter()
            .filter(|(_, names)| names.len() > 1)
            .map(|(rank, mut names)| {
                names.sort_unstable();
                (rank, names)
            })
            .collect()
    }

    // Returns the constraint names from the most to the least dominant.
    //
    // Tied names are ordered alphabetically.
    pub fn dominance_order(&self) -> Vec<&str> {
        let mut names: Vec<(&str, u32)> =
            self.ranks.iter().map(|(n, &r)| (n.as_str(), r)).collect();
        names.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        names.into_iter().map(|(n, _)| n).collect()
    }

    // Returns the number of ranked constraints.
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    // Returns true if nothing is ranked.
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

