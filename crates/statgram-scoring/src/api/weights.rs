// Harmonic Grammar constraint weights.
//
// Weights are fixed inputs for one evaluation run. A lookup for a constraint
// without a weight is a configuration error, never a silent zero.

use std::collections::HashMap;
use std::fmt::Debug;

use statgram_core::{Result, StatgramError};

/// Non-negative, finite weights keyed by constraint name.
#[derive(Clone, Default, PartialEq)]
pub struct ConstraintWeights {
    weights: HashMap<String, f64>,
}

impl Debug for ConstraintWeights {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstraintWeights")
            .field("count", &self.weights.len())
            .finish()
    }
}

impl ConstraintWeights {
    // Creates an empty table.
    pub fn new() -> Self {
        Self {
            weights: HashMap::new(),
        }
    }

    // Creates a table from (name, weight) pairs, rejecting invalid weights.
    pub fn try_from_pairs<I, N>(iter: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, f64)>,
        N: Into<String>,
    {
        let mut weights = Self::new();
        for (name, weight) in iter {
            weights.insert(name, weight)?;
        }
        Ok(weights)
    }

    // Sets the weight for a constraint, returning the previous weight.
    pub fn insert<N: Into<String>>(&mut self, name: N, weight: f64) -> Result<Option<f64>> {
        let name = name.into();
        if !weight.is_finite() || weight < 0.0 {
            return Err(StatgramError::InvalidWeight {
                constraint: name,
                weight,
            });
        }
        Ok(self.weights.insert(name, weight))
    }

    // Removes the weight for a constraint.
    pub fn remove(&mut self, name: &str) -> Option<f64> {
        self.weights.remove(name)
    }

    // Gets the weight if present.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.weights.get(name).copied()
    }

    // Gets the weight, failing if the constraint has none.
    pub fn weight(&self, name: &str) -> Result<f64> {
        self.get(name)
            .ok_or_else(|| StatgramError::MissingWeight(name.to_string()))
    }

    /// Returns true if this constraint has a weight.
    pub fn contains(&self, name: &str) -> bool {
        self.weights.contains_key(name)
    }

    // Fails on the first name without a weight.
    pub fn ensure_covers<'a, I>(&self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for name in names {
            self.weight(name)?;
        }
        Ok(())
    }

    /// Returns the constraint names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.weights.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of weights.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Returns true if there are no weights.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}
