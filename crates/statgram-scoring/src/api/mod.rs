//! Constraint battery API.
//!
//! This module provides:
//! - `ConstraintSet` trait for applying a whole battery to one element
//! - Weight (HG) and rank (OT) tables keyed by constraint name
//! - Analysis types for harmony explanation

pub mod analysis;
pub mod constraint_set;
pub mod ranks;
pub mod weights;

#[cfg(test)]
mod tests;

pub use analysis::{explain, ConstraintTally, ElementAnalysis, HarmonyExplanation, SubnodeAnalysis};
pub use constraint_set::ConstraintSet;
pub use ranks::ConstraintRanks;
pub use weights::ConstraintWeights;
