//! statgram - Harmonic Grammar and Optimality Theory in Rust
//!
//! Score a generated candidate structure with a battery of violable
//! constraints, classify its elements as well- or ill-formed, and prune the
//! ill-formed ones.
//!
//! # Example
//!
//! ```rust
//! use statgram::prelude::*;
//!
//! let prefer_b = constraint("PreferB", |t: &Transition| if &*t.label == "b" { 1 } else { 0 });
//! let no_b = constraint("NoB", |t: &Transition| if &*t.label == "b" { -1 } else { 0 });
//!
//! let mut m = Fst::new(0);
//! m.add_final(0);
//! m.add_transition(0, "a", 0);
//! m.add_transition(0, "b", 0);
//!
//! // HG: 1.0 * -1 + 2.0 * +1 saturates at zero, so `b` survives.
//! let hg = Grammar::new(
//!     (no_b, prefer_b),
//!     Stat::hg(ConstraintWeights::try_from_pairs([("NoB", 1.0), ("PreferB", 2.0)]).unwrap()),
//! );
//! assert!(hg.evaluate(&m).unwrap().is_well_formed());
//! ```

pub use statgram_config::{ConfigError, EvaluationConfig, GrammarConfig, HarmonyConfig};
pub use statgram_core::{
    constraint, Alphabet, CandidateElement, CandidateStructure, Constraint, ConstraintName,
    FnConstraint, Fst, Harmony, Mark, ParseTree, Result, State, StatgramError, Subnode,
    Transition, TreeNode,
};
pub use statgram_scoring::{
    explain, stat, ConstraintRanks, ConstraintSet, ConstraintWeights, Evaluator,
    HarmonyExplanation, HarmonyFunction, HarmonyResult, HgStat, IgnoreLabels, Markup, OtStat,
    Stat,
};

mod grammar;
pub use grammar::{ignore_boundaries, Grammar, Pruned};

#[cfg(feature = "console")]
pub mod console;

pub mod prelude {
    pub use super::{constraint, Constraint, Mark, Subnode};
    pub use super::{ConstraintRanks, ConstraintWeights, Stat};
    pub use super::{Fst, ParseTree, Transition, TreeNode};
    pub use super::{Grammar, GrammarConfig};
}
