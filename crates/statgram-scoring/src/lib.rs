//! Constraint evaluation and harmony aggregation for statgram.
//!
//! This crate implements the Eval / Stat half of the pipeline:
//! - Constraint batteries (`ConstraintSet`), tuple-based or boxed
//! - The `Evaluator`, which turns candidate elements into a `Markup`
//! - Harmonic Grammar (`HgStat`) and Optimality Theory (`OtStat`) aggregation
//! - Weight and rank tables keyed by constraint name
//! - Per-element harmony explanations
//!
//! # Architecture
//!
//! Tuple batteries are fully monomorphized; a `Vec<Box<dyn Constraint<E>>>`
//! battery is available when constraints are assembled at runtime.

// Core modules
pub mod api;
pub mod eval;
pub mod stat;

// ============================================================================
// Constraint Battery and Tables
// ============================================================================

pub use api::constraint_set::ConstraintSet;
pub use api::ranks::ConstraintRanks;
pub use api::weights::ConstraintWeights;

// ============================================================================
// Evaluation
// ============================================================================

pub use eval::{
    Evaluator, IgnoreLabels, IgnoreNothing, IgnorePredicate, MarkedElement, Markup, SubnodeMarks,
};

// ============================================================================
// Aggregation
// ============================================================================

pub use stat::{element_harmony, stat, HarmonyFunction, HarmonyResult, HgStat, OtStat, Stat};

// ============================================================================
// Analysis (for harmony explanation)
// ============================================================================

pub use api::analysis::{
    explain, ConstraintTally, ElementAnalysis, HarmonyExplanation, SubnodeAnalysis,
};
