//! statgram Core - Core types and traits for harmonic evaluation
//!
//! This crate provides the fundamental abstractions for statgram:
//! - Marks assigned by violable constraints to candidate elements
//! - The `Constraint` trait and closure-backed constraints
//! - The `CandidateElement` / `CandidateStructure` abstraction
//! - Harmony values and the crate error type
//! - Reference candidate structures (finite-state acceptor, parse tree)

pub mod alphabet;
pub mod constraint;
pub mod element;
pub mod error;
pub mod harmony;
pub mod mark;
pub mod structure;


pub use alphabet::Alphabet;
pub use constraint::{constraint, Constraint, FnConstraint};
pub use element::{CandidateElement, CandidateStructure};
pub use error::{Result, StatgramError};
pub use harmony::Harmony;
pub use mark::{ConstraintName, Mark, Subnode};
pub use structure::{Fst, NodeId, ParseTree, State, Transition, TreeNode};
