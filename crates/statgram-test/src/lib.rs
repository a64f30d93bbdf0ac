//! Shared test fixtures for statgram crates.
//!
//! This crate provides candidate structures and constraint batteries for
//! testing. It does NOT depend on `statgram-scoring` to avoid circular
//! dependencies; batteries are plain tuples of constraints.
//!
//! - [`toy`] - The `{a,b}` acceptors with `NoB` / `PreferB`
//! - [`heads`] - Headed parse trees with `ExactlyOneHead`
//! - [`smolensky`] - Grammar G0 in Harmonic Normal Form (Smolensky 1993)
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! statgram-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```
//! use statgram_test::toy::{no_b, two_state};
//! use statgram_test::smolensky::{g0_battery, G0_TREES};
//!
//! let acceptor = two_state();
//! let battery = (no_b(),);
//! assert_eq!(G0_TREES.len(), 5);
//! # let _ = (acceptor, battery, g0_battery());
//! ```

use statgram_core::{FnConstraint, Transition, TreeNode};

pub mod heads;
pub mod smolensky;
pub mod toy;

/// A named constraint over acceptor transitions.
pub type TransitionConstraint = FnConstraint<fn(&Transition) -> i8>;

/// A named constraint over parse-tree nodes.
pub type NodeConstraint = FnConstraint<fn(&TreeNode<'_>) -> i8>;
