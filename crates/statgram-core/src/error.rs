//! Error types for statgram

use thiserror::Error;

/// Main error type for statgram operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatgramError {
    /// A constraint present in the markup has no weight.
    #[error("No weight configured for constraint '{0}'")]
    MissingWeight(String),

    /// A constraint present in the markup has no rank.
    #[error("No rank configured for constraint '{0}'")]
    MissingRank(String),

    /// Weights must be finite and non-negative.
    #[error("Invalid weight {weight} for constraint '{constraint}'")]
    InvalidWeight { constraint: String, weight: f64 },

    /// Two or more constraints share the top rank for one subnode and
    /// disagree on the polarity of their marks.
    #[error("Rank tie at rank {rank} between constraints {constraints:?}")]
    RankTie { rank: u32, constraints: Vec<String> },

    /// Error reading a structure from its textual notation
    #[error("Parse error: {0}")]
    Parse(String),

    /// Error in grammar configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for statgram operations
pub type Result<T> = std::result::Result<T, StatgramError>;
