//! Configuration system for statgram.
//!
//! Load a grammar's harmony semantics (HG weights or an OT ranking), its
//! alphabet and evaluation options from TOML or YAML, so the same battery
//! can be re-run under different weightings without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use statgram_config::{GrammarConfig, HarmonyConfig};
//!
//! let config = GrammarConfig::from_toml_str(r#"
//!     name = "toy"
//!
//!     [harmony]
//!     type = "hg"
//!     [harmony.weights]
//!     NoB = 1.0
//!     PreferB = 2.0
//!
//!     [evaluation]
//!     ignore_boundaries = true
//! "#).unwrap();
//!
//! assert!(matches!(config.harmony, HarmonyConfig::Hg { .. }));
//! assert_eq!(config.constraint_names(), ["NoB", "PreferB"]);
//! assert!(config.evaluation.ignore_boundaries);
//! ```
//!
//! An OT ranking lists constraints from the most to the least dominant:
//!
//! ```
//! use statgram_config::GrammarConfig;
//!
//! let config = GrammarConfig::from_yaml_str(r#"
//!     harmony:
//!       type: ot
//!       ranking: [PreferB, NoB]
//! "#).unwrap();
//!
//! assert_eq!(config.constraint_names(), ["PreferB", "NoB"]);
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use statgram_core::Alphabet;


/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main grammar configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GrammarConfig {
    /// Display name of the grammar.
    #[serde(default)]
    pub name: Option<String>,

    /// Aggregation semantics and its weight or rank table.
    pub harmony: HarmonyConfig,

    /// Symbol inventory and delimiters.
    #[serde(default)]
    pub alphabet: Option<Alphabet>,

    /// Evaluation options.
    #[serde(default)]
    pub evaluation: EvaluationConfig,
}

impl GrammarConfig {
    /// Creates a configuration with default evaluation options.
    pub fn new(harmony: HarmonyConfig) -> Self {
        Self {
            name: None,
            harmony,
            alphabet: None,
            evaluation: EvaluationConfig::default(),
        }
    }

    /// Loads and validates configuration, choosing the format by extension.
    ///
    /// `.yaml` and `.yml` files are read as YAML, anything else as TOML.
    ///
    /// # Errors
    ///
    /// Returns error if the file can't be read, doesn't parse, or fails
    /// [`GrammarConfig::validate`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path)?,
            _ => Self::from_toml_file(path)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the alphabet.
    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = Some(alphabet);
        self
    }

    /// Sets the evaluation options.
    pub fn with_evaluation(mut self, evaluation: EvaluationConfig) -> Self {
        self.evaluation = evaluation;
        self
    }

    /// Returns the constraint names the harmony table covers.
    ///
    /// Weights are listed alphabetically, rankings in dominance order.
    pub fn constraint_names(&self) -> Vec<&str> {
        self.harmony.constraint_names()
    }

    /// Checks the configuration for errors serde can't catch.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.harmony.validate()?;
        if let Some(alphabet) = &self.alphabet {
            if alphabet.bos == alphabet.eos {
                return Err(ConfigError::Invalid(format!(
                    "begin and end delimiters are both '{}'",
                    alphabet.bos
                )));
            }
            if let Some(s) = alphabet.symbols.iter().find(|s| alphabet.is_delimiter(s)) {
                return Err(ConfigError::Invalid(format!(
                    "delimiter '{}' is also a segment symbol",
                    s
                )));
            }
        }
        if self.evaluation.max_length == Some(0) {
            return Err(ConfigError::Invalid(
                "max_length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Aggregation semantics. Exactly one is chosen per grammar.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HarmonyConfig {
    /// Harmonic Grammar: weighted sum with a min-0 threshold.
    Hg {
        /// Non-negative weight per constraint.
        weights: BTreeMap<String, f64>,
    },

    /// Optimality Theory: strict domination.
    Ot {
        /// Constraint names, most dominant first.
        ranking: Vec<String>,
    },
}

impl HarmonyConfig {
    /// Short name of the semantics ("HG" or "OT").
    pub fn semantics(&self) -> &'static str {
        match self {
            HarmonyConfig::Hg { .. } => "HG",
            HarmonyConfig::Ot { .. } => "OT",
        }
    }

    /// Returns the constraint names this table covers.
    pub fn constraint_names(&self) -> Vec<&str> {
        match self {
            HarmonyConfig::Hg { weights } => weights.keys().map(String::as_str).collect(),
            HarmonyConfig::Ot { ranking } => ranking.iter().map(String::as_str).collect(),
        }
    }

    /// Returns true if `name` has a weight or rank.
    pub fn covers(&self, name: &str) -> bool {
        match self {
            HarmonyConfig::Hg { weights } => weights.contains_key(name),
            HarmonyConfig::Ot { ranking } => ranking.iter().any(|r| r == name),
        }
    }

    /// Rejects negative or non-finite weights and repeated ranks.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            HarmonyConfig::Hg { weights } => {
                for (name, &w) in weights {
                    if !w.is_finite() || w < 0.0 {
                        return Err(ConfigError::Invalid(format!(
                            "weight {} for constraint '{}' must be finite and non-negative",
                            w, name
                        )));
                    }
                }
            }
            HarmonyConfig::Ot { ranking } => {
                let mut seen = HashSet::new();
                for name in ranking {
                    if !seen.insert(name.as_str()) {
                        return Err(ConfigError::Invalid(format!(
                            "constraint '{}' is ranked more than once",
                            name
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Evaluation options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EvaluationConfig {
    /// Evaluate elements across the rayon thread pool.
    #[serde(default)]
    pub parallel: bool,

    /// Skip transitions labelled with the alphabet's delimiters.
    #[serde(default)]
    pub ignore_boundaries: bool,

    /// Bound on accepted-string enumeration after pruning.
    #[serde(default)]
    pub max_length: Option<usize>,
}
