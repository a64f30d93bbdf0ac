//! Explicit alphabet configuration.
//!
//! The symbol inventory and the string delimiters are a value passed to the
//! generator and to the constraints that need membership tests, never
//! process-wide state.

use std::collections::BTreeMap;

/// Default begin-of-string delimiter.
pub const DEFAULT_BOS: &str = ">";

/// Default end-of-string delimiter.
pub const DEFAULT_EOS: &str = "<";

/// Symbol inventory with delimiters and optional named classes.
///
/// # Example
///
/// ```
/// use statgram_core::Alphabet;
///
/// let sigma = Alphabet::new(["p", "q", "a", "u"])
///     .with_class("vowel", ["a", "u"]);
///
/// assert!(sigma.contains("q"));
/// assert!(sigma.in_class("vowel", "u"));
/// assert!(!sigma.in_class("vowel", "p"));
/// assert!(sigma.is_delimiter(">"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Alphabet {
    /// Segment symbols, in declaration order.
    pub symbols: Vec<String>,

    /// Begin-of-string delimiter.
    #[cfg_attr(feature = "serde", serde(default = "default_bos"))]
    pub bos: String,

    /// End-of-string delimiter.
    #[cfg_attr(feature = "serde", serde(default = "default_eos"))]
    pub eos: String,

    /// Named symbol classes (e.g. `vowel`, `consonant`).
    #[cfg_attr(feature = "serde", serde(default))]
    pub classes: BTreeMap<String, Vec<String>>,
}

#[cfg(feature = "serde")]
fn default_bos() -> String {
    DEFAULT_BOS.to_string()
}

#[cfg(feature = "serde")]
fn default_eos() -> String {
    DEFAULT_EOS.to_string()
}

impl Alphabet {
    /// Creates an alphabet with the default delimiters.
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symbols: symbols.into_iter().map(Into::into).collect(),
            bos: DEFAULT_BOS.to_string(),
            eos: DEFAULT_EOS.to_string(),
            classes: BTreeMap::new(),
        }
    }

    /// Replaces the delimiters.
    pub fn with_delimiters(mut self, bos: impl Into<String>, eos: impl Into<String>) -> Self {
        self.bos = bos.into();
        self.eos = eos.into();
        self
    }

    /// Adds a named symbol class.
    pub fn with_class<I, S>(mut self, name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classes
            .insert(name.into(), members.into_iter().map(Into::into).collect());
        self
    }

    /// Returns true if `symbol` is a segment of this alphabet.
    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.iter().any(|s| s == symbol)
    }

    /// Returns true if `symbol` is the begin or end delimiter.
    pub fn is_delimiter(&self, symbol: &str) -> bool {
        symbol == self.bos || symbol == self.eos
    }

    /// Returns the members of a class, if declared.
    pub fn class(&self, name: &str) -> Option<&[String]> {
        self.classes.get(name).map(Vec::as_slice)
    }

    /// Returns true if `symbol` belongs to the named class.
    ///
    /// Undeclared classes have no members.
    pub fn in_class(&self, name: &str, symbol: &str) -> bool {
        self.class(name)
            .is_some_and(|members| members.iter().any(|m| m == symbol))
    }

    /// Number of segment symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if there are no segment symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
