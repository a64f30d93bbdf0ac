//! The end-to-end pipeline: Eval, then Stat, then Prune.
//!
//! Logging levels:
//! - **INFO**: One event per pruned structure or filtered candidate set
//! - **DEBUG**: Evaluation and aggregation summaries (from `statgram-scoring`)

use std::fmt;

use tracing::info;

use statgram_config::{GrammarConfig, HarmonyConfig};
use statgram_core::{Alphabet, CandidateStructure, Result, StatgramError};
use statgram_scoring::{
    explain, stat, ConstraintRanks, ConstraintSet, ConstraintWeights, Evaluator,
    HarmonyExplanation, HarmonyFunction, HarmonyResult, IgnoreLabels, Markup, Stat,
};

/// Ignore predicate for the alphabet's begin and end delimiters.
pub fn ignore_boundaries(alphabet: &Alphabet) -> IgnoreLabels {
    IgnoreLabels::new([alphabet.bos.as_str(), alphabet.eos.as_str()])
}

/// A constraint battery with fixed aggregation semantics.
///
/// Each run is independent: weights and ranks are immutable inputs and
/// nothing is remembered between runs.
///
/// # Example
///
/// ```
/// use statgram::{Grammar, Stat, ConstraintWeights};
/// use statgram_core::{constraint, Fst, Transition};
///
/// let no_b = constraint("NoB", |t: &Transition| if &*t.label == "b" { -1 } else { 0 });
/// let grammar = Grammar::new((no_b,), Stat::hg(
///     ConstraintWeights::try_from_pairs([("NoB", 1.0)]).unwrap(),
/// ));
///
/// let mut m = Fst::new(0);
/// m.add_final(0);
/// m.add_transition(0, "a", 0);
/// m.add_transition(0, "b", 0);
///
/// let pruned = grammar.prune(&m).unwrap();
/// assert_eq!(pruned.result.ill_formed_count(), 1);
/// assert_eq!(pruned.structure.num_transitions(), 1);
/// ```
pub struct Grammar<C> {
    battery: C,
    stat: Stat,
    ignore: IgnoreLabels,
    parallel: bool,
    name: Option<String>,
    max_length: Option<usize>,
}

impl<C> Grammar<C> {
    /// Creates a grammar that evaluates every element sequentially.
    pub fn new(battery: C, stat: Stat) -> Self {
        Self {
            battery,
            stat,
            ignore: IgnoreLabels::default(),
            parallel: false,
            name: None,
            max_length: None,
        }
    }

    /// Builds a grammar from configuration.
    ///
    /// The configuration is validated here; whether its table covers the
    /// battery is checked at the start of every run, before any scoring.
    pub fn from_config(battery: C, config: &GrammarConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| StatgramError::Config(e.to_string()))?;

        let stat = match &config.harmony {
            HarmonyConfig::Hg { weights } => Stat::hg(ConstraintWeights::try_from_pairs(
                weights.iter().map(|(name, &w)| (name.as_str(), w)),
            )?),
            HarmonyConfig::Ot { ranking } => {
                Stat::ot(ConstraintRanks::from_dominance_order(ranking.iter().map(String::as_str)))
            }
        };

        let mut grammar = Self::new(battery, stat).parallel(config.evaluation.parallel);
        if config.evaluation.ignore_boundaries {
            let alphabet = config
                .alphabet
                .clone()
                .unwrap_or_else(|| Alphabet::new(Vec::<String>::new()));
            grammar = grammar.ignoring_boundaries(&alphabet);
        }
        grammar.name = config.name.clone();
        grammar.max_length = config.evaluation.max_length;
        Ok(grammar)
    }

    /// Skips elements labelled with the alphabet's delimiters.
    pub fn ignoring_boundaries(mut self, alphabet: &Alphabet) -> Self {
        self.ignore = ignore_boundaries(alphabet);
        self
    }

    /// Skips elements with any of the given labels.
    pub fn ignoring_labels(mut self, ignore: IgnoreLabels) -> Self {
        self.ignore = ignore;
        self
    }

    /// Evaluates elements across the rayon thread pool when `parallel`.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn battery(&self) -> &C {
        &self.battery
    }

    pub fn stat(&self) -> &Stat {
        &self.stat
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Bound on accepted-string enumeration, if configured.
    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    /// Applies the battery to every non-ignored element of `structure`.
    pub fn markup<'s, S>(&self, structure: &'s S) -> Markup<S::Element<'s>>
    where
        S: CandidateStructure,
        S::Element<'s>: Send + Sync,
        C: ConstraintSet<S::Element<'s>>,
    {
        let evaluator = Evaluator::new(&self.battery).ignoring(self.ignore.clone());
        if self.parallel {
            evaluator.par_eval(structure.elements())
        } else {
            evaluator.eval(structure.elements())
        }
    }

    /// Fails if a battery constraint has no weight or rank.
    pub fn check_coverage<E>(&self) -> Result<()>
    where
        C: ConstraintSet<E>,
    {
        self.stat.ensure_covers(&self.battery.names())
    }

    /// Total harmony and ill-formed elements of one structure.
    pub fn evaluate<'s, S>(&self, structure: &'s S) -> Result<HarmonyResult<S::Element<'s>>>
    where
        S: CandidateStructure,
        S::Element<'s>: Send + Sync,
        C: ConstraintSet<S::Element<'s>>,
    {
        self.check_coverage::<S::Element<'s>>()?;
        stat(&self.markup(structure), &self.stat)
    }

    /// Per-element breakdown of one structure's harmony.
    pub fn explain<'s, S>(&self, structure: &'s S) -> Result<HarmonyExplanation<S::Element<'s>>>
    where
        S: CandidateStructure,
        S::Element<'s>: Send + Sync,
        C: ConstraintSet<S::Element<'s>>,
    {
        self.check_coverage::<S::Element<'s>>()?;
        explain(&self.markup(structure), &self.stat)
    }

    /// Evaluates the whole structure, then rebuilds it without the
    /// ill-formed elements.
    ///
    /// An acceptor that accepts nothing afterwards is a legitimate outcome,
    /// not an error.
    pub fn prune<'s, S>(&self, structure: &'s S) -> Result<Pruned<'s, S>>
    where
        S: CandidateStructure,
        S::Element<'s>: Send + Sync,
        C: ConstraintSet<S::Element<'s>>,
    {
        let result = self.evaluate(structure)?;
        let pruned = structure.prune(&result.ill_formed_set());

        info!(
            event = "prune_done",
            semantics = self.stat.semantics(),
            evaluated = result.evaluated,
            removed = result.ill_formed_count(),
            total_harmony = result.total.value(),
            empty = pruned.is_empty(),
        );
        Ok(Pruned {
            result,
            structure: pruned,
        })
    }

    /// Whole-candidate filtering: keeps candidates with no ill-formed element.
    ///
    /// Candidates are discarded wholesale rather than partially edited, in
    /// input order.
    pub fn select_well_formed<'s, S>(&self, candidates: &'s [S]) -> Result<Vec<&'s S>>
    where
        S: CandidateStructure,
        S::Element<'s>: Send + Sync,
        C: ConstraintSet<S::Element<'s>>,
    {
        let mut kept = Vec::new();
        for candidate in candidates {
            if self.evaluate(candidate)?.is_well_formed() {
                kept.push(candidate);
            }
        }

        info!(
            event = "select_done",
            semantics = self.stat.semantics(),
            candidates = candidates.len(),
            well_formed = kept.len(),
        );
        Ok(kept)
    }
}

impl<C> fmt::Debug for Grammar<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar")
            .field("name", &self.name)
            .field("stat", &self.stat)
            .field("ignore", &self.ignore)
            .field("parallel", &self.parallel)
            .finish()
    }
}

/// A pruned structure and the result that drove the pruning.
pub struct Pruned<'s, S: CandidateStructure + 's> {
    pub result: HarmonyResult<S::Element<'s>>,
    pub structure: S,
}

impl<S: CandidateStructure> Pruned<'_, S> {
    /// Returns true if nothing was removed.
    pub fn is_unchanged(&self) -> bool {
        self.result.is_well_formed()
    }
}
