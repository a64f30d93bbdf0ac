//! CV Syllable Phonotactics
//!
//! Generates every string over `{T, N, V}` with a left-context acceptor,
//! scores each transition with four syllable-structure constraints and
//! prunes the ill-formed ones. The grammar is read from `hg.toml` and
//! `ot.yaml`, which weight and rank the same battery differently: HG lets
//! `PreferNasal` outweigh `NoCoda` on a word-final `N`, OT does not.

use std::collections::BTreeSet;
use std::path::Path;

use statgram::prelude::*;
use statgram::{Alphabet, ConstraintSet, StatgramError};

/// Builds the battery over the classes of `alphabet`.
fn syllable_battery(alphabet: &Alphabet) -> impl ConstraintSet<Transition> {
    let sigma = alphabet.clone();
    let syll_struc = move |t: &Transition| match t.src.last_symbol() {
        Some(prev)
            if (sigma.in_class("consonant", prev) && sigma.in_class("consonant", &t.label))
                || (sigma.in_class("vowel", prev) && sigma.in_class("vowel", &t.label)) =>
        {
            -1
        }
        _ => 0,
    };

    let sigma = alphabet.clone();
    let onset = move |t: &Transition| {
        let word_initial = t.src.last_symbol() == Some(sigma.bos.as_str());
        if word_initial && sigma.in_class("vowel", &t.label) {
            -1
        } else {
            0
        }
    };

    let sigma = alphabet.clone();
    let no_coda = move |t: &Transition| match t.src.last_symbol() {
        Some(prev) if *t.label == *sigma.eos && sigma.in_class("consonant", prev) => -1,
        _ => 0,
    };

    let sigma = alphabet.clone();
    let prefer_nasal = move |t: &Transition| {
        if *t.label == *sigma.eos && t.src.last_symbol() == Some("N") {
            1
        } else {
            0
        }
    };

    (
        constraint("SyllStruc", syll_struc),
        constraint("Onset", onset),
        constraint("NoCoda", no_coda),
        constraint("PreferNasal", prefer_nasal),
    )
}

/// Prunes the acceptor under one configuration and returns its words.
fn run(path: &Path) -> Result<BTreeSet<String>, Box<dyn std::error::Error>> {
    let config = GrammarConfig::load(path)?;
    let alphabet = config.alphabet.clone().unwrap_or_else(|| Alphabet::new(["T", "N", "V"]));
    let grammar = Grammar::from_config(syllable_battery(&alphabet), &config)?;

    let gen = Fst::left_context_acceptor(&alphabet, 1);
    println!(
        "{}: Gen has {} states, {} transitions",
        grammar.name().unwrap_or("grammar"),
        gen.num_states(),
        gen.num_transitions()
    );

    let pruned = grammar.prune(&gen)?;
    println!(
        "{}: Lang has {} states, {} transitions ({})",
        grammar.name().unwrap_or("grammar"),
        pruned.structure.num_states(),
        pruned.structure.num_transitions(),
        pruned.result
    );

    let max_length = grammar.max_length().unwrap_or(6);
    Ok(pruned.structure.accepted_strings(max_length))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    statgram::console::init();

    println!("CV Syllable Phonotactics");
    println!("========================\n");

    let dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let hg = run(&dir.join("hg.toml"))?;
    let ot = run(&dir.join("ot.yaml"))?;

    println!("\nHG words:");
    for word in &hg {
        println!("  {}", word);
    }

    println!("\nOT words:");
    for word in &ot {
        println!("  {}", word);
    }

    let hg_only: Vec<&String> = hg.difference(&ot).collect();
    println!("\nAccepted under HG only: {}", hg_only.len());
    for word in &hg_only {
        println!("  {}", word);
    }

    if !ot.is_subset(&hg) {
        return Err(Box::new(StatgramError::Config(
            "OT accepted a word HG rejected".to_string(),
        )));
    }
    if hg_only.is_empty() {
        return Err(Box::new(StatgramError::Config(
            "HG and OT accepted the same words".to_string(),
        )));
    }
    Ok(())
}
