//! Smolensky (1993) Grammar G0
//!
//! A context-free grammar recast as a battery of six soft constraints over
//! parse-tree nodes. Every non-terminal is penalized for needing a mother
//! and daughters, and rewarded for each one a rule licenses. With unit
//! weights, a tree is legal exactly when its total harmony is zero.
//!
//! ```text
//! S -> A0 | A1 | F0
//! A0 -> B C    A1 -> D E    F0 -> B E
//! ```

use statgram::prelude::*;
use statgram::StatgramError;
use statgram_test::smolensky::{g0_battery, g0_trees, g0_unit_weights, RULES};

fn main() -> Result<(), StatgramError> {
    statgram::console::init();

    println!("Smolensky (1993) Grammar G0");
    println!("===========================\n");

    println!("Rules:");
    for (mother, d0, d1) in RULES {
        match d1 {
            Some(d1) => println!("  {} -> {} {}", mother, d0, d1),
            None => println!("  {} -> {}", mother, d0),
        }
    }
    println!();

    let weights = ConstraintWeights::try_from_pairs(g0_unit_weights())?;
    let grammar = Grammar::new(g0_battery(), Stat::hg(weights));
    let trees = g0_trees()?;

    println!("Evaluation of trees:");
    for tree in &trees {
        let explanation = grammar.explain(tree)?;
        println!("{}  harmony = {}", tree, explanation.total);
        if explanation.ill_formed_count() > 0 {
            print!("{}", explanation);
            if let Some((name, violations)) = explanation.most_violated().first() {
                println!("  most violated: {} ({} violations)", name, violations);
            }
        }
        println!();
    }

    let legal = grammar.select_well_formed(&trees)?;
    println!("Legal trees ({} of {}):", legal.len(), trees.len());
    for tree in legal {
        println!("  {}  yield: {}", tree, tree.leaves().join(""));
    }

    Ok(())
}
