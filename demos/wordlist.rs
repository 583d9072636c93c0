//! Example: building a Wordlist wrapper around a Dawg.
//!
//! This shows how to put a small domain API on top of the automaton. The
//! `Wordlist` struct owns a closed `Dawg` and provides word lookup, prefix
//! checking, crossword-style pattern search, and stable word numbers.
//!
//! Run with: cargo run --example wordlist

use dawgdict::dawg::builder::build_dawg;
use dawgdict::dawg::{Dawg, LengthPolicy};

/// A convenient wrapper around a DAWG for word validation.
struct Wordlist {
    dawg: Dawg<char>,
}

impl Wordlist {
    fn new(dawg: Dawg<char>) -> Self {
        Wordlist { dawg }
    }

    /// Returns true if the word is in the wordlist.
    fn is_word(&self, word: &str) -> bool {
        self.dawg.contains(word)
    }

    /// Returns true if any word in the wordlist starts with the given prefix.
    fn has_prefix(&self, prefix: &str) -> bool {
        self.dawg.matches(prefix)
    }

    /// Returns all words matching a pattern where '.' stands for any letter.
    fn solve(&self, pattern: &str) -> Vec<String> {
        self.dawg
            .find_all(pattern, '.', LengthPolicy::Exact)
            .map(|w| w.into_iter().collect())
            .collect()
    }

    /// Returns all words in the wordlist.
    fn all_words(&self) -> Vec<String> {
        self.dawg.iter().map(|w| w.into_iter().collect()).collect()
    }
}

fn main() {
    let words = ["BAKE", "BAKED", "BAKER", "CAKE", "CAKED", "FAKE", "LAKE"];
    let wordlist = Wordlist::new(build_dawg(words).unwrap());

    // Word lookup
    println!("Word lookup:");
    for word in ["BAKE", "BAKER", "BAKES", "CAKE", "LAKE", "MAKE"] {
        println!("  {word}: {}", if wordlist.is_word(word) { "yes" } else { "no" });
    }

    // Prefix checking
    println!("\nPrefix checking:");
    for prefix in ["BA", "CAK", "MA", "FAK"] {
        println!("  {prefix}*: {}", if wordlist.has_prefix(prefix) { "yes" } else { "no" });
    }

    // Pattern search
    println!("\nPattern search:");
    for pattern in [".AKE", "BAKE.", "...ED"] {
        println!("  {pattern}: {:?}", wordlist.solve(pattern));
    }

    // Word numbers
    println!("\nWord numbers:");
    for word in ["BAKE", "CAKE", "LAKE"] {
        println!("  {word}: {:?}", wordlist.dawg.rank(word));
    }

    // List all words
    println!("\nAll words: {:?}", wordlist.all_words());

    let stats = wordlist.dawg.stats();
    println!(
        "\n{} words in {} states and {} edges",
        stats.words_count, stats.nodes_count, stats.edges_count
    );
}
