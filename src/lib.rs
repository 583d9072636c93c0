//! # dawgdict
//!
//! A minimal [DAWG](https://en.wikipedia.org/wiki/Deterministic_acyclic_finite_state_automaton)
//! (Directed Acyclic Word Graph) dictionary for Rust.
//!
//! A DAWG is a minimal acyclic finite-state automaton, a trie whose common
//! suffixes are shared as well as its prefixes. Words are added in sorted
//! order and the automaton is kept minimal as they arrive, following
//! [Daciuk et al. (2000)](https://arxiv.org/abs/cs/0007009v1).
//!
//! ## Features
//!
//! - **Generic over the label type**: `char`, `u8`, `u16`, or any type implementing
//!   [`DawgChar`](dawg::DawgChar)
//! - **Incremental**: only the path of the last word is ever unminimized
//! - **Perfect hashing**: [`rank`](dawg::Dawg::rank) and [`unrank`](dawg::Dawg::unrank)
//!   map words to `1..=len` and back
//! - **Wildcard search** with three length policies
//! - **Binary dump format** that is validated on load
//!
//! ## Quick Start
//!
//! ```
//! use dawgdict::dawg::builder::build_dawg;
//!
//! let dawg = build_dawg(["BAKE", "CAKE", "FAKE", "LAKE", "MAKE"]).unwrap();
//!
//! assert!(dawg.contains("CAKE"));
//! assert!(!dawg.contains("AKE"));
//! assert_eq!(dawg.rank("FAKE"), Some(3));
//! ```
//!
//! ## Generic Usage
//!
//! The DAWG is generic over the edge label type:
//!
//! ```
//! use dawgdict::dawg::Dawg;
//!
//! let mut dawg = Dawg::<u8>::new();
//! dawg.add_word([1, 2, 3]).unwrap();
//! dawg.add_word([1, 2, 4]).unwrap();
//! dawg.add_word([2, 3, 4]).unwrap();
//! dawg.finish();
//!
//! let bytes = dawg.dump();
//! let copy = Dawg::<u8>::load(&bytes).unwrap();
//! assert!(copy.contains([1, 2, 4]));
//! assert!(!copy.contains([1, 2, 5]));
//! ```

#![warn(missing_docs)]

/// Core DAWG data structure: automaton, builder, queries, and codec.
pub mod dawg;

pub use dawg::{Dawg, DawgError, FormatError, InvalidState, LengthPolicy, Lifecycle};
