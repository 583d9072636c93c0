use log::{debug, trace};
use smallvec::SmallVec;

use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::char_trait::DawgChar;
use super::error::DawgError;
use super::node_arena::{NodeArena, StateId};
use super::register::Register;
use super::Dawg;

/// Trait for types that can be used as a word when building or querying a DAWG.
///
/// Implemented for common string and sequence types so that
/// [`Dawg::add_word`] and [`build_dawg`] accept them directly without manual
/// conversion.
pub trait IntoWord<C: DawgChar> {
    /// Collects this word into a character buffer.
    fn collect_word(self) -> SmallVec<[C; 32]>;
}

// String types → char

impl IntoWord<char> for &str {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

impl IntoWord<char> for &&str {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

impl IntoWord<char> for String {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

impl IntoWord<char> for &String {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

// Generic sequence types → C

impl<C: DawgChar> IntoWord<C> for &[C] {
    fn collect_word(self) -> SmallVec<[C; 32]> {
        self.iter().copied().collect()
    }
}

impl<C: DawgChar> IntoWord<C> for Vec<C> {
    fn collect_word(self) -> SmallVec<[C; 32]> {
        self.into_iter().collect()
    }
}

impl<C: DawgChar> IntoWord<C> for &Vec<C> {
    fn collect_word(self) -> SmallVec<[C; 32]> {
        self.iter().copied().collect()
    }
}

impl<C: DawgChar, const N: usize> IntoWord<C> for [C; N] {
    fn collect_word(self) -> SmallVec<[C; 32]> {
        self.into_iter().collect()
    }
}

impl<C: DawgChar, const N: usize> IntoWord<C> for &[C; N] {
    fn collect_word(self) -> SmallVec<[C; 32]> {
        self.iter().copied().collect()
    }
}

/// What a single insertion did to the automaton.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Insertion {
    /// The word was not accepted before.
    pub added: bool,
    /// States were created, merged, or changed finality.
    pub modified: bool,
    /// An existing edge was overwritten, dropping the words below it.
    /// Only possible for out-of-order unchecked input.
    pub overwrote: bool,
}

#[derive(Clone, Debug)]
struct BuildState<C: DawgChar> {
    ch: C,
    state: StateId,
}

/// The incremental construction engine.
///
/// Holds the frontier: the path spelled by the previously inserted word,
/// `frontier[0]` being the start state and `frontier[i]` the state reached
/// after `i` letters. Frontier states are private to that path and are not
/// in the register; everything hanging off the frontier is canonical.
///
/// When a new word diverges from the previous one at depth `i`, no later word
/// can extend the frontier below `i` again, so that tail is minimized
/// deepest-first and the new suffix is appended in its place.
#[derive(Clone, Debug)]
pub(crate) struct BuilderCore<C: DawgChar> {
    frontier: Vec<BuildState<C>>,
}

impl<C: DawgChar> BuilderCore<C> {
    /// Creates an engine whose frontier is just the start state.
    pub(crate) fn new(root: StateId) -> Self {
        BuilderCore {
            frontier: vec![BuildState {
                ch: C::default(),
                state: root,
            }],
        }
    }

    /// Recreates an engine whose frontier is the given path, start state first.
    pub(crate) fn with_path(root: StateId, path: impl IntoIterator<Item = (C, StateId)>) -> Self {
        let mut core = Self::new(root);
        core.frontier
            .extend(path.into_iter().map(|(ch, state)| BuildState { ch, state }));
        core
    }

    /// Adds a word, minimizing whatever part of the frontier it leaves behind.
    ///
    /// In checked mode an out-of-order word is rejected before anything is
    /// touched. In unchecked mode the caller promises sorted input; a word that
    /// breaks the promise may overwrite existing branches.
    pub(crate) fn add_word(
        &mut self,
        arena: &mut NodeArena<C>,
        register: &mut Register<C>,
        word: &[C],
        checked: bool,
    ) -> Result<Insertion, DawgError<C>> {
        let prefix_length = self.prefix_length(word, checked)?;
        let merged = self.canonicalize_suffix(arena, register, prefix_length);

        if prefix_length == word.len() {
            let end = self.last_state();
            if arena.state(end).is_final() {
                return Ok(Insertion {
                    added: false,
                    modified: merged,
                    overwrote: false,
                });
            }
            arena.set_final(end, true);
            return Ok(Insertion {
                added: true,
                modified: true,
                overwrote: false,
            });
        }

        let mut overwrote = false;
        for &ch in &word[prefix_length..] {
            let parent = self.last_state();
            let child = arena.create(false);
            overwrote |= arena.set_transition(parent, ch, child).is_some();
            self.frontier.push(BuildState { ch, state: child });
        }
        arena.set_final(self.last_state(), true);
        Ok(Insertion {
            added: true,
            modified: true,
            overwrote,
        })
    }

    /// Length of the common prefix of `word` and the previous word.
    ///
    /// With `checked`, fails if `word` sorts before the previous word. An equal
    /// word is a duplicate, not an error.
    fn prefix_length(&self, word: &[C], checked: bool) -> Result<usize, DawgError<C>> {
        let mut prefix_len = 0;
        for &ch in word {
            match self.frontier.get(prefix_len + 1) {
                Some(prev_state) if ch == prev_state.ch => prefix_len += 1,
                Some(prev_state) if ch < prev_state.ch && checked => {
                    return Err(self.order_error(word));
                }
                _ => break,
            }
        }
        // A proper prefix of the previous word sorts before it.
        if checked && prefix_len == word.len() && self.frontier.len() > word.len() + 1 {
            return Err(self.order_error(word));
        }
        Ok(prefix_len)
    }

    fn order_error(&self, word: &[C]) -> DawgError<C> {
        let previous = self.previous_word();
        debug!("rejecting out-of-order word {word:?} after {previous:?}");
        DawgError::OrderingViolation {
            previous,
            current: word.to_vec(),
        }
    }

    /// The word spelled by the frontier.
    pub(crate) fn previous_word(&self) -> Vec<C> {
        self.frontier[1..].iter().map(|e| e.ch).collect()
    }

    /// Minimizes the frontier below depth `target_length`, deepest state first.
    ///
    /// Each popped state either merges into its registered equivalent (the
    /// parent edge is redirected and the state freed) or becomes canonical
    /// itself. Returns true if anything was popped.
    pub(crate) fn canonicalize_suffix(
        &mut self,
        arena: &mut NodeArena<C>,
        register: &mut Register<C>,
        target_length: usize,
    ) -> bool {
        assert!(self.frontier.len() > target_length);
        let target_length = target_length
            .checked_add(1)
            .expect("target_length overflow");
        let popped = self.frontier.len() > target_length;
        while self.frontier.len() > target_length {
            let entry = self.pop_build_state();
            match register.find_equivalent(arena, entry.state) {
                Some(canonical) => {
                    let parent = self.last_state();
                    trace!("merging {:?} into {:?} under {:?}", entry.state, canonical, entry.ch);
                    arena.set_transition(parent, entry.ch, canonical);
                    arena.delete(entry.state);
                }
                None => {
                    register.insert_canonical(arena, entry.state);
                }
            }
        }
        popped
    }

    fn pop_build_state(&mut self) -> BuildState<C> {
        self.frontier
            .pop()
            .expect("Build state will always have at least one entry")
    }

    fn last_state(&self) -> StateId {
        self.frontier
            .last()
            .expect("Build state will always have at least one entry")
            .state
    }
}

/// Builds a minimal, closed DAWG from an iterator of words.
///
/// Each word must implement [`IntoWord`], allowing this function to accept
/// `&str`, `String`, slices, vectors, arrays, or any other supported word type.
///
/// Words **must** be provided in lexicographically sorted order, or this function will
/// return an error. Repeated words are accepted and stored once.
///
/// # Examples
///
/// Building from byte sequences:
///
/// ```
/// use dawgdict::dawg::builder::build_dawg;
///
/// let words: Vec<Vec<u8>> = vec![vec![1, 2, 3], vec![1, 2, 4], vec![2, 3, 4]];
/// let dawg = build_dawg(words).unwrap();
///
/// assert!(dawg.contains([1u8, 2, 3]));
/// assert!(!dawg.contains([1u8, 2, 5]));
/// ```
///
/// Building from strings:
///
/// ```
/// use dawgdict::dawg::builder::build_dawg;
///
/// let dawg = build_dawg(["APPLE", "BANANA", "CHERRY"]).unwrap();
/// assert!(dawg.contains("BANANA"));
/// assert!(!dawg.contains("APRICOT"));
/// ```
pub fn build_dawg<C, W>(words: impl IntoIterator<Item = W>) -> Result<Dawg<C>, DawgError<C>>
where
    C: DawgChar,
    W: IntoWord<C>,
{
    let mut dawg = Dawg::new();
    for word in words {
        dawg.add_word(word)?;
    }
    dawg.finish();
    Ok(dawg)
}

/// Builds a closed DAWG from a reader yielding one word per line.
///
/// Words must be in sorted order. Trailing whitespace is trimmed; empty lines
/// and lines starting with '#' are skipped.
pub fn build_dawg_from_reader(reader: impl BufRead) -> Result<Dawg<char>, Box<dyn Error>> {
    let mut dawg = Dawg::new();
    let mut reader = reader;

    // Instead of using BufRead::lines() we call read_line repeatedly, which
    // reuses the same string instead of allocating a new one per line.
    let mut buf = String::with_capacity(80);
    loop {
        let bytes_read = reader.read_line(&mut buf);
        match bytes_read {
            Ok(0) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
        let word = buf.trim_end();
        if !word.is_empty() && !is_comment(word) {
            dawg.add_word(word)?;
        }
        buf.clear();
    }
    dawg.finish();
    Ok(dawg)
}

/// Builds a closed DAWG from a dictionary file.
///
/// Reads words from a text file (one word per line) and constructs a DAWG. Words must
/// be in sorted order. Lines starting with '#' are treated as comments and ignored.
/// Empty lines are skipped.
///
/// # Examples
///
/// ```no_run
/// use dawgdict::dawg::builder::build_dawg_from_file;
///
/// let dawg = build_dawg_from_file("dictionary.txt").unwrap();
/// ```
pub fn build_dawg_from_file(path: impl AsRef<Path>) -> Result<Dawg<char>, Box<dyn Error>> {
    let file = File::open(path)?;
    build_dawg_from_reader(BufReader::new(file))
}

/// Returns true if this line is a comment.
pub(crate) fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}
