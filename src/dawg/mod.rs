/// Incremental construction: word conversion, the frontier engine, and file ingestion.
pub mod builder;
/// Traits for types that can serve as DAWG edge labels.
pub mod char_trait;
/// Sorted per-state transition tables.
pub mod children;
/// Binary dump format.
pub(crate) mod codec;
/// Error taxonomy.
pub mod error;
/// Graph traversals, statistics, and the visualization export.
pub mod graph;
/// Slot arena owning every state.
pub mod node_arena;
pub(crate) mod numbering;
/// Lookups, enumeration, wildcard search, and detached cursors.
pub mod query;
pub(crate) mod register;

use std::cell::OnceCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;

pub use builder::IntoWord;
pub use char_trait::{DawgChar, DumpChar};
pub use error::{DawgError, FormatError, InvalidState};
pub use graph::{DawgGraph, DawgStats, GraphEdge, GraphNode};
pub use node_arena::{Node, StateId};
pub use query::{Cursor, LengthPolicy, Words};

use builder::BuilderCore;
use node_arena::NodeArena;
use numbering::Numbering;
use query::Traversal;
use register::Register;

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(0);

fn next_instance() -> u64 {
    NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed)
}

/// Where an automaton is in its life.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// No word has been added since creation or the last `clear()`.
    #[default]
    Empty,
    /// Accepting words. The path of the last word is not minimized yet.
    Active,
    /// Minimal and frozen; `add_word` fails until `clear()`.
    Closed,
}

/// A minimal acyclic automaton over words of `C`, built incrementally from
/// sorted input.
///
/// Words are added in lexicographic order with [`add_word`](Dawg::add_word).
/// Each insertion minimizes whatever part of the previous word's path can no
/// longer change, so at any time only that one path is unshared. Call
/// [`finish`](Dawg::finish) after the last word to minimize it too.
///
/// Every query works in every lifecycle state.
///
/// ```
/// use dawgdict::dawg::{Dawg, LengthPolicy};
///
/// let mut dawg = Dawg::<char>::new();
/// for word in ["bake", "cake", "caked", "fake"] {
///     dawg.add_word(word).unwrap();
/// }
/// dawg.finish();
///
/// assert!(dawg.contains("caked"));
/// assert!(dawg.matches("cak"));
/// assert_eq!(dawg.longest_prefix("cakewalk"), 4);
/// assert_eq!(dawg.rank("cake"), Some(2));
///
/// let found: Vec<String> = dawg
///     .find_all("?ake", '?', LengthPolicy::Exact)
///     .map(|w| w.into_iter().collect())
///     .collect();
/// assert_eq!(found, ["bake", "cake", "fake"]);
/// ```
pub struct Dawg<C: DawgChar> {
    pub(crate) arena: NodeArena<C>,
    pub(crate) root: StateId,
    pub(crate) register: Register<C>,
    pub(crate) builder: BuilderCore<C>,
    size: usize,
    longest_word: usize,
    lifecycle: Lifecycle,
    version: u64,
    instance: u64,
    numbering: OnceCell<Numbering>,
}

impl<C: DawgChar> Dawg<C> {
    /// Creates an empty automaton.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty automaton with room for `states` states before reallocating.
    pub fn with_capacity(states: usize) -> Self {
        let mut arena = NodeArena::with_capacity(states);
        let root = arena.create(false);
        Self::from_parts(
            arena,
            root,
            Register::new(),
            BuilderCore::new(root),
            0,
            0,
            Lifecycle::Empty,
        )
    }

    pub(crate) fn from_parts(
        arena: NodeArena<C>,
        root: StateId,
        register: Register<C>,
        builder: BuilderCore<C>,
        size: usize,
        longest_word: usize,
        lifecycle: Lifecycle,
    ) -> Self {
        Dawg {
            arena,
            root,
            register,
            builder,
            size,
            longest_word,
            lifecycle,
            version: 0,
            instance: next_instance(),
            numbering: OnceCell::new(),
        }
    }

    /// Adds a word. Returns `Ok(true)` if it was new, `Ok(false)` if it was
    /// already accepted.
    ///
    /// Words must arrive in lexicographic order; repeating the previous word
    /// is allowed.
    ///
    /// # Errors
    ///
    /// - [`DawgError::OrderingViolation`] if `word` sorts before the previous
    ///   word. Nothing is changed.
    /// - [`InvalidState::Closed`] after [`close`](Dawg::close).
    pub fn add_word(&mut self, word: impl IntoWord<C>) -> Result<bool, DawgError<C>> {
        self.insert(&word.collect_word(), true)
    }

    /// Adds a word without the ordering check.
    ///
    /// The caller promises sorted input. A word that breaks the promise may
    /// silently drop previously added words; the automaton stays acyclic and
    /// [`len`](Dawg::len) stays accurate.
    ///
    /// # Errors
    ///
    /// [`InvalidState::Closed`] after [`close`](Dawg::close).
    pub fn add_word_unchecked(&mut self, word: impl IntoWord<C>) -> Result<bool, DawgError<C>> {
        self.insert(&word.collect_word(), false)
    }

    fn insert(&mut self, word: &[C], checked: bool) -> Result<bool, DawgError<C>> {
        if self.lifecycle == Lifecycle::Closed {
            return Err(InvalidState::Closed.into());
        }
        let insertion = self
            .builder
            .add_word(&mut self.arena, &mut self.register, word, checked)?;
        self.lifecycle = Lifecycle::Active;
        if insertion.modified {
            self.touch();
        }
        if insertion.overwrote {
            self.recount();
        } else if insertion.added {
            self.size += 1;
            self.longest_word = self.longest_word.max(word.len());
        }
        Ok(insertion.added)
    }

    /// Recomputes the word count and longest word from the graph.
    fn recount(&mut self) {
        let (order, _) = graph::postorder(&self.arena, self.root);
        let longest = graph::longest_paths(&self.arena, &order);
        self.longest_word = longest[self.root.index()].unwrap_or(0);
        self.size = self.numbering().count(self.root);
        debug!("recounted after overwrite: {} words", self.size);
    }

    /// Minimizes the last word's path and freezes the automaton.
    ///
    /// Same as [`close`](Dawg::close); provided under the name batch builders
    /// expect. Calling it again is a no-op.
    pub fn finish(&mut self) {
        self.close();
    }

    /// Minimizes the last word's path and freezes the automaton. Further
    /// `add_word` calls fail with [`InvalidState::Closed`] until
    /// [`clear`](Dawg::clear).
    pub fn close(&mut self) {
        if self.lifecycle == Lifecycle::Closed {
            return;
        }
        self.builder
            .canonicalize_suffix(&mut self.arena, &mut self.register, 0);
        self.register.canonicalize(&self.arena, self.root);
        self.lifecycle = Lifecycle::Closed;
        self.touch();
        debug!(
            "closed dawg: {} words, {} states, {} registered",
            self.size,
            self.arena.len(),
            self.register.len()
        );
    }

    /// Drops every word and returns to [`Lifecycle::Empty`]. Outstanding
    /// cursors become stale.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.register.clear();
        self.root = self.arena.create(false);
        self.builder = BuilderCore::new(self.root);
        self.size = 0;
        self.longest_word = 0;
        self.lifecycle = Lifecycle::Empty;
        self.touch();
        debug!("cleared dawg");
    }

    /// Records a structural change: cached numbering is dropped and cursors
    /// taken before this point stop working.
    fn touch(&mut self) {
        self.version += 1;
        self.numbering.take();
    }

    pub(crate) fn is_snapshot(&self, instance: u64, version: u64) -> bool {
        self.instance == instance && self.version == version
    }

    pub(crate) fn numbering(&self) -> &Numbering {
        self.numbering
            .get_or_init(|| {
                // Every accepted word was inserted once, so the counts are
                // bounded by the number of insertions.
                Numbering::compute(&self.arena, self.root)
                    .expect("accept counts of a built automaton fit in usize")
            })
    }

    /// Number of accepted words.
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    /// True if no word is accepted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Current lifecycle state.
    #[inline]
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Length of the longest accepted word, 0 if there is none.
    #[inline]
    pub fn longest_word(&self) -> usize {
        self.longest_word
    }

    /// Number of states currently allocated, reachable or not.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// The start state, for walking the graph by hand.
    pub fn root(&self) -> Node<'_, C> {
        Node::new(&self.arena, self.root)
    }

    /// True if `word` is accepted.
    pub fn exists(&self, word: impl IntoWord<C>) -> bool {
        let word = word.collect_word();
        let (len, state) = query::walk(&self.arena, self.root, &word);
        len == word.len() && self.arena.state(state).is_final()
    }

    /// Same as [`exists`](Dawg::exists).
    #[inline]
    pub fn contains(&self, word: impl IntoWord<C>) -> bool {
        self.exists(word)
    }

    /// True if `word` is a non-empty prefix of some accepted word.
    pub fn matches(&self, word: impl IntoWord<C>) -> bool {
        let word = word.collect_word();
        !word.is_empty() && query::walk(&self.arena, self.root, &word).0 == word.len()
    }

    /// Number of leading letters of `word` that can be followed from the start state.
    pub fn longest_prefix(&self, word: impl IntoWord<C>) -> usize {
        query::walk(&self.arena, self.root, &word.collect_word()).0
    }

    /// All accepted words in lexicographic order.
    pub fn words(&self) -> Words<'_, C> {
        Words::new(&self.arena, Traversal::all(self.root))
    }

    /// Same as [`words`](Dawg::words).
    #[inline]
    pub fn iter(&self) -> Words<'_, C> {
        self.words()
    }

    /// Accepted words matching `pattern`, where `wildcard` stands for any
    /// single letter, filtered by `policy`. Words come out in lexicographic
    /// order.
    pub fn find_all(
        &self,
        pattern: impl IntoWord<C>,
        wildcard: C,
        policy: LengthPolicy,
    ) -> Words<'_, C> {
        Words::new(&self.arena, self.pattern_traversal(pattern, wildcard, policy))
    }

    /// A detached handle enumerating [`words`](Dawg::words).
    pub fn cursor(&self) -> Cursor<C> {
        Cursor::new(self.instance, self.version, Traversal::all(self.root))
    }

    /// A detached handle enumerating [`find_all`](Dawg::find_all).
    pub fn find_all_cursor(
        &self,
        pattern: impl IntoWord<C>,
        wildcard: C,
        policy: LengthPolicy,
    ) -> Cursor<C> {
        let traversal = self.pattern_traversal(pattern, wildcard, policy);
        Cursor::new(self.instance, self.version, traversal)
    }

    fn pattern_traversal(
        &self,
        pattern: impl IntoWord<C>,
        wildcard: C,
        policy: LengthPolicy,
    ) -> Traversal<C> {
        let symbols = pattern.collect_word().into_vec();
        Traversal::matching(self.root, symbols, wildcard, policy)
    }

    /// Position of `word` among the accepted words in lexicographic order,
    /// counting from 1, or `None` if it is not accepted.
    ///
    /// ```
    /// use dawgdict::dawg::builder::build_dawg;
    ///
    /// let dawg = build_dawg(["ant", "bee", "cat"]).unwrap();
    /// assert_eq!(dawg.rank("bee"), Some(2));
    /// assert_eq!(dawg.unrank(3), Some("cat".chars().collect()));
    /// assert_eq!(dawg.rank("dog"), None);
    /// ```
    pub fn rank(&self, word: impl IntoWord<C>) -> Option<usize> {
        self.numbering()
            .rank(&self.arena, self.root, &word.collect_word())
    }

    /// The word at position `index` (from 1), or `None` outside `1..=len()`.
    pub fn unrank(&self, index: usize) -> Option<Vec<C>> {
        self.numbering().unrank(&self.arena, self.root, index)
    }

    /// Reachable states and transitions, for rendering.
    pub fn graph(&self) -> DawgGraph<C> {
        graph::export(&self.arena, self.root)
    }

    /// Size summary of the reachable automaton.
    pub fn stats(&self) -> DawgStats {
        graph::stats(&self.arena, self.root, self.size, self.longest_word)
    }

    #[cfg(test)]
    pub(crate) fn register_len(&self) -> usize {
        self.register.len()
    }
}

impl<C: DumpChar> Dawg<C> {
    /// Serializes the automaton.
    ///
    /// The output depends only on the accepted language and lifecycle state,
    /// so equal automata dump to equal bytes. An active automaton keeps its
    /// last word, and insertion can resume after [`load`](Dawg::load).
    pub fn dump(&self) -> Vec<u8> {
        codec::dump(self)
    }

    /// Writes the [`dump`](Dawg::dump) output to `wtr`.
    ///
    /// # Errors
    ///
    /// Any I/O error raised by `wtr`.
    pub fn dump_to<W: std::io::Write>(&self, wtr: W) -> std::io::Result<()> {
        codec::dump_to(self, wtr)
    }

    /// Rebuilds an automaton from [`dump`](Dawg::dump) output.
    ///
    /// # Errors
    ///
    /// A [`FormatError`] if the buffer is truncated, was written for another
    /// label width, or does not describe a minimal acyclic automaton.
    pub fn load(bytes: &[u8]) -> Result<Self, FormatError> {
        codec::load(bytes)
    }
}

impl<C: DawgChar> Default for Dawg<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: DawgChar> Clone for Dawg<C> {
    /// Deep copy. The copy is a distinct automaton: cursors of the original do
    /// not work on it.
    fn clone(&self) -> Self {
        Dawg {
            arena: self.arena.clone(),
            root: self.root,
            register: self.register.clone(),
            builder: self.builder.clone(),
            size: self.size,
            longest_word: self.longest_word,
            lifecycle: self.lifecycle,
            version: 0,
            instance: next_instance(),
            numbering: self.numbering.clone(),
        }
    }
}

/// Two automata are equal when they accept the same words.
impl<C: DawgChar> PartialEq for Dawg<C> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.words().eq(other.words())
    }
}

impl<C: DawgChar> Eq for Dawg<C> {}

impl<C: DawgChar> Hash for Dawg<C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.size.hash(state);
        for word in self.words() {
            word.hash(state);
        }
    }
}

impl<C: DawgChar> fmt::Debug for Dawg<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dawg")
            .field("words", &self.size)
            .field("states", &self.arena.len())
            .field("lifecycle", &self.lifecycle)
            .finish()
    }
}

impl<'a, C: DawgChar> IntoIterator for &'a Dawg<C> {
    type Item = Vec<C>;
    type IntoIter = Words<'a, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.words()
    }
}
