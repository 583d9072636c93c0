//! Read-side walks over the automaton: exact lookup, prefix tests, word
//! enumeration, and wildcard search.

use super::char_trait::DawgChar;
use super::error::InvalidState;
use super::node_arena::{NodeArena, StateId};
use super::Dawg;

/// Follows `word` from `root` as far as transitions exist.
///
/// Returns the number of letters consumed and the state reached.
pub(crate) fn walk<C: DawgChar>(
    arena: &NodeArena<C>,
    root: StateId,
    word: &[C],
) -> (usize, StateId) {
    let mut state = root;
    for (i, &ch) in word.iter().enumerate() {
        match arena.get_transition(state, ch) {
            Some(next) => state = next,
            None => return (i, state),
        }
    }
    (word.len(), state)
}

/// How [`Dawg::find_all`] relates the length of a word to the length of the pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LengthPolicy {
    /// The word is exactly as long as the pattern.
    Exact,
    /// The word is at most as long as the pattern and matches the pattern's
    /// leading letters; the rest of the pattern is ignored.
    AtMostPrefix,
    /// The word is at least as long as the pattern and begins with a match of
    /// the whole pattern; the word's remaining letters are unconstrained.
    AtLeastPrefix,
}

#[derive(Clone, Debug)]
struct Pattern<C: DawgChar> {
    symbols: Vec<C>,
    wildcard: C,
    policy: LengthPolicy,
}

impl<C: DawgChar> Pattern<C> {
    /// True if a word of length `depth` ending at a final state is reported.
    fn accepts_length(&self, depth: usize) -> bool {
        let len = self.symbols.len();
        match self.policy {
            LengthPolicy::Exact => depth == len,
            LengthPolicy::AtMostPrefix => depth <= len,
            LengthPolicy::AtLeastPrefix => depth >= len,
        }
    }

    /// True if the edge labeled `ch` may be taken out of a state at `depth`.
    fn allows(&self, depth: usize, ch: C) -> bool {
        match self.symbols.get(depth) {
            Some(&p) => p == self.wildcard || p == ch,
            None => self.policy == LengthPolicy::AtLeastPrefix,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Frame<C> {
    state: StateId,
    depth: usize,
    ch: C,
}

/// Depth-first enumeration state, detached from any borrow of the automaton.
///
/// Words come out in lexicographic order. The caller is responsible for
/// passing the same, unmodified arena on every step.
#[derive(Clone, Debug)]
pub(crate) struct Traversal<C: DawgChar> {
    stack: Vec<Frame<C>>,
    buffer: Vec<C>,
    pattern: Option<Pattern<C>>,
}

impl<C: DawgChar> Traversal<C> {
    pub(crate) fn all(root: StateId) -> Self {
        Traversal {
            stack: vec![Frame {
                state: root,
                depth: 0,
                ch: C::default(),
            }],
            buffer: Vec::new(),
            pattern: None,
        }
    }

    pub(crate) fn matching(
        root: StateId,
        symbols: Vec<C>,
        wildcard: C,
        policy: LengthPolicy,
    ) -> Self {
        Traversal {
            pattern: Some(Pattern {
                symbols,
                wildcard,
                policy,
            }),
            ..Self::all(root)
        }
    }

    pub(crate) fn next_word(&mut self, arena: &NodeArena<C>) -> Option<Vec<C>> {
        while let Some(frame) = self.stack.pop() {
            if frame.depth > 0 {
                self.buffer.truncate(frame.depth - 1);
                self.buffer.push(frame.ch);
            }
            let state = arena.state(frame.state);
            for (ch, child) in state.children().rev() {
                if self.pattern.as_ref().map_or(true, |p| p.allows(frame.depth, ch)) {
                    self.stack.push(Frame {
                        state: child,
                        depth: frame.depth + 1,
                        ch,
                    });
                }
            }
            let reported = self
                .pattern
                .as_ref()
                .map_or(true, |p| p.accepts_length(frame.depth));
            if state.is_final() && reported {
                return Some(self.buffer.clone());
            }
        }
        None
    }
}

/// Iterator over accepted words, borrowing the automaton.
///
/// Produced by [`Dawg::words`], [`Dawg::iter`] and [`Dawg::find_all`]. The
/// borrow keeps the automaton from changing underneath it; see [`Cursor`]
/// for a handle that does not borrow.
#[derive(Clone)]
pub struct Words<'a, C: DawgChar> {
    arena: &'a NodeArena<C>,
    traversal: Traversal<C>,
}

impl<'a, C: DawgChar> Words<'a, C> {
    pub(crate) fn new(arena: &'a NodeArena<C>, traversal: Traversal<C>) -> Self {
        Words { arena, traversal }
    }
}

impl<C: DawgChar> Iterator for Words<'_, C> {
    type Item = Vec<C>;

    fn next(&mut self) -> Option<Self::Item> {
        self.traversal.next_word(self.arena)
    }
}

impl<C: DawgChar> std::iter::FusedIterator for Words<'_, C> {}

/// A detached enumeration handle, for callers that cannot hold a borrow
/// across steps (host-language iterators, for instance).
///
/// The cursor remembers which automaton it was created from and at which
/// mutation. Advancing it after `add_word`, `clear`, or `close` changed the
/// graph fails with [`InvalidState::StaleCursor`] instead of yielding stale words.
///
/// ```
/// use dawgdict::dawg::{Dawg, InvalidState};
///
/// let mut dawg = Dawg::<char>::new();
/// dawg.add_word("cat").unwrap();
/// dawg.add_word("dog").unwrap();
///
/// let mut cursor = dawg.cursor();
/// assert_eq!(cursor.advance(&dawg), Ok(Some(vec!['c', 'a', 't'])));
/// dawg.clear();
/// assert_eq!(cursor.advance(&dawg), Err(InvalidState::StaleCursor));
/// ```
#[derive(Clone, Debug)]
pub struct Cursor<C: DawgChar> {
    instance: u64,
    version: u64,
    traversal: Traversal<C>,
}

impl<C: DawgChar> Cursor<C> {
    pub(crate) fn new(instance: u64, version: u64, traversal: Traversal<C>) -> Self {
        Cursor {
            instance,
            version,
            traversal,
        }
    }

    /// Returns the next word, `Ok(None)` once exhausted.
    ///
    /// # Errors
    ///
    /// [`InvalidState::StaleCursor`] if `dawg` is not the automaton this cursor
    /// was created from, or it has been mutated since.
    pub fn advance(&mut self, dawg: &Dawg<C>) -> Result<Option<Vec<C>>, InvalidState> {
        if !dawg.is_snapshot(self.instance, self.version) {
            return Err(InvalidState::StaleCursor);
        }
        Ok(self.traversal.next_word(&dawg.arena))
    }
}
