//! Perfect hashing between accepted words and `1..=len`.
//!
//! Every state carries the number of accepting paths that start at it. With
//! those counts, the index of a word is the number of words that sort before
//! it plus one, which [`rank`](Numbering::rank) accumulates in a single walk
//! and [`unrank`](Numbering::unrank) inverts. Words are numbered in the same
//! order [`Dawg::words`](super::Dawg::words) yields them.
//!
//! Based on Lucchesi & Kowaltowski, "Applications of Finite Automata
//! Representing Large Vocabularies" (1993).

use log::trace;

use super::char_trait::DawgChar;
use super::graph::postorder;
use super::node_arena::{NodeArena, StateId};

/// Accept counts for every reachable state, indexed by slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Numbering {
    counts: Vec<usize>,
}

impl Numbering {
    /// Computes accept counts bottom-up. Shared states are counted once.
    ///
    /// Returns `None` if some state accepts more than `usize::MAX` words.
    pub fn compute<C: DawgChar>(arena: &NodeArena<C>, root: StateId) -> Option<Self> {
        let (order, _) = postorder(arena, root);
        let mut counts = vec![0usize; arena.slot_count()];
        for &id in &order {
            let state = arena.state(id);
            let count = state
                .children()
                .try_fold(usize::from(state.is_final()), |acc, (_, child)| {
                    acc.checked_add(counts[child.index()])
                })?;
            counts[id.index()] = count;
        }
        trace!("numbered {} states", order.len());
        Some(Numbering { counts })
    }

    /// Number of accepting paths from `id`.
    #[inline]
    pub fn count(&self, id: StateId) -> usize {
        self.counts.get(id.index()).copied().unwrap_or(0)
    }

    /// Index of `word` in `1..=count(root)`, or `None` if it is not accepted.
    pub fn rank<C: DawgChar>(
        &self,
        arena: &NodeArena<C>,
        root: StateId,
        word: &[C],
    ) -> Option<usize> {
        let mut index = 0usize;
        let mut state = root;
        for &ch in word {
            let node = arena.state(state);
            if node.is_final() {
                index += 1;
            }
            let mut next = None;
            for (letter, child) in node.children() {
                if letter < ch {
                    index += self.count(child);
                } else {
                    if letter == ch {
                        next = Some(child);
                    }
                    break;
                }
            }
            state = next?;
        }
        arena.state(state).is_final().then_some(index + 1)
    }

    /// The word with the given index, or `None` outside `1..=count(root)`.
    pub fn unrank<C: DawgChar>(
        &self,
        arena: &NodeArena<C>,
        root: StateId,
        index: usize,
    ) -> Option<Vec<C>> {
        if index == 0 || index > self.count(root) {
            return None;
        }
        let mut word = Vec::new();
        let mut remaining = index;
        let mut state = root;
        loop {
            let node = arena.state(state);
            if node.is_final() {
                if remaining == 1 {
                    return Some(word);
                }
                remaining -= 1;
            }
            let (letter, child) = node.children().find(|&(_, child)| {
                let count = self.count(child);
                if count < remaining {
                    remaining -= count;
                    false
                } else {
                    true
                }
            })?;
            word.push(letter);
            state = child;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Hand-built minimal automaton for {"a", "ab", "b"}:
    /// root -a-> s1(final) -b-> leaf(final), root -b-> leaf.
    fn small() -> (NodeArena<char>, StateId) {
        let mut arena = NodeArena::new();
        let root = arena.create(false);
        let s1 = arena.create(true);
        let leaf = arena.create(true);
        arena.set_transition(root, 'a', s1);
        arena.set_transition(s1, 'b', leaf);
        arena.set_transition(root, 'b', leaf);
        (arena, root)
    }

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn counts_share_suffix_states() {
        let (arena, root) = small();
        let numbering = Numbering::compute(&arena, root).unwrap();
        assert_eq!(numbering.count(root), 3);
        let s1 = arena.get_transition(root, 'a').unwrap();
        assert_eq!(numbering.count(s1), 2);
    }

    #[test]
    fn rank_follows_lexicographic_order() {
        let (arena, root) = small();
        let numbering = Numbering::compute(&arena, root).unwrap();
        assert_eq!(numbering.rank(&arena, root, &chars("a")), Some(1));
        assert_eq!(numbering.rank(&arena, root, &chars("ab")), Some(2));
        assert_eq!(numbering.rank(&arena, root, &chars("b")), Some(3));
        assert_eq!(numbering.rank(&arena, root, &chars("")), None);
        assert_eq!(numbering.rank(&arena, root, &chars("abc")), None);
        assert_eq!(numbering.rank(&arena, root, &chars("c")), None);
    }

    #[test]
    fn unrank_inverts_rank() {
        let (arena, root) = small();
        let numbering = Numbering::compute(&arena, root).unwrap();
        for index in 1..=3 {
            let word = numbering.unrank(&arena, root, index).unwrap();
            assert_eq!(numbering.rank(&arena, root, &word), Some(index));
        }
        assert_eq!(numbering.unrank(&arena, root, 0), None);
        assert_eq!(numbering.unrank(&arena, root, 4), None);
    }

    #[test]
    fn empty_word_ranks_first() {
        let (mut arena, root) = small();
        arena.set_final(root, true);
        let numbering = Numbering::compute(&arena, root).unwrap();
        assert_eq!(numbering.rank(&arena, root, &[]), Some(1));
        assert_eq!(numbering.rank(&arena, root, &chars("a")), Some(2));
        assert_eq!(numbering.unrank(&arena, root, 1), Some(vec![]));
        assert_eq!(numbering.unrank(&arena, root, 4), Some(chars("b")));
    }

    #[test]
    fn overflowing_counts_are_reported() {
        // Every {a, b} word of length 64: 2^64 paths from the start state.
        let mut arena = NodeArena::<u8>::new();
        let states: Vec<StateId> = (0..=64).map(|i| arena.create(i == 64)).collect();
        for pair in states.windows(2) {
            arena.set_transition(pair[0], b'a', pair[1]);
            arena.set_transition(pair[0], b'b', pair[1]);
        }
        assert!(Numbering::compute(&arena, states[0]).is_none());
        assert!(Numbering::compute(&arena, states[33]).is_some());
    }
}
