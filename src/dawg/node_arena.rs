//! Slot arena owning every automaton state.
//!
//! States are addressed by [`StateId`], a plain slot index. Deleted slots go
//! onto a free list and are reused by later allocations, so a `StateId` is
//! only meaningful while the state it names is alive. The stable identity
//! exposed to the outside world is the state's creation [`serial`](State::serial),
//! which is never reused.
//!
//! This layer knows nothing about minimization: it creates, links, and deletes
//! states, and can be driven directly with synthetic graphs.

use super::char_trait::DawgChar;
use super::children::{ChildIter, Children};

/// Handle of a state inside its arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(u32);

impl StateId {
    pub(crate) const fn from_raw(raw: u32) -> Self {
        StateId(raw)
    }

    /// Slot index of this state.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A state of the automaton: a finality flag and its outgoing transitions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State<C: DawgChar> {
    serial: u64,
    word: bool,
    children: Children<C>,
}

impl<C: DawgChar> State<C> {
    /// Creation serial of this state. Unique for the lifetime of the arena.
    #[inline]
    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// True if some word ends at this state.
    #[inline]
    pub fn is_final(&self) -> bool {
        self.word
    }

    /// Returns the state that letter's edge leads to, or None if no such edge exists.
    #[inline]
    pub fn get(&self, letter: C) -> Option<StateId> {
        self.children.find(letter)
    }

    /// Returns an iterator over the outgoing edges, in label order.
    #[inline]
    pub fn children(&self) -> ChildIter<'_, C> {
        self.children.iter()
    }

    /// Returns the number of outgoing edges.
    #[inline]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

/// Slot arena of states with a free list.
#[derive(Clone, Debug)]
pub(crate) struct NodeArena<C: DawgChar> {
    slots: Vec<Option<State<C>>>,
    free_list: Vec<StateId>,
    live: usize,
    next_serial: u64,
}

impl<C: DawgChar> NodeArena<C> {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty arena with room for `capacity` states.
    pub fn with_capacity(capacity: usize) -> Self {
        NodeArena {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            live: 0,
            next_serial: 0,
        }
    }

    /// Allocates a new state without transitions.
    pub fn create(&mut self, word: bool) -> StateId {
        let state = State {
            serial: self.next_serial,
            word,
            children: Children::None,
        };
        self.next_serial += 1;
        self.live += 1;
        if let Some(id) = self.free_list.pop() {
            self.slots[id.index()] = Some(state);
            return id;
        }
        let raw = u32::try_from(self.slots.len()).expect("arena exceeds u32::MAX states");
        self.slots.push(Some(state));
        StateId(raw)
    }

    /// Returns the live state at `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was deleted; ids are only handed out for live states.
    #[inline]
    pub fn state(&self, id: StateId) -> &State<C> {
        self.slots[id.index()]
            .as_ref()
            .expect("state id refers to a deleted slot")
    }

    #[inline]
    fn state_mut(&mut self, id: StateId) -> &mut State<C> {
        self.slots[id.index()]
            .as_mut()
            .expect("state id refers to a deleted slot")
    }

    /// True if `id` names a live state.
    pub fn is_live(&self, id: StateId) -> bool {
        matches!(self.slots.get(id.index()), Some(Some(_)))
    }

    #[inline]
    pub fn get_transition(&self, id: StateId, letter: C) -> Option<StateId> {
        self.state(id).get(letter)
    }

    #[inline]
    pub fn has_transition(&self, id: StateId, letter: C) -> bool {
        self.get_transition(id, letter).is_some()
    }

    /// Points `id`'s edge labeled `letter` at `target`, returning the previous target.
    pub fn set_transition(&mut self, id: StateId, letter: C, target: StateId) -> Option<StateId> {
        debug_assert!(self.is_live(target));
        self.state_mut(id).children.set(letter, target)
    }

    pub fn set_final(&mut self, id: StateId, word: bool) {
        self.state_mut(id).word = word;
    }

    /// Frees a state. The caller guarantees that nothing points at it anymore.
    pub fn delete(&mut self, id: StateId) {
        if self.slots[id.index()].take().is_some() {
            self.live -= 1;
            self.free_list.push(id);
        }
    }

    /// Number of live states.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Number of slots, live or free. Every `StateId` index is below this.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.live = 0;
        self.next_serial = 0;
    }
}

/// A read-only handle on a state, borrowed from its automaton.
///
/// Offers the same traversal API as a plain node graph: follow edges with
/// [`get`](Node::get), test finality with [`is_word`](Node::is_word), walk the
/// edges with [`children`](Node::children).
#[derive(Clone, Copy)]
pub struct Node<'a, C: DawgChar> {
    arena: &'a NodeArena<C>,
    id: StateId,
}

impl<'a, C: DawgChar> Node<'a, C> {
    pub(crate) fn new(arena: &'a NodeArena<C>, id: StateId) -> Self {
        Node { arena, id }
    }

    /// Returns the node that letter's edge leads to, or None if no such edge exists.
    #[inline]
    pub fn get(self, letter: C) -> Option<Node<'a, C>> {
        self.arena
            .get_transition(self.id, letter)
            .map(|id| Node::new(self.arena, id))
    }

    /// True if this node corresponds to the end of a word.
    #[inline]
    pub fn is_word(self) -> bool {
        self.arena.state(self.id).is_final()
    }

    /// Returns an iterator over all children of this node, in label order.
    pub fn children(self) -> impl DoubleEndedIterator<Item = (C, Node<'a, C>)> + 'a {
        let arena = self.arena;
        arena
            .state(self.id)
            .children()
            .map(move |(ch, id)| (ch, Node::new(arena, id)))
    }

    /// Returns the number of children.
    #[inline]
    pub fn child_count(self) -> usize {
        self.arena.state(self.id).child_count()
    }

    /// Arena handle of this node. Two nodes are the same state iff their ids are equal.
    #[inline]
    pub fn id(self) -> StateId {
        self.id
    }

    /// Creation serial of this node.
    #[inline]
    pub fn serial(self) -> u64 {
        self.arena.state(self.id).serial()
    }
}

impl<C: DawgChar> PartialEq for Node<'_, C> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.arena, other.arena) && self.id == other.id
    }
}

impl<C: DawgChar> Eq for Node<'_, C> {}

impl<C: DawgChar> std::fmt::Debug for Node<'_, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.arena.state(self.id);
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("word", &state.is_final())
            .field("children", &state.child_count())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn create_and_link() {
        let mut arena = NodeArena::<u8>::new();
        let root = arena.create(false);
        let leaf = arena.create(true);
        assert!(!arena.has_transition(root, b'a'));
        assert_eq!(arena.set_transition(root, b'a', leaf), None);
        assert_eq!(arena.get_transition(root, b'a'), Some(leaf));
        assert!(arena.state(leaf).is_final());
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn deleted_slots_are_reused_but_serials_are_not() {
        let mut arena = NodeArena::<u8>::new();
        let a = arena.create(false);
        let b = arena.create(false);
        let b_serial = arena.state(b).serial();
        arena.delete(b);
        assert!(!arena.is_live(b));
        assert_eq!(arena.len(), 1);

        let c = arena.create(true);
        assert_eq!(c, b);
        assert_ne!(arena.state(c).serial(), b_serial);
        assert_eq!(arena.slot_count(), 2);
        assert!(arena.is_live(a));
    }

    #[test]
    fn double_delete_is_harmless() {
        let mut arena = NodeArena::<u8>::new();
        let a = arena.create(false);
        arena.delete(a);
        arena.delete(a);
        assert_eq!(arena.len(), 0);
        let b = arena.create(false);
        let c = arena.create(false);
        assert_ne!(b, c);
    }

    #[test]
    fn node_handle_walks_graph() {
        let mut arena = NodeArena::<char>::new();
        let root = arena.create(false);
        let mid = arena.create(false);
        let end = arena.create(true);
        arena.set_transition(root, 'o', mid);
        arena.set_transition(mid, 'k', end);

        let node = Node::new(&arena, root);
        let found = node.get('o').and_then(|n| n.get('k')).unwrap();
        assert!(found.is_word());
        assert_eq!(found.id(), end);
        assert_eq!(node.children().count(), 1);
        assert!(node.get('x').is_none());
    }
}
