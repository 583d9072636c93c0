//! The register: a content-addressed index of canonical states.
//!
//! A state is looked up by its fingerprint, the finality bit plus its sorted
//! `(letter, target)` edges. Targets are compared by identity, not by
//! structure, which is only correct because states are registered bottom-up:
//! every child is canonical before its parent is fingerprinted.

use hashbrown::HashMap;
use smallvec::SmallVec;

use super::char_trait::DawgChar;
use super::node_arena::{NodeArena, StateId};

/// Structural key of a state whose children are all canonical.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct Fingerprint<C: DawgChar> {
    word: bool,
    edges: SmallVec<[(C, StateId); 4]>,
}

impl<C: DawgChar> Fingerprint<C> {
    pub fn of(arena: &NodeArena<C>, id: StateId) -> Self {
        let state = arena.state(id);
        Fingerprint {
            word: state.is_final(),
            edges: state.children().collect(),
        }
    }
}

/// Fingerprint → canonical state map.
#[derive(Clone, Debug)]
pub(crate) struct Register<C: DawgChar> {
    classes: HashMap<Fingerprint<C>, StateId>,
}

impl<C: DawgChar> Register<C> {
    pub fn new() -> Self {
        Register {
            classes: HashMap::new(),
        }
    }

    /// Returns the canonical state equivalent to `id`, if one is registered.
    ///
    /// A registered state is its own equivalent.
    pub fn find_equivalent(&self, arena: &NodeArena<C>, id: StateId) -> Option<StateId> {
        debug_assert!(
            self.children_canonical(arena, id),
            "Cannot look up a state unless all children are canonical"
        );
        self.classes.get(&Fingerprint::of(arena, id)).copied()
    }

    /// Registers `id` as the representative of its class.
    ///
    /// Returns `false` and leaves the register unchanged if an equivalent
    /// state is already registered.
    pub fn insert_canonical(&mut self, arena: &NodeArena<C>, id: StateId) -> bool {
        debug_assert!(
            self.children_canonical(arena, id),
            "Cannot register a state unless all children are canonical"
        );
        match self.classes.entry(Fingerprint::of(arena, id)) {
            hashbrown::hash_map::Entry::Occupied(_) => false,
            hashbrown::hash_map::Entry::Vacant(slot) => {
                slot.insert(id);
                true
            }
        }
    }

    /// Replace-or-register: returns the existing equivalent of `id`, or
    /// registers `id` and returns it.
    pub fn canonicalize(&mut self, arena: &NodeArena<C>, id: StateId) -> StateId {
        debug_assert!(
            self.children_canonical(arena, id),
            "Cannot canonicalize unless all children are canonical"
        );
        *self
            .classes
            .entry(Fingerprint::of(arena, id))
            .or_insert(id)
    }

    /// True if `id` itself is the registered representative of its class.
    pub fn is_canonical(&self, arena: &NodeArena<C>, id: StateId) -> bool {
        self.classes.get(&Fingerprint::of(arena, id)) == Some(&id)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn clear(&mut self) {
        self.classes.clear();
    }

    fn children_canonical(&self, arena: &NodeArena<C>, id: StateId) -> bool {
        arena
            .state(id)
            .children()
            .all(|(_, child)| self.is_canonical(arena, child))
    }
}
