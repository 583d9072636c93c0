//! Whole-graph traversals, statistics, and the visualization export.

use super::char_trait::DawgChar;
use super::node_arena::{NodeArena, State, StateId};

/// Reachable states in depth-first first-visit order from `root`, children
/// taken in label order. Each state appears exactly once.
///
/// This order does not depend on slot indices or serials, so it is stable
/// across dump/load.
pub(crate) fn preorder<C: DawgChar>(arena: &NodeArena<C>, root: StateId) -> Vec<StateId> {
    let mut seen = vec![false; arena.slot_count()];
    let mut order = Vec::new();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        if std::mem::replace(&mut seen[id.index()], true) {
            continue;
        }
        order.push(id);
        stack.extend(
            arena
                .state(id)
                .children()
                .rev()
                .map(|(_, child)| child)
                .filter(|child| !seen[child.index()]),
        );
    }
    order
}

/// Reachable states with every child listed before its parents.
///
/// The second value is `false` if a cycle was found; the order is then only
/// a best effort and must not be trusted.
pub(crate) fn postorder<C: DawgChar>(arena: &NodeArena<C>, root: StateId) -> (Vec<StateId>, bool) {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        New,
        Open,
        Done,
    }

    let mut marks = vec![Mark::New; arena.slot_count()];
    let mut order = Vec::new();
    let mut acyclic = true;
    let mut stack = vec![(root, false)];
    while let Some((id, expanded)) = stack.pop() {
        if expanded {
            marks[id.index()] = Mark::Done;
            order.push(id);
            continue;
        }
        match marks[id.index()] {
            Mark::Done => continue,
            Mark::Open => {
                acyclic = false;
                continue;
            }
            Mark::New => {}
        }
        marks[id.index()] = Mark::Open;
        stack.push((id, true));
        for (_, child) in arena.state(id).children().rev() {
            match marks[child.index()] {
                Mark::New => stack.push((child, false)),
                Mark::Open => acyclic = false,
                Mark::Done => {}
            }
        }
    }
    (order, acyclic)
}

/// Length of the longest accepted word starting at each state, indexed by
/// slot. `None` marks states from which no word is accepted.
pub(crate) fn longest_paths<C: DawgChar>(
    arena: &NodeArena<C>,
    postorder: &[StateId],
) -> Vec<Option<usize>> {
    let mut longest = vec![None; arena.slot_count()];
    for &id in postorder {
        let state = arena.state(id);
        let mut best = state.is_final().then_some(0);
        for (_, child) in state.children() {
            if let Some(len) = longest[child.index()] {
                best = best.max(Some(len + 1));
            }
        }
        longest[id.index()] = best;
    }
    longest
}

/// Summary of the reachable automaton.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DawgStats {
    /// Number of reachable states, each counted once.
    pub nodes_count: usize,
    /// Number of transitions between reachable states.
    pub edges_count: usize,
    /// Number of accepted words.
    pub words_count: usize,
    /// Length of the longest accepted word.
    pub longest_word: usize,
    /// Size of one state record in bytes, excluding its edge vector.
    pub sizeof_node: usize,
    /// Approximate heap footprint of the reachable graph in bytes.
    pub graph_size: usize,
}

pub(crate) fn stats<C: DawgChar>(
    arena: &NodeArena<C>,
    root: StateId,
    words_count: usize,
    longest_word: usize,
) -> DawgStats {
    let nodes = preorder(arena, root);
    let edges_count = nodes.iter().map(|&id| arena.state(id).child_count()).sum();
    let sizeof_node = std::mem::size_of::<State<C>>();
    DawgStats {
        nodes_count: nodes.len(),
        edges_count,
        words_count,
        longest_word,
        sizeof_node,
        graph_size: nodes.len() * sizeof_node + edges_count * std::mem::size_of::<(C, StateId)>(),
    }
}

/// A state in the visualization export.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphNode {
    /// Creation serial of the state.
    pub id: u64,
    /// True if the state accepts.
    pub is_final: bool,
}

/// A transition in the visualization export.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphEdge<C> {
    /// Serial of the source state.
    pub source: u64,
    /// Transition label.
    pub symbol: C,
    /// Serial of the target state.
    pub target: u64,
}

/// Read-only snapshot of the reachable automaton, for graph renderers.
///
/// Nodes are listed in depth-first first-visit order from the start state,
/// which is always the first node; edges are grouped by source in that
/// same order, labels ascending.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DawgGraph<C> {
    /// Reachable states.
    pub nodes: Vec<GraphNode>,
    /// Transitions between reachable states.
    pub edges: Vec<GraphEdge<C>>,
}

pub(crate) fn export<C: DawgChar>(arena: &NodeArena<C>, root: StateId) -> DawgGraph<C> {
    let order = preorder(arena, root);
    let mut edges = Vec::new();
    let nodes = order
        .iter()
        .map(|&id| {
            let state = arena.state(id);
            edges.extend(state.children().map(|(symbol, child)| GraphEdge {
                source: state.serial(),
                symbol,
                target: arena.state(child).serial(),
            }));
            GraphNode {
                id: state.serial(),
                is_final: state.is_final(),
            }
        })
        .collect();
    DawgGraph { nodes, edges }
}
