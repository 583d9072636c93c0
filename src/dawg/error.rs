use thiserror::Error;

use super::char_trait::DawgChar;

/// Errors surfaced by DAWG operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DawgError<C: DawgChar> {
    /// A checked insertion received a word that sorts before the previous one.
    ///
    /// Contains the two words that were out of order (previous word, current word).
    /// The automaton is left exactly as it was before the call.
    #[error("OrderError - {previous:?} came before {current:?}")]
    OrderingViolation {
        /// The most recently inserted word.
        previous: Vec<C>,
        /// The rejected word.
        current: Vec<C>,
    },
    /// The operation is not allowed in the automaton's current lifecycle state.
    #[error(transparent)]
    InvalidState(#[from] InvalidState),
    /// A serialized buffer could not be decoded.
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Programmer errors: the call is not valid at this point.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum InvalidState {
    /// Mutation attempted after `close()`; call `clear()` to reuse the automaton.
    #[error("automaton is closed, clear it before adding words")]
    Closed,
    /// A cursor was advanced after the automaton it walks was mutated.
    #[error("underlying graph has changed, cursor is not valid anymore")]
    StaleCursor,
}

/// Reasons a dump buffer is rejected by [`Dawg::load`](super::Dawg::load).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// The buffer ends before the data its header announces.
    #[error("dump is truncated")]
    Truncated,
    /// The buffer does not start with the dump magic.
    #[error("not a DAWG dump")]
    BadMagic,
    /// The dump was written by an unknown format version.
    #[error("unsupported dump version {0}")]
    UnsupportedVersion(u8),
    /// The dump was written for a different label type.
    #[error("dump has {found}-byte symbols, expected {expected}")]
    SymbolWidth {
        /// Width of the label type being loaded.
        expected: u8,
        /// Width recorded in the dump.
        found: u8,
    },
    /// A header field holds an impossible value.
    #[error("invalid dump header: {0}")]
    BadHeader(&'static str),
    /// A stored symbol is not a valid label.
    #[error("invalid symbol code {0:#x}")]
    InvalidSymbol(u32),
    /// An edge refers to a node that does not exist.
    #[error("node index {index} out of range ({nodes} nodes)")]
    DanglingIndex {
        /// The offending index.
        index: u32,
        /// Number of nodes in the dump.
        nodes: u32,
    },
    /// A node has two edges with the same label.
    #[error("node {node} has duplicate edge labels")]
    DuplicateSymbol {
        /// Index of the offending node.
        node: u32,
    },
    /// Edges are not sorted by (source, symbol).
    #[error("edges of node {node} are out of order")]
    UnsortedEdges {
        /// Index of the offending node.
        node: u32,
    },
    /// The graph contains a cycle.
    #[error("graph contains a cycle")]
    Cycle,
    /// A node cannot be reached from the start state.
    #[error("node {0} is unreachable")]
    Unreachable(usize),
    /// Nodes are not stored in depth-first first-visit order.
    #[error("nodes are not in canonical order")]
    NodeOrder,
    /// A stored accept count disagrees with the graph.
    #[error("accept count of node {0} is inconsistent")]
    CountMismatch(usize),
    /// The graph accepts more words than fit in `usize`.
    #[error("word count overflows")]
    CountOverflow,
    /// Two nodes outside the frontier are equivalent.
    #[error("node {0} duplicates another node")]
    NotMinimal(usize),
    /// The stored previous word does not describe an unshared path.
    #[error("frontier does not match the graph")]
    BadFrontier,
    /// Data remains after the last edge.
    #[error("{0} trailing bytes after dump")]
    TrailingBytes(usize),
}
