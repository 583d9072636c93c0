//! Binary dump format.
//!
//! All integers are little-endian.
//!
//! ```text
//! header    magic "DAWG", version u8, symbol width u8, lifecycle u8, reserved u8,
//!           words u64, longest word u32, nodes u32, edges u32, frontier length u32
//! frontier  frontier length symbols: the last word, only for an active automaton
//! nodes     per node: flags u8 (bit 0 = final), accept count u64
//! edges     per edge: source u32, symbol, target u32
//! ```
//!
//! Nodes are numbered in depth-first first-visit order from the start state
//! (node 0), children in symbol order, and edges are sorted by
//! `(source, symbol)`. Both orders depend only on the graph, so a load
//! followed by a dump reproduces the input exactly.

use std::io;

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use log::debug;

use super::builder::BuilderCore;
use super::char_trait::DumpChar;
use super::error::FormatError;
use super::graph::{longest_paths, postorder, preorder};
use super::node_arena::{NodeArena, StateId};
use super::numbering::Numbering;
use super::register::Register;
use super::{Dawg, Lifecycle};

const MAGIC: &[u8; 4] = b"DAWG";
const VERSION: u8 = 1;
const HEADER_LEN: usize = 32;
const NODE_LEN: usize = 9;
const FINAL_FLAG: u8 = 1;

fn lifecycle_code(lifecycle: Lifecycle) -> u8 {
    match lifecycle {
        Lifecycle::Empty => 0,
        Lifecycle::Active => 1,
        Lifecycle::Closed => 2,
    }
}

fn lifecycle_from_code(code: u8) -> Option<Lifecycle> {
    match code {
        0 => Some(Lifecycle::Empty),
        1 => Some(Lifecycle::Active),
        2 => Some(Lifecycle::Closed),
        _ => None,
    }
}

fn write_symbol<C: DumpChar, W: io::Write>(wtr: &mut W, symbol: C) -> io::Result<()> {
    let code = symbol.to_code();
    match C::WIDTH {
        1 => wtr.write_u8(code as u8),
        2 => wtr.write_u16::<LittleEndian>(code as u16),
        _ => wtr.write_u32::<LittleEndian>(code),
    }
}

pub(crate) fn dump_to<C: DumpChar, W: io::Write>(dawg: &Dawg<C>, mut wtr: W) -> io::Result<()> {
    let arena = &dawg.arena;
    let order = preorder(arena, dawg.root);
    let mut index = vec![0u32; arena.slot_count()];
    for (i, &id) in order.iter().enumerate() {
        // The arena hands out u32 ids, so the count fits.
        index[id.index()] = i as u32;
    }
    let edges: usize = order.iter().map(|&id| arena.state(id).child_count()).sum();
    let frontier = match dawg.lifecycle() {
        Lifecycle::Active => dawg.builder.previous_word(),
        Lifecycle::Empty | Lifecycle::Closed => Vec::new(),
    };
    let numbering = dawg.numbering();

    wtr.write_all(MAGIC)?;
    wtr.write_u8(VERSION)?;
    wtr.write_u8(C::WIDTH)?;
    wtr.write_u8(lifecycle_code(dawg.lifecycle()))?;
    wtr.write_u8(0)?;
    wtr.write_u64::<LittleEndian>(dawg.len() as u64)?;
    // Paths in an acyclic graph are shorter than the node count.
    wtr.write_u32::<LittleEndian>(dawg.longest_word() as u32)?;
    wtr.write_u32::<LittleEndian>(order.len() as u32)?;
    wtr.write_u32::<LittleEndian>(u32::try_from(edges).map_err(io::Error::other)?)?;
    wtr.write_u32::<LittleEndian>(frontier.len() as u32)?;
    for &symbol in &frontier {
        write_symbol(&mut wtr, symbol)?;
    }
    for &id in &order {
        let state = arena.state(id);
        wtr.write_u8(if state.is_final() { FINAL_FLAG } else { 0 })?;
        wtr.write_u64::<LittleEndian>(numbering.count(id) as u64)?;
    }
    for &id in &order {
        for (symbol, child) in arena.state(id).children() {
            wtr.write_u32::<LittleEndian>(index[id.index()])?;
            write_symbol(&mut wtr, symbol)?;
            wtr.write_u32::<LittleEndian>(index[child.index()])?;
        }
    }
    debug!(
        "dumped dawg: {} words, {} nodes, {} edges",
        dawg.len(),
        order.len(),
        edges
    );
    Ok(())
}

pub(crate) fn dump<C: DumpChar>(dawg: &Dawg<C>) -> Vec<u8> {
    let mut buf = Vec::new();
    dump_to(dawg, &mut buf).expect("writing to a Vec cannot fail");
    buf
}

/// Bounds-checked little-endian reads over a byte slice.
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Reader { bytes, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], FormatError> {
        let end = self.pos.checked_add(n).ok_or(FormatError::Truncated)?;
        let slice = self.bytes.get(self.pos..end).ok_or(FormatError::Truncated)?;
        self.pos = end;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8, FormatError> {
        Ok(self.take(1)?[0])
    }

    fn u32(&mut self) -> Result<u32, FormatError> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    fn u64(&mut self) -> Result<u64, FormatError> {
        Ok(LittleEndian::read_u64(self.take(8)?))
    }

    fn symbol<C: DumpChar>(&mut self) -> Result<C, FormatError> {
        let code = match C::WIDTH {
            1 => u32::from(self.u8()?),
            2 => u32::from(LittleEndian::read_u16(self.take(2)?)),
            _ => self.u32()?,
        };
        C::from_code(code).ok_or(FormatError::InvalidSymbol(code))
    }
}

struct Header {
    lifecycle: Lifecycle,
    words: u64,
    longest: u32,
    nodes: u32,
    edges: u32,
    frontier: u32,
}

impl Header {
    fn read<C: DumpChar>(rdr: &mut Reader<'_>) -> Result<Self, FormatError> {
        if rdr.take(MAGIC.len())? != MAGIC {
            return Err(FormatError::BadMagic);
        }
        let version = rdr.u8()?;
        if version != VERSION {
            return Err(FormatError::UnsupportedVersion(version));
        }
        let width = rdr.u8()?;
        if width != C::WIDTH {
            return Err(FormatError::SymbolWidth {
                expected: C::WIDTH,
                found: width,
            });
        }
        let lifecycle =
            lifecycle_from_code(rdr.u8()?).ok_or(FormatError::BadHeader("unknown lifecycle"))?;
        if rdr.u8()? != 0 {
            return Err(FormatError::BadHeader("reserved byte is set"));
        }
        Ok(Header {
            lifecycle,
            words: rdr.u64()?,
            longest: rdr.u32()?,
            nodes: rdr.u32()?,
            edges: rdr.u32()?,
            frontier: rdr.u32()?,
        })
    }

    /// Total dump length this header announces.
    fn body_len(&self, width: usize) -> Option<usize> {
        let frontier = (self.frontier as usize).checked_mul(width)?;
        let nodes = (self.nodes as usize).checked_mul(NODE_LEN)?;
        let edges = (self.edges as usize).checked_mul(8 + width)?;
        HEADER_LEN
            .checked_add(frontier)?
            .checked_add(nodes)?
            .checked_add(edges)
    }
}

pub(crate) fn load<C: DumpChar>(bytes: &[u8]) -> Result<Dawg<C>, FormatError> {
    let mut rdr = Reader::new(bytes);
    let header = Header::read::<C>(&mut rdr)?;
    let expected = header
        .body_len(C::WIDTH as usize)
        .ok_or(FormatError::Truncated)?;
    if bytes.len() < expected {
        return Err(FormatError::Truncated);
    }
    if bytes.len() > expected {
        return Err(FormatError::TrailingBytes(bytes.len() - expected));
    }
    if header.nodes == 0 {
        return Err(FormatError::BadHeader("no start state"));
    }
    if header.lifecycle != Lifecycle::Active && header.frontier != 0 {
        return Err(FormatError::BadFrontier);
    }

    let frontier = (0..header.frontier)
        .map(|_| rdr.symbol::<C>())
        .collect::<Result<Vec<C>, _>>()?;

    let mut arena = NodeArena::with_capacity(header.nodes as usize);
    let mut counts = Vec::with_capacity(header.nodes as usize);
    for _ in 0..header.nodes {
        let flags = rdr.u8()?;
        if flags & !FINAL_FLAG != 0 {
            return Err(FormatError::BadHeader("unknown node flags"));
        }
        arena.create(flags & FINAL_FLAG != 0);
        counts.push(rdr.u64()?);
    }
    let root = StateId::from_raw(0);

    let mut in_degree = vec![0usize; header.nodes as usize];
    let mut previous: Option<(u32, C)> = None;
    for _ in 0..header.edges {
        let source = rdr.u32()?;
        let symbol = rdr.symbol::<C>()?;
        let target = rdr.u32()?;
        for index in [source, target] {
            if index >= header.nodes {
                return Err(FormatError::DanglingIndex {
                    index,
                    nodes: header.nodes,
                });
            }
        }
        if let Some((prev_source, prev_symbol)) = previous {
            if source < prev_source || (source == prev_source && symbol < prev_symbol) {
                return Err(FormatError::UnsortedEdges { node: source });
            }
        }
        previous = Some((source, symbol));
        let from = StateId::from_raw(source);
        if arena.has_transition(from, symbol) {
            return Err(FormatError::DuplicateSymbol { node: source });
        }
        arena.set_transition(from, symbol, StateId::from_raw(target));
        in_degree[target as usize] += 1;
    }

    let (post, acyclic) = postorder(&arena, root);
    if !acyclic {
        return Err(FormatError::Cycle);
    }
    let order = preorder(&arena, root);
    if order.len() != arena.len() {
        let mut reachable = vec![false; arena.slot_count()];
        for id in &order {
            reachable[id.index()] = true;
        }
        let first = reachable.iter().position(|&r| !r).unwrap_or(0);
        return Err(FormatError::Unreachable(first));
    }
    if order.iter().enumerate().any(|(i, id)| id.index() != i) {
        return Err(FormatError::NodeOrder);
    }

    let numbering = Numbering::compute(&arena, root).ok_or(FormatError::CountOverflow)?;
    for (i, &stored) in counts.iter().enumerate() {
        let count = numbering.count(StateId::from_raw(i as u32));
        if count as u64 != stored {
            return Err(FormatError::CountMismatch(i));
        }
        if count == 0 && i != 0 {
            return Err(FormatError::NotMinimal(i));
        }
    }
    if counts[0] != header.words {
        return Err(FormatError::BadHeader("word count does not match the graph"));
    }
    let size = usize::try_from(header.words).map_err(|_| FormatError::CountOverflow)?;
    let longest = longest_paths(&arena, &post)[root.index()].unwrap_or(0);
    if longest != header.longest as usize {
        return Err(FormatError::BadHeader("longest word does not match the graph"));
    }

    let mut path = Vec::with_capacity(frontier.len());
    match header.lifecycle {
        Lifecycle::Empty => {
            if header.nodes != 1 || header.edges != 0 || arena.state(root).is_final() {
                return Err(FormatError::BadHeader("empty automaton has content"));
            }
        }
        Lifecycle::Active => {
            let mut state = root;
            for &symbol in &frontier {
                state = arena
                    .get_transition(state, symbol)
                    .ok_or(FormatError::BadFrontier)?;
                if in_degree[state.index()] != 1 {
                    return Err(FormatError::BadFrontier);
                }
                path.push((symbol, state));
            }
            if !arena.state(state).is_final() {
                return Err(FormatError::BadFrontier);
            }
        }
        Lifecycle::Closed => {}
    }

    let mut on_frontier = vec![false; arena.slot_count()];
    if header.lifecycle != Lifecycle::Closed {
        on_frontier[root.index()] = true;
    }
    for &(_, state) in &path {
        on_frontier[state.index()] = true;
    }
    let mut register = Register::new();
    for &id in &post {
        if !on_frontier[id.index()] && !register.insert_canonical(&arena, id) {
            return Err(FormatError::NotMinimal(id.index()));
        }
    }

    let builder = BuilderCore::with_path(root, path);
    debug!(
        "loaded dawg: {} words, {} nodes, {:?}",
        size, header.nodes, header.lifecycle
    );
    Ok(Dawg::from_parts(
        arena,
        root,
        register,
        builder,
        size,
        longest,
        header.lifecycle,
    ))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dawg::builder::build_dawg;

    /// Assembles a byte-alphabet dump from its parts, bypassing `dump`.
    fn raw_dump(
        lifecycle: Lifecycle,
        words: u64,
        longest: u32,
        frontier: &[u8],
        nodes: &[(bool, u64)],
        edges: &[(u32, u8, u32)],
    ) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(MAGIC);
        buf.write_u8(VERSION).unwrap();
        buf.write_u8(1).unwrap();
        buf.write_u8(lifecycle_code(lifecycle)).unwrap();
        buf.write_u8(0).unwrap();
        buf.write_u64::<LittleEndian>(words).unwrap();
        buf.write_u32::<LittleEndian>(longest).unwrap();
        buf.write_u32::<LittleEndian>(nodes.len() as u32).unwrap();
        buf.write_u32::<LittleEndian>(edges.len() as u32).unwrap();
        buf.write_u32::<LittleEndian>(frontier.len() as u32).unwrap();
        buf.extend_from_slice(frontier);
        for &(is_final, count) in nodes {
            buf.write_u8(u8::from(is_final)).unwrap();
            buf.write_u64::<LittleEndian>(count).unwrap();
        }
        for &(source, symbol, target) in edges {
            buf.write_u32::<LittleEndian>(source).unwrap();
            buf.write_u8(symbol).unwrap();
            buf.write_u32::<LittleEndian>(target).unwrap();
        }
        buf
    }

    fn load_err(bytes: &[u8]) -> FormatError {
        Dawg::<u8>::load(bytes).unwrap_err()
    }

    #[test]
    fn header_layout() {
        let dawg = build_dawg([b"ab".as_slice(), b"b"]).unwrap();
        let bytes = dawg.dump();
        assert_eq!(&bytes[..4], b"DAWG");
        assert_eq!(bytes[4], VERSION);
        assert_eq!(bytes[5], 1);
        assert_eq!(bytes[6], lifecycle_code(Lifecycle::Closed));
        assert_eq!(LittleEndian::read_u64(&bytes[8..16]), 2);
        assert_eq!(LittleEndian::read_u32(&bytes[16..20]), 2);
        // root, "a" state, shared final leaf
        assert_eq!(LittleEndian::read_u32(&bytes[20..24]), 3);
        assert_eq!(LittleEndian::read_u32(&bytes[24..28]), 3);
        assert_eq!(bytes.len(), HEADER_LEN + 3 * NODE_LEN + 3 * 9);
    }

    #[test]
    fn round_trip_is_byte_identical() {
        let dawg = build_dawg(["car", "card", "cart", "cat", "dart"]).unwrap();
        let bytes = dawg.dump();
        let loaded = Dawg::<char>::load(&bytes).unwrap();
        assert_eq!(loaded, dawg);
        assert_eq!(loaded.dump(), bytes);
        assert_eq!(loaded.stats(), dawg.stats());
        assert_eq!(loaded.lifecycle(), Lifecycle::Closed);
    }

    #[test]
    fn active_automaton_resumes_after_load() {
        let mut dawg = Dawg::<char>::new();
        dawg.add_word("apple").unwrap();
        dawg.add_word("apply").unwrap();
        let bytes = dawg.dump();

        let mut loaded = Dawg::<char>::load(&bytes).unwrap();
        assert_eq!(loaded.lifecycle(), Lifecycle::Active);
        assert_eq!(loaded.dump(), bytes);
        assert!(loaded.add_word("apple").is_err());
        loaded.add_word("banana").unwrap();
        loaded.finish();

        dawg.add_word("banana").unwrap();
        dawg.finish();
        assert_eq!(loaded.dump(), dawg.dump());
    }

    #[test]
    fn empty_automaton_round_trips() {
        let dawg = Dawg::<u8>::new();
        let loaded = Dawg::<u8>::load(&dawg.dump()).unwrap();
        assert!(loaded.is_empty());
        assert_eq!(loaded.lifecycle(), Lifecycle::Empty);
    }

    #[test]
    fn rejects_wrong_symbol_width() {
        let bytes = build_dawg(["x"]).unwrap().dump();
        assert_eq!(
            Dawg::<u8>::load(&bytes).unwrap_err(),
            FormatError::SymbolWidth {
                expected: 1,
                found: 4
            }
        );
    }

    #[test]
    fn rejects_every_truncation() {
        let bytes = build_dawg(["ab", "b"]).unwrap().dump();
        for len in 0..bytes.len() {
            assert!(Dawg::<char>::load(&bytes[..len]).is_err(), "prefix of {len} bytes loaded");
        }
        let mut longer = bytes.clone();
        longer.push(0);
        assert_eq!(
            Dawg::<char>::load(&longer).unwrap_err(),
            FormatError::TrailingBytes(1)
        );
    }

    #[test]
    fn rejects_dangling_target() {
        let mut bytes = build_dawg([b"a".as_slice()]).unwrap().dump();
        let len = bytes.len();
        LittleEndian::write_u32(&mut bytes[len - 4..], 7);
        assert_eq!(
            Dawg::<u8>::load(&bytes).unwrap_err(),
            FormatError::DanglingIndex { index: 7, nodes: 2 }
        );
    }

    #[test]
    fn rejects_duplicate_symbol() {
        // root -a-> 1, root -b-> 1; relabel the second edge to 'a'.
        let mut bytes = build_dawg([b"a".as_slice(), b"b"]).unwrap().dump();
        let second_symbol = HEADER_LEN + 2 * NODE_LEN + 9 + 4;
        assert_eq!(bytes[second_symbol], b'b');
        bytes[second_symbol] = b'a';
        assert_eq!(
            Dawg::<u8>::load(&bytes).unwrap_err(),
            FormatError::DuplicateSymbol { node: 0 }
        );
    }

    #[test]
    fn rejects_bad_magic_and_version() {
        let mut bytes = build_dawg(["a"]).unwrap().dump();
        bytes[4] = 9;
        assert_eq!(
            Dawg::<char>::load(&bytes).unwrap_err(),
            FormatError::UnsupportedVersion(9)
        );
        bytes[0] = b'X';
        assert_eq!(Dawg::<char>::load(&bytes).unwrap_err(), FormatError::BadMagic);
    }

    #[test]
    fn rejects_wrong_accept_count() {
        let mut bytes = build_dawg([b"a".as_slice()]).unwrap().dump();
        // accept count of node 1
        let at = HEADER_LEN + NODE_LEN + 1;
        LittleEndian::write_u64(&mut bytes[at..at + 8], 5);
        assert_eq!(
            Dawg::<u8>::load(&bytes).unwrap_err(),
            FormatError::CountMismatch(1)
        );
    }

    #[test]
    fn raw_dump_matches_dump() {
        let bytes = raw_dump(
            Lifecycle::Closed,
            2,
            2,
            &[],
            &[(false, 2), (false, 1), (true, 1)],
            &[(0, b'a', 1), (0, b'b', 2), (1, b'b', 2)],
        );
        let dawg = build_dawg([b"ab".as_slice(), b"b"]).unwrap();
        assert_eq!(bytes, dawg.dump());
        assert_eq!(Dawg::<u8>::load(&bytes).unwrap(), dawg);
    }

    #[test]
    fn rejects_overflowing_word_count() {
        // A chain of 65 states with two parallel edges per link accepts 2^64 words.
        let mut nodes = vec![(false, u64::MAX)];
        nodes.extend((1..=64).map(|i| (i == 64, 1u64 << (64 - i))));
        let edges: Vec<_> = (0..64)
            .flat_map(|i| [(i, b'a', i + 1), (i, b'b', i + 1)])
            .collect();
        let bytes = raw_dump(Lifecycle::Closed, u64::MAX, 64, &[], &nodes, &edges);
        assert_eq!(load_err(&bytes), FormatError::CountOverflow);
    }

    #[test]
    fn rejects_cycle() {
        let bytes = raw_dump(
            Lifecycle::Closed,
            0,
            0,
            &[],
            &[(false, 0), (false, 0)],
            &[(0, b'a', 1), (1, b'b', 0)],
        );
        assert_eq!(load_err(&bytes), FormatError::Cycle);
    }

    #[test]
    fn rejects_unreachable_node() {
        let bytes = raw_dump(
            Lifecycle::Closed,
            1,
            1,
            &[],
            &[(false, 1), (true, 1), (true, 1)],
            &[(0, b'a', 1)],
        );
        assert_eq!(load_err(&bytes), FormatError::Unreachable(2));
    }

    #[test]
    fn rejects_non_canonical_node_order() {
        // "a" leads to node 2, so depth-first order would number it 1.
        let bytes = raw_dump(
            Lifecycle::Closed,
            2,
            1,
            &[],
            &[(false, 2), (true, 1), (true, 1)],
            &[(0, b'a', 2), (0, b'b', 1)],
        );
        assert_eq!(load_err(&bytes), FormatError::NodeOrder);
    }

    #[test]
    fn rejects_unsorted_edges() {
        let bytes = raw_dump(
            Lifecycle::Closed,
            2,
            1,
            &[],
            &[(false, 2), (true, 1), (true, 1)],
            &[(0, b'b', 1), (0, b'a', 2)],
        );
        assert_eq!(load_err(&bytes), FormatError::UnsortedEdges { node: 0 });
    }

    #[test]
    fn rejects_equivalent_states() {
        // Both leaves accept only the empty suffix and should be one state.
        let bytes = raw_dump(
            Lifecycle::Closed,
            2,
            1,
            &[],
            &[(false, 2), (true, 1), (true, 1)],
            &[(0, b'a', 1), (0, b'b', 2)],
        );
        assert_eq!(load_err(&bytes), FormatError::NotMinimal(2));
    }

    #[test]
    fn rejects_dead_state() {
        let bytes = raw_dump(
            Lifecycle::Closed,
            0,
            0,
            &[],
            &[(false, 0), (false, 0)],
            &[(0, b'a', 1)],
        );
        assert_eq!(load_err(&bytes), FormatError::NotMinimal(1));
    }

    #[test]
    fn rejects_bad_frontier() {
        let nodes = [(false, 1), (true, 1)];
        let edges = [(0, b'a', 1)];

        let closed = raw_dump(Lifecycle::Closed, 1, 1, b"a", &nodes, &edges);
        assert_eq!(load_err(&closed), FormatError::BadFrontier);

        let off_graph = raw_dump(Lifecycle::Active, 1, 1, b"b", &nodes, &edges);
        assert_eq!(load_err(&off_graph), FormatError::BadFrontier);

        // The last word must end in a final state; the root is not final here.
        let not_final = raw_dump(Lifecycle::Active, 1, 1, &[], &nodes, &edges);
        assert_eq!(load_err(&not_final), FormatError::BadFrontier);

        let valid = raw_dump(Lifecycle::Active, 1, 1, b"a", &nodes, &edges);
        assert_eq!(Dawg::<u8>::load(&valid).unwrap().lifecycle(), Lifecycle::Active);
    }

    #[test]
    fn rejects_invalid_symbol() {
        let mut bytes = build_dawg(["a"]).unwrap().dump();
        let symbol = HEADER_LEN + 2 * NODE_LEN + 4;
        LittleEndian::write_u32(&mut bytes[symbol..symbol + 4], 0xD800);
        assert_eq!(
            Dawg::<char>::load(&bytes).unwrap_err(),
            FormatError::InvalidSymbol(0xD800)
        );
    }

    #[test]
    fn rejects_inconsistent_header() {
        fn reject(patch: impl FnOnce(&mut [u8])) -> FormatError {
            let mut bytes = build_dawg(["a"]).unwrap().dump();
            patch(bytes.as_mut_slice());
            Dawg::<char>::load(&bytes).unwrap_err()
        }
        assert_eq!(
            reject(|b| b[6] = 7),
            FormatError::BadHeader("unknown lifecycle")
        );
        assert_eq!(
            reject(|b| b[7] = 1),
            FormatError::BadHeader("reserved byte is set")
        );
        assert_eq!(
            reject(|b| LittleEndian::write_u64(&mut b[8..16], 5)),
            FormatError::BadHeader("word count does not match the graph")
        );
        assert_eq!(
            reject(|b| LittleEndian::write_u32(&mut b[16..20], 9)),
            FormatError::BadHeader("longest word does not match the graph")
        );
        assert_eq!(
            reject(|b| b[6] = lifecycle_code(Lifecycle::Empty)),
            FormatError::BadHeader("empty automaton has content")
        );
    }
}
