//! End-to-end behavior of the public API on small fixed word lists.

use std::collections::BTreeSet;

use dawgdict::dawg::builder::build_dawg;
use dawgdict::dawg::{Dawg, DawgError, FormatError, InvalidState, LengthPolicy, Lifecycle};

fn strings(words: impl Iterator<Item = Vec<char>>) -> BTreeSet<String> {
    words.map(|w| w.into_iter().collect()).collect()
}

fn set(words: &[&str]) -> BTreeSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn animals() -> Dawg<char> {
    let mut words = ["cat", "rat", "attribute", "tribute", "war", "warbute", "zaaa"];
    words.sort_unstable();
    build_dawg(words).unwrap()
}

#[test]
fn prefix_queries() {
    let dawg = animals();
    assert!(dawg.matches("warb"));
    assert!(dawg.matches("w"));
    assert!(!dawg.matches("hash"));
    assert!(!dawg.matches(""));
    assert_eq!(dawg.longest_prefix("rating"), 3);
    assert_eq!(dawg.longest_prefix(""), 0);
    assert_eq!(dawg.longest_prefix("hash"), 0);
    assert!(dawg.exists("warbute"));
    assert!(!dawg.exists("warb"));
}

#[test]
fn byte_words() {
    let dawg = build_dawg([
        b"attribute".as_slice(),
        b"cat",
        b"rat",
        b"tribute",
        b"war",
        b"warbute",
        b"zaaa",
    ])
    .unwrap();
    assert_eq!(dawg.len(), 7);
    assert!(dawg.matches(b"warb".as_slice()));
    assert_eq!(dawg.longest_prefix(b"rating".as_slice()), 3);
    assert_eq!(dawg.unrank(1), Some(b"attribute".to_vec()));
    // "tribute", "attribute" and "warbute" share their tails
    let stats = dawg.stats();
    assert!(stats.nodes_count < 1 + "attributecatrattributewarbutezaaa".len());
}

#[test]
fn wildcard_search_policies() {
    let mut words = ["abcde", "aXcde", "aZcdef", "aYc", "Xbcdefgh"];
    words.sort_unstable();
    let dawg = build_dawg(words).unwrap();
    let find = |policy| strings(dawg.find_all("a?c??", '?', policy));

    assert_eq!(find(LengthPolicy::Exact), set(&["abcde", "aXcde"]));
    assert_eq!(find(LengthPolicy::AtMostPrefix), set(&["aYc", "abcde", "aXcde"]));
    assert_eq!(find(LengthPolicy::AtLeastPrefix), set(&["abcde", "aXcde", "aZcdef"]));
}

#[test]
fn wildcard_search_is_restartable() {
    let dawg = animals();
    let first: Vec<_> = dawg.find_all("?at", '?', LengthPolicy::Exact).collect();
    let second: Vec<_> = dawg.find_all("?at", '?', LengthPolicy::Exact).collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn out_of_order_word_is_rejected_without_changes() {
    let mut dawg = Dawg::<char>::new();
    dawg.add_word("catalog").unwrap();
    let before = dawg.dump();

    let err = dawg.add_word("any").unwrap_err();
    assert_eq!(
        err,
        DawgError::OrderingViolation {
            previous: "catalog".chars().collect(),
            current: "any".chars().collect(),
        }
    );
    assert_eq!(dawg.dump(), before);
    assert_eq!(dawg.len(), 1);

    // Sorted input still works afterwards.
    assert_eq!(dawg.add_word("dog"), Ok(true));
}

#[test]
fn cursor_is_invalidated_by_clear() {
    let mut dawg = animals();
    let mut cursor = dawg.cursor();
    assert!(cursor.advance(&dawg).unwrap().is_some());
    dawg.clear();
    assert_eq!(cursor.advance(&dawg), Err(InvalidState::StaleCursor));
}

#[test]
fn cursor_is_invalidated_by_add_word() {
    let mut dawg = Dawg::<char>::new();
    dawg.add_word("alpha").unwrap();
    let mut cursor = dawg.find_all_cursor("?????", '?', LengthPolicy::Exact);
    dawg.add_word("bravo").unwrap();
    assert_eq!(cursor.advance(&dawg), Err(InvalidState::StaleCursor));
}

#[test]
fn cursor_matches_iterator() {
    let dawg = animals();
    let mut cursor = dawg.cursor();
    let mut from_cursor = Vec::new();
    while let Some(word) = cursor.advance(&dawg).unwrap() {
        from_cursor.push(word);
    }
    assert_eq!(from_cursor, dawg.words().collect::<Vec<_>>());
    assert_eq!(cursor.advance(&dawg), Ok(None));
}

#[test]
fn repeated_insertion_is_idempotent() {
    let mut dawg = Dawg::<char>::new();
    for word in ["bar", "baz", "foo"] {
        dawg.add_word(word).unwrap();
    }
    let words: Vec<_> = dawg.words().collect();
    let ranks: Vec<_> = words.iter().map(|w| dawg.rank(w)).collect();

    assert_eq!(dawg.add_word("foo"), Ok(false));
    assert_eq!(dawg.len(), 3);
    assert_eq!(dawg.words().collect::<Vec<_>>(), words);
    assert_eq!(words.iter().map(|w| dawg.rank(w)).collect::<Vec<_>>(), ranks);
}

#[test]
fn closed_automaton_rejects_words_until_cleared() {
    let mut dawg = animals();
    assert_eq!(dawg.lifecycle(), Lifecycle::Closed);
    assert_eq!(
        dawg.add_word("zzz"),
        Err(DawgError::InvalidState(InvalidState::Closed))
    );
    dawg.clear();
    assert_eq!(dawg.add_word("zzz"), Ok(true));
    assert_eq!(dawg.len(), 1);
}

#[test]
fn numbering_follows_iteration_order() {
    let dawg = animals();
    for (i, word) in dawg.words().enumerate() {
        assert_eq!(dawg.rank(&word), Some(i + 1));
        assert_eq!(dawg.unrank(i + 1), Some(word));
    }
    assert_eq!(dawg.unrank(0), None);
    assert_eq!(dawg.unrank(dawg.len() + 1), None);
    assert_eq!(dawg.rank("ca"), None);
}

#[test]
fn dump_survives_round_trip() {
    let dawg = animals();
    let bytes = dawg.dump();
    let loaded = Dawg::<char>::load(&bytes).unwrap();
    assert_eq!(loaded, dawg);
    assert_eq!(loaded.dump(), bytes);
    assert_eq!(loaded.stats(), dawg.stats());
    assert_eq!(loaded.rank("war"), dawg.rank("war"));

    let mut written = Vec::new();
    dawg.dump_to(&mut written).unwrap();
    assert_eq!(written, bytes);
}

#[test]
fn corrupted_dumps_are_rejected() {
    let bytes = animals().dump();
    assert_eq!(
        Dawg::<char>::load(&bytes[..bytes.len() - 1]).unwrap_err(),
        FormatError::Truncated
    );
    assert_eq!(Dawg::<char>::load(&[]).unwrap_err(), FormatError::Truncated);

    let mut bad = bytes.clone();
    bad[0] = b'd';
    assert_eq!(Dawg::<char>::load(&bad).unwrap_err(), FormatError::BadMagic);

    // flag byte of the first node
    let mut bad = bytes.clone();
    bad[32] = 0x80;
    assert!(Dawg::<char>::load(&bad).is_err());

    // every single-byte flip is either rejected or still yields a valid automaton
    for i in 0..bytes.len() {
        let mut flipped = bytes.clone();
        flipped[i] ^= 0x01;
        if let Ok(loaded) = Dawg::<char>::load(&flipped) {
            assert_eq!(loaded.len(), loaded.words().count());
        }
    }
}

#[test]
fn visualization_export() {
    let dawg = build_dawg(["ab", "b"]).unwrap();
    let graph = dawg.graph();
    assert_eq!(graph.nodes.len(), 3);
    assert_eq!(graph.edges.len(), 3);
    assert!(!graph.nodes[0].is_final);
    assert_eq!(graph.nodes.iter().filter(|n| n.is_final).count(), 1);
    let root = graph.nodes[0].id;
    let labels: Vec<char> = graph
        .edges
        .iter()
        .filter(|e| e.source == root)
        .map(|e| e.symbol)
        .collect();
    assert_eq!(labels, ['a', 'b']);
}
