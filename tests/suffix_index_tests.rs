//! Integration tests for the sliding-window suffix trie engine
//!
//! These drive the public API only, checking the engine against an
//! independently maintained shadow model of the window's suffix set and the
//! FIFO insertion order of suffixes.

use lzindex::{ByteSource, LzIndexError, SliceSource, SuffixTrieIndex};

/// Shadow model: the suffix set the trie must hold, kept in insertion order
/// (front = oldest = longest), maintained with none of the engine's code.
struct ShadowSuffixes {
    window_size: usize,
    suffixes: Vec<Vec<u8>>,
}

impl ShadowSuffixes {
    fn new(window_size: usize) -> Self {
        Self {
            window_size,
            suffixes: vec![Vec::new()],
        }
    }

    /// Mirrors one committed byte; returns the evicted suffix, if any
    fn commit(&mut self, byte: u8) -> Option<Vec<u8>> {
        let evicted = if self.suffixes.len() == self.window_size + 1 {
            Some(self.suffixes.remove(0))
        } else {
            None
        };
        for suffix in &mut self.suffixes {
            suffix.push(byte);
        }
        self.suffixes.push(Vec::new());
        evicted
    }
}

fn commit_bytes(index: &mut SuffixTrieIndex, bytes: &[u8]) {
    for &byte in bytes {
        index.add_to_match(byte).unwrap();
        index.advance().unwrap();
    }
}

#[test]
fn shadow_model_agrees_through_all_fill_states() {
    let window_size = 4;
    let mut index = SuffixTrieIndex::with_params(window_size, 8).unwrap();
    let mut shadow = ShadowSuffixes::new(window_size);

    // Mixed data: repeats, runs, and fresh bytes, crossing the point where
    // the window first fills and evictions begin.
    for &byte in b"abcabcaabbccabca" {
        let window_before = index.window_contents();
        let was_full = index.window_len() == window_size;

        index.add_to_match(byte).unwrap();
        index.advance().unwrap();
        let evicted = shadow.commit(byte);

        // Eviction fires exactly when the window was full, and the evicted
        // suffix is the oldest inserted, which spells the pre-shift window.
        assert_eq!(evicted.is_some(), was_full);
        if let Some(evicted) = evicted {
            assert_eq!(evicted, window_before);
            assert!(!index.contains_suffix(&evicted).unwrap() || evicted.is_empty() || {
                // The same byte string can re-enter as a younger suffix of
                // the new window; membership then reflects the new window.
                let window = index.window_contents();
                window.ends_with(&evicted)
            });
        }

        // The trie holds exactly the shadow's suffix set, nothing else.
        assert_eq!(index.suffix_count(), shadow.suffixes.len());
        assert_eq!(index.leaf_count(), index.suffix_count());
        assert_eq!(index.suffix_count(), index.window_len() + 1);
        for suffix in &shadow.suffixes {
            assert!(
                index.contains_suffix(suffix).unwrap(),
                "missing suffix {:?}",
                suffix
            );
        }
    }
}

#[test]
fn non_suffix_keys_are_never_members() {
    let mut index = SuffixTrieIndex::with_params(3, 8).unwrap();
    commit_bytes(&mut index, b"abcde");

    // Window is "cde"; no prefix or stale key survives
    assert_eq!(index.window_contents(), b"cde");
    for key in [&b"abcde"[..], b"bcde", b"ab", b"cd", b"c", b"d"] {
        assert!(!index.contains_suffix(key).unwrap(), "stale key {:?}", key);
    }
    for key in [&b"cde"[..], b"de", b"e", b""] {
        assert!(index.contains_suffix(key).unwrap());
    }
}

#[test]
fn complete_match_is_a_stored_suffix() {
    let mut index = SuffixTrieIndex::with_params(8, 8).unwrap();
    commit_bytes(&mut index, b"banana");

    let mut pending = SliceSource::new(b"nana");
    let matched = index.start_new_match(&mut pending).unwrap();
    assert!(matched > 0);

    // The matched prefix must be one of the window's suffixes, i.e. the
    // window ends with exactly those bytes.
    let snapshot = index.match_snapshot();
    assert_eq!(snapshot.len(), matched);
    assert!(index.window_contents().ends_with(&snapshot));
    assert!(index.contains_suffix(&snapshot).unwrap());
}

#[test]
fn self_overlap_run_compresses_to_one_match() {
    let mut index = SuffixTrieIndex::with_params(64, 64).unwrap();
    commit_bytes(&mut index, b"ab");

    // "ab" repeated: one complete match plus cyclic extension covers it all
    let run = b"ababababababab";
    let mut pending = SliceSource::new(run);
    let matched = index.start_new_match(&mut pending).unwrap();
    assert_eq!(matched, 2);
    let extended = index.extend_match(&mut pending).unwrap();
    assert_eq!(matched + extended, run.len());
    assert!(!pending.has_pending());

    // Cyclic self-reference: position matched+i replays position i
    let snapshot = index.match_snapshot();
    for i in 0..extended {
        assert_eq!(snapshot[matched + i], snapshot[i]);
    }

    index.advance().unwrap();
    assert_eq!(index.suffix_count(), index.window_len() + 1);
}

#[test]
fn bounded_growth_holds_under_pressure() {
    let window_size = 8;
    let max_match = 5;
    let mut index = SuffixTrieIndex::with_params(window_size, max_match).unwrap();

    let input: Vec<u8> = (0..200u16).map(|i| (i % 7) as u8).collect();
    let mut pending = SliceSource::new(&input);
    while pending.has_pending() {
        let matched = index.start_new_match(&mut pending).unwrap();
        if matched > 0 {
            index.extend_match(&mut pending).unwrap();
        }
        // Matching never spills into the reserved slot
        assert!(index.match_len() <= max_match - 1);

        if pending.has_pending() {
            let literal = pending.next().unwrap();
            index.add_to_match(literal).unwrap();
        }
        assert!(index.match_len() <= max_match);

        index.advance().unwrap();
        assert!(index.window_len() <= window_size);
        assert_eq!(index.match_len(), 0);
        assert_eq!(index.suffix_count(), index.leaf_count());
    }
    assert_eq!(index.window_len(), window_size);
}

#[test]
fn window_of_one_still_matches_repeats() {
    let mut index = SuffixTrieIndex::with_params(1, 4).unwrap();
    commit_bytes(&mut index, b"xxy");

    // Window holds only "y"; suffixes are "y" and ""
    assert_eq!(index.suffix_count(), 2);
    assert!(index.contains_suffix(b"y").unwrap());
    assert!(!index.contains_suffix(b"x").unwrap());

    let mut pending = SliceSource::new(b"yy");
    assert_eq!(index.start_new_match(&mut pending).unwrap(), 1);
    assert_eq!(index.extend_match(&mut pending).unwrap(), 1);
}

#[test]
fn clear_from_any_state_restores_idle() {
    let mut index = SuffixTrieIndex::with_params(4, 4).unwrap();
    commit_bytes(&mut index, b"abab");

    // Clear mid-match, with bytes sitting in the accumulator
    let mut pending = SliceSource::new(b"ab");
    assert!(index.start_new_match(&mut pending).unwrap() > 0);
    index.clear().unwrap();

    assert_eq!(index.suffix_count(), 1);
    assert_eq!(index.window_len(), 0);
    assert_eq!(index.match_len(), 0);
    assert_eq!(index.distance_to_leaf().unwrap(), 0);

    // And the cleared index accepts a fresh stream
    commit_bytes(&mut index, b"cd");
    assert!(index.contains_suffix(b"cd").unwrap());
    assert!(!index.contains_suffix(b"ab").unwrap());
}

#[test]
fn construction_errors_are_configuration_errors() {
    for (window, max_match) in [(0, 4), (4, 0), (0, 0)] {
        let err = SuffixTrieIndex::with_params(window, max_match).unwrap_err();
        assert!(matches!(err, LzIndexError::Configuration { .. }));
    }
}
