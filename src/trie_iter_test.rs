//! Iteration coverage grounded in the enumerate section of
//! `tests/test_store-retrieve.c`.

use std::collections::HashMap;

use crate::testutils::{en_trie_new, DICT_SRC};
use crate::types::{AlphaCharToString, AsAlphaChar};

#[test]
fn iterate_yields_every_entry_exactly_once() {
    let trie = en_trie_new();

    let mut seen = HashMap::new();
    for (key, data) in trie.iter() {
        let key = key.as_slice().ac_to_string().unwrap();
        seen.insert(key, data.copied().flatten());
    }

    assert_eq!(seen.len(), DICT_SRC.len());
    for rec in DICT_SRC {
        assert_eq!(seen.get(rec.key), Some(&Some(rec.data)));
    }
}

#[test]
fn iterate_after_deletion_skips_removed_entries() {
    let mut trie = en_trie_new();
    assert!(trie.delete(&"carpet".as_alphachar()));

    let mut seen = HashMap::new();
    for (key, data) in trie.iter() {
        let key = key.as_slice().ac_to_string().unwrap();
        seen.insert(key, data.copied().flatten());
    }

    assert_eq!(seen.len(), DICT_SRC.len() - 1);
    assert!(!seen.contains_key("carpet"));
    for rec in DICT_SRC {
        if rec.key == "carpet" {
            continue;
        }
        assert_eq!(seen.get(rec.key), Some(&Some(rec.data)));
    }
}

#[test]
fn root_state_walk_matches_iteration() {
    let trie = en_trie_new();
    let mut state = trie.root();
    for c in "car".chars() {
        assert!(state.walk(c as u32), "failed to walk '{c}'");
    }
    assert!(!state.is_leaf());
    assert!(state.is_terminal());
    assert_eq!(state.get_data().copied().flatten(), Some(3));
}
