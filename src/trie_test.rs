//! Store/retrieve/delete coverage grounded in `tests/test_store-retrieve.c`.

use crate::testutils::{en_trie_new, trie_size, DICT_SRC};
use crate::types::AsAlphaChar;

#[test]
fn empty_trie_has_zero_size() {
    let trie = crate::Trie::<Option<i32>>::new(crate::testutils::en_alpha_map());
    assert_eq!(trie_size(&trie), 0);
}

#[test]
fn delete_non_existent_key_is_noop() {
    let mut trie = crate::Trie::<Option<i32>>::new(crate::testutils::en_alpha_map());
    assert!(!trie.delete(&"a".as_alphachar()));
    assert_eq!(trie_size(&trie), 0);
}

#[test]
fn store_if_absent_then_size_then_delete() {
    let mut trie = crate::Trie::<Option<i32>>::new(crate::testutils::en_alpha_map());
    assert!(trie.store_if_absent(&"a".as_alphachar(), Some(1)));
    assert_eq!(trie_size(&trie), 1);
    assert!(trie.delete(&"a".as_alphachar()));
    assert_eq!(trie_size(&trie), 0);
}

#[test]
fn store_and_retrieve_all_entries() {
    let trie = en_trie_new();
    assert_eq!(trie_size(&trie), DICT_SRC.len());
    for rec in DICT_SRC {
        let got = trie.retrieve(&rec.key.as_alphachar()).copied().flatten();
        assert_eq!(got, Some(rec.data), "key {}", rec.key);
    }
}

#[test]
fn store_overwrites_existing_key() {
    let mut trie = en_trie_new();
    assert!(trie.store(&"cat".as_alphachar(), Some(100)));
    assert_eq!(trie_size(&trie), DICT_SRC.len());
    assert_eq!(trie.retrieve(&"cat".as_alphachar()).copied().flatten(), Some(100));
}

#[test]
fn store_if_absent_does_not_overwrite() {
    let mut trie = en_trie_new();
    assert!(!trie.store_if_absent(&"cat".as_alphachar(), Some(100)));
    assert_eq!(trie.retrieve(&"cat".as_alphachar()).copied().flatten(), Some(1));
}

#[test]
fn store_rejects_key_outside_alphabet() {
    let mut trie = en_trie_new();
    assert!(!trie.store(&"CAT".as_alphachar(), Some(100)));
    assert_eq!(trie_size(&trie), DICT_SRC.len());
}

#[test]
fn delete_then_retrieve_fails_but_others_survive() {
    let mut trie = en_trie_new();
    assert!(trie.delete(&"cat".as_alphachar()));
    assert_eq!(trie_size(&trie), DICT_SRC.len() - 1);
    assert_eq!(trie.retrieve(&"cat".as_alphachar()), None);
    for rec in DICT_SRC {
        if rec.key == "cat" {
            continue;
        }
        assert_eq!(trie.retrieve(&rec.key.as_alphachar()).copied().flatten(), Some(rec.data));
    }
}

#[test]
fn delete_prefix_key_keeps_longer_siblings() {
    let mut trie = en_trie_new();
    assert!(trie.delete(&"car".as_alphachar()));
    assert_eq!(trie.retrieve(&"car".as_alphachar()), None);
    assert_eq!(trie.retrieve(&"carpet".as_alphachar()).copied().flatten(), Some(4));
    assert_eq!(trie.retrieve(&"carpal".as_alphachar()).copied().flatten(), Some(5));
    assert_eq!(trie.retrieve(&"carp".as_alphachar()).copied().flatten(), Some(6));
}

#[test]
fn serialize_then_deserialize_round_trips() {
    let mut trie = en_trie_new();
    let mut buf = Vec::new();
    trie.serialize(&mut buf).unwrap();
    assert!(!trie.is_dirty());

    let mut cursor = std::io::Cursor::new(&buf);
    let loaded = crate::Trie::<Option<i32>>::from_reader(&mut cursor).unwrap();
    for rec in DICT_SRC {
        assert_eq!(loaded.retrieve(&rec.key.as_alphachar()).copied().flatten(), Some(rec.data));
    }

    let mut buf2 = Vec::new();
    let mut loaded = loaded;
    loaded.serialize(&mut buf2).unwrap();
    assert_eq!(buf, buf2);
}
