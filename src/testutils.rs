//! Shared fixtures for the store/retrieve/iterate test suites, grounded in
//! `tests/test_store-retrieve.c`'s `en_trie_new()`/`dict_src` setup.

use crate::alpha_map::AlphaMap;
use crate::types::{AlphaChar, AsAlphaChar};
use crate::trie::Trie;

/// Alphabet covering lowercase ASCII, matching the C test suite's English
/// trie fixture.
pub(crate) fn en_alpha_map() -> AlphaMap {
    let mut am = AlphaMap::new();
    am.add_range(('a' as AlphaChar)..=('z' as AlphaChar));
    am
}

pub(crate) struct DictRec {
    pub key: &'static str,
    pub data: i32,
}

pub(crate) const DICT_SRC: &[DictRec] = &[
    DictRec { key: "cat", data: 1 },
    DictRec { key: "cats", data: 2 },
    DictRec { key: "car", data: 3 },
    DictRec { key: "carpet", data: 4 },
    DictRec { key: "carpal", data: 5 },
    DictRec { key: "carp", data: 6 },
    DictRec { key: "a", data: 7 },
    DictRec { key: "an", data: 8 },
    DictRec { key: "and", data: 9 },
];

pub(crate) fn en_trie_new() -> Trie<Option<i32>> {
    let mut trie = Trie::new(en_alpha_map());
    for rec in DICT_SRC {
        assert!(trie.store(&rec.key.as_alphachar(), Some(rec.data)));
    }
    trie
}

pub(crate) fn trie_size(trie: &Trie<Option<i32>>) -> usize {
    trie.iter().count()
}
