//! Small sorted set of branch characters, used while relocating a DA base.

use arrayvec::ArrayVec;

use crate::types::TrieChar;

#[derive(Default)]
pub(crate) struct Symbols {
    syms: ArrayVec<TrieChar, 256>,
}

impl Symbols {
    /// Append `c` assuming it is already larger than every symbol added so far.
    pub(crate) fn add_fast(&mut self, c: TrieChar) {
        self.syms.push(c);
    }

    /// Insert `c` keeping the set sorted, ignoring duplicates.
    pub(crate) fn add(&mut self, c: TrieChar) {
        match self.syms.binary_search(&c) {
            Ok(_) => {}
            Err(pos) => self.syms.insert(pos, c),
        }
    }

    pub(crate) fn num(&self) -> usize {
        self.syms.len()
    }

    pub(crate) fn get(&self, i: usize) -> Option<TrieChar> {
        self.syms.get(i).copied()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &TrieChar> {
        self.syms.iter()
    }
}
