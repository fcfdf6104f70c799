//! Double-array branch representation (`base[]`/`check[]`) with an
//! in-place free list, grounded in Aoe's double-array trie and libdatrie's
//! `datrie/darray.c`.

use alloc::vec;
use alloc::vec::Vec;
use core::cmp;
#[cfg(feature = "std")]
use std::io::{self, Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::symbols::Symbols;
use crate::types::*;

pub(crate) const DA_SIGNATURE: u32 = 0xdafcdafc;

// DA header:
// - Cell 0: mirrors SIGNATURE/num_cells for in-memory bookkeeping only
// - Cell 1: free circular-list head
// - Cell 2: root node
// - Cell 3: pool begin
pub(crate) const DA_POOL_BEGIN: TrieIndex = 3;

/// Tail indices are offset by this much before being negated into `base[]`,
/// so a separate node's tail pointer never collides with the free-list
/// sentinel value `-1`.
pub(crate) const TAIL_START: TrieIndex = 1;

#[derive(Clone, Copy)]
struct Cell {
    base: TrieIndex,
    check: TrieIndex,
}

#[derive(Clone)]
pub(crate) struct DArray {
    cells: Vec<Cell>,
}

impl DArray {
    pub(crate) fn get_root(&self) -> TrieIndex {
        2
    }

    fn get_free_list(&self) -> TrieIndex {
        1
    }

    fn base(&self, s: TrieIndex) -> TrieIndex {
        self.cells.get(s as usize).map_or(0, |c| c.base)
    }

    fn check(&self, s: TrieIndex) -> TrieIndex {
        self.cells.get(s as usize).map_or(0, |c| c.check)
    }

    /// Whether `s` is a separate node whose remaining key lives in the tail.
    pub(crate) fn is_separate(&self, s: TrieIndex) -> bool {
        self.base(s) < 0
    }

    pub(crate) fn get_tail_index(&self, s: TrieIndex) -> TrieIndex {
        -self.base(s) - TAIL_START
    }

    pub(crate) fn set_tail_index(&mut self, s: TrieIndex, tail_idx: TrieIndex) {
        self.set_base(s, -(tail_idx + TAIL_START));
    }

    pub(crate) fn set_base(&mut self, s: TrieIndex, val: TrieIndex) {
        if s as usize >= self.cells.len() {
            self.extend_pool(s);
        }
        self.cells[s as usize].base = val;
    }

    /// Walk from `s` on trie-char `c`. Returns the child state iff it is live.
    pub(crate) fn walk(&self, s: TrieIndex, c: TrieChar) -> Option<TrieIndex> {
        let next = self.base(s) + c as TrieIndex;
        if self.check(next) == s {
            Some(next)
        } else {
            None
        }
    }

    pub(crate) fn is_walkable(&self, s: TrieIndex, c: TrieChar) -> bool {
        let next = self.base(s) + c as TrieIndex;
        self.check(next) == s
    }

    /// All trie-chars `c` for which `walk(s, c)` would succeed, ascending.
    pub(crate) fn output_symbols(&self, s: TrieIndex) -> Symbols {
        let mut syms = Symbols::default();
        let base = self.base(s);
        let max_c = cmp::min(TRIE_CHAR_MAX as TrieIndex, self.cells.len() as TrieIndex - base);
        let mut c = 0;
        while c <= max_c {
            if self.check(base + c) == s {
                syms.add_fast(c as TrieChar);
            }
            c += 1;
        }
        syms
    }

    fn has_children(&self, s: TrieIndex) -> bool {
        let base = self.base(s);
        if base < 0 {
            return false;
        }
        let max_c = cmp::min(TRIE_CHAR_MAX as TrieIndex, self.cells.len() as TrieIndex - base);
        let mut c = 0;
        while c <= max_c {
            if self.check(base + c) == s {
                return true;
            }
            c += 1;
        }
        false
    }

    fn check_free_cell(&mut self, s: TrieIndex) -> bool {
        self.extend_pool(s) && self.check(s) < 0
    }

    /// Grow the array so that index `to_index` exists, linking the newly
    /// created cells into the free list. No-op if already large enough.
    fn extend_pool(&mut self, to_index: TrieIndex) -> bool {
        if to_index <= 0 || to_index >= TRIE_INDEX_MAX {
            return false;
        }
        if (to_index as usize) < self.cells.len() {
            return true;
        }

        let new_begin = self.cells.len() as TrieIndex;
        self.cells
            .resize((to_index + 1) as usize, Cell { base: 0, check: 0 });

        let mut i = new_begin;
        while i < to_index {
            self.cells[i as usize].check = -(i + 1);
            self.cells[(i + 1) as usize].base = -i;
            i += 1;
        }

        let free_list = self.get_free_list();
        let free_tail = -self.base(free_list);
        self.cells[free_tail as usize].check = -new_begin;
        self.cells[new_begin as usize].base = -free_tail;
        self.cells[to_index as usize].check = -free_list;
        self.cells[free_list as usize].base = -to_index;

        true
    }

    fn alloc_cell(&mut self, cell: TrieIndex) {
        let prev = -self.base(cell);
        let next = -self.check(cell);
        self.cells[prev as usize].check = -next;
        self.cells[next as usize].base = -prev;
    }

    fn free_cell(&mut self, cell: TrieIndex) {
        let free_list = self.get_free_list();
        let mut i = -self.check(free_list);
        while i != free_list && i < cell {
            i = -self.check(i);
        }
        let prev = -self.base(i);
        self.cells[cell as usize].check = -i;
        self.cells[cell as usize].base = -prev;
        self.cells[prev as usize].check = -cell;
        self.cells[i as usize].base = -cell;
    }

    fn fit_symbols(&mut self, base: TrieIndex, symbols: &Symbols) -> bool {
        for i in 0..symbols.num() {
            let sym = symbols.get(i).unwrap();
            if base > TRIE_INDEX_MAX - sym as TrieIndex || !self.check_free_cell(base + sym as TrieIndex) {
                return false;
            }
        }
        true
    }

    fn find_free_base(&mut self, symbols: &Symbols) -> TrieIndex {
        let free_list = self.get_free_list();
        let first_sym = symbols.get(0).unwrap();

        let mut s = -self.check(free_list);
        while s != free_list && s < first_sym as TrieIndex + DA_POOL_BEGIN {
            s = -self.check(s);
        }
        if s == free_list {
            s = first_sym as TrieIndex + DA_POOL_BEGIN;
            loop {
                if !self.extend_pool(s) {
                    return TRIE_INDEX_ERROR;
                }
                if self.check(s) < 0 {
                    break;
                }
                s += 1;
            }
        }
        while !self.fit_symbols(s - first_sym as TrieIndex, symbols) {
            if -self.check(s) == free_list {
                let num_cells = self.cells.len() as TrieIndex;
                if !self.extend_pool(num_cells) {
                    return TRIE_INDEX_ERROR;
                }
            }
            s = -self.check(s);
        }
        s - first_sym as TrieIndex
    }

    fn relocate_base(&mut self, s: TrieIndex, new_base: TrieIndex) {
        let old_base = self.base(s);
        let symbols = self.output_symbols(s);
        for i in 0..symbols.num() {
            let sym = symbols.get(i).unwrap() as TrieIndex;
            let old_next = old_base + sym;
            let new_next = new_base + sym;
            let old_next_base = self.base(old_next);

            self.alloc_cell(new_next);
            self.cells[new_next as usize].check = s;
            self.cells[new_next as usize].base = old_next_base;

            if old_next_base > 0 {
                let max_c = cmp::min(
                    TRIE_CHAR_MAX as TrieIndex,
                    self.cells.len() as TrieIndex - old_next_base,
                );
                let mut c = 0;
                while c <= max_c {
                    if self.check(old_next_base + c) == old_next {
                        self.cells[(old_next_base + c) as usize].check = new_next;
                    }
                    c += 1;
                }
            }

            self.free_cell(old_next);
        }
        self.cells[s as usize].base = new_base;
    }

    /// Add a transition `(s, c)` to a fresh child, returning it, or `None` on
    /// allocation failure.
    pub(crate) fn insert_branch(&mut self, s: TrieIndex, c: TrieChar) -> Option<TrieIndex> {
        let base = self.base(s);
        if base > TRIE_INDEX_ERROR {
            let next = base + c as TrieIndex;
            if self.check(next) == s {
                return Some(next);
            }
            if base > TRIE_INDEX_MAX - c as TrieIndex || !self.check_free_cell(next) {
                let mut symbols = self.output_symbols(s);
                symbols.add(c);
                let new_base = self.find_free_base(&symbols);
                if new_base == 0 {
                    return None;
                }
                self.relocate_base(s, new_base);
            }
        } else {
            let mut symbols = Symbols::default();
            symbols.add(c);
            let new_base = self.find_free_base(&symbols);
            if new_base == 0 {
                return None;
            }
            if s as usize >= self.cells.len() {
                self.extend_pool(s);
            }
            self.cells[s as usize].base = new_base;
        }

        let next = self.base(s) + c as TrieIndex;
        self.alloc_cell(next);
        self.cells[next as usize].check = s;
        Some(next)
    }

    pub(crate) fn prune(&mut self, s: TrieIndex) {
        let root = self.get_root();
        self.prune_upto(root, s);
    }

    pub(crate) fn prune_upto(&mut self, p: TrieIndex, mut s: TrieIndex) {
        while p != s && !self.has_children(s) {
            let parent = self.check(s);
            self.free_cell(s);
            s = parent;
        }
    }

    /// Walk down from `root` always taking the smallest live child, appending
    /// each step's trie-char to `keybuff`, until a separate node is reached.
    pub(crate) fn first_separate(&self, mut root: TrieIndex, keybuff: &mut Vec<TrieChar>) -> Option<TrieIndex> {
        loop {
            let base = self.base(root);
            if base < 0 {
                break;
            }
            let max_c = cmp::min(TRIE_CHAR_MAX as TrieIndex, self.cells.len() as TrieIndex - base);
            let mut c = 0;
            while c <= max_c && self.check(base + c) != root {
                c += 1;
            }
            if c > max_c {
                return None;
            }
            keybuff.push(c as TrieChar);
            root = base + c;
        }
        Some(root)
    }

    /// Backtrack from the separate node `sep` to find the next separate node
    /// in ascending trie-char depth-first order, updating `keybuff` in place.
    pub(crate) fn next_separate(
        &self,
        root: TrieIndex,
        mut sep: TrieIndex,
        keybuff: &mut Vec<TrieChar>,
    ) -> Option<TrieIndex> {
        while sep != root {
            let parent = self.check(sep);
            let base = self.base(parent);
            let mut c = sep - base;
            keybuff.pop();

            let max_c = cmp::min(TRIE_CHAR_MAX as TrieIndex, self.cells.len() as TrieIndex - base);
            loop {
                c += 1;
                if c > max_c {
                    break;
                }
                if self.check(base + c) == parent {
                    keybuff.push(c as TrieChar);
                    return self.first_separate(base + c, keybuff);
                }
            }
            sep = parent;
        }
        None
    }

    /// Depth-first enumeration of every separate node reachable from `root`.
    /// Stops early if `callback` returns `false`.
    #[allow(dead_code)]
    pub(crate) fn enumerate(&self, root: TrieIndex, mut callback: impl FnMut(&[TrieChar], TrieIndex) -> bool) -> bool {
        let mut key = Vec::new();
        let Some(mut sep) = self.first_separate(root, &mut key) else {
            return true;
        };
        loop {
            if !callback(&key, sep) {
                return false;
            }
            match self.next_separate(root, sep, &mut key) {
                Some(next) => sep = next,
                None => return true,
            }
        }
    }
}

impl Default for DArray {
    fn default() -> Self {
        let mut cells = vec![Cell { base: 0, check: 0 }; DA_POOL_BEGIN as usize];
        cells[0] = Cell {
            base: DA_SIGNATURE as TrieIndex,
            check: DA_POOL_BEGIN,
        };
        cells[1] = Cell { base: -1, check: -1 };
        cells[2] = Cell {
            base: DA_POOL_BEGIN,
            check: 0,
        };
        Self { cells }
    }
}

#[cfg(feature = "std")]
impl DArray {
    pub(crate) fn read<T: Read>(reader: &mut T) -> io::Result<Self> {
        if reader.read_u32::<BigEndian>()? != DA_SIGNATURE {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "invalid DA signature"));
        }

        let num_cells = reader.read_i32::<BigEndian>()?;
        if num_cells < DA_POOL_BEGIN {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "DA cell count too small"));
        }

        let mut cells = Vec::with_capacity(num_cells as usize);
        cells.push(Cell {
            base: DA_SIGNATURE as TrieIndex,
            check: num_cells,
        });
        for _ in 1..num_cells {
            let base = reader.read_i32::<BigEndian>()?;
            let check = reader.read_i32::<BigEndian>()?;
            cells.push(Cell { base, check });
        }

        Ok(Self { cells })
    }

    pub(crate) fn serialize<T: Write>(&self, writer: &mut T) -> io::Result<()> {
        writer.write_u32::<BigEndian>(DA_SIGNATURE)?;
        writer.write_i32::<BigEndian>(self.cells.len() as TrieIndex)?;
        for cell in &self.cells[1..] {
            writer.write_i32::<BigEndian>(cell.base)?;
            writer.write_i32::<BigEndian>(cell.check)?;
        }
        Ok(())
    }

    pub(crate) fn serialized_size(&self) -> usize {
        8 * self.cells.len()
    }
}
