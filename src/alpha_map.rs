//! Mapping between sparse application-level code points (`AlphaChar`) and the
//! dense internal alphabet (`TrieChar`) the double array indexes on.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::ops::RangeInclusive;
#[cfg(feature = "std")]
use std::io::{self, Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use rangemap::RangeInclusiveSet;

use crate::types::*;

pub(crate) const ALPHAMAP_SIGNATURE: u32 = 0xd9fcd9fc;

pub trait ToTrieChar {
    fn to_trie_char(&self, map: &AlphaMap) -> Option<TrieChar>;
}

impl ToTrieChar for AlphaChar {
    fn to_trie_char(&self, map: &AlphaMap) -> Option<TrieChar> {
        map.char_to_trie(*self)
    }
}

/// Adapts an iterator over `TrieChar` into one over `AlphaChar`, substituting
/// [`ALPHA_CHAR_ERROR`] for any trie-char outside the map (should not occur
/// for well-formed tries, since every stored `TrieChar` originated from this
/// same map).
pub struct MapToAlphaChars<'m, I> {
    iter: I,
    map: &'m AlphaMap,
}

impl<'m, I: Iterator<Item = TrieChar>> Iterator for MapToAlphaChars<'m, I> {
    type Item = AlphaChar;

    fn next(&mut self) -> Option<AlphaChar> {
        self.iter
            .next()
            .map(|tc| self.map.trie_to_char(tc).unwrap_or(ALPHA_CHAR_ERROR))
    }
}

pub trait ToAlphaChars: Iterator<Item = TrieChar> + Sized {
    fn map_to_alpha_char(self, map: &AlphaMap) -> MapToAlphaChars<'_, Self> {
        MapToAlphaChars { iter: self, map }
    }
}

impl<I: Iterator<Item = TrieChar>> ToAlphaChars for I {}

/// Sparse-to-dense alphabet map. Ranges are kept merged and disjoint; the
/// dense numbering (`to_trie`) is rebuilt from them whenever a range is
/// added.
#[derive(Clone, Default)]
pub struct AlphaMap {
    ranges: RangeInclusiveSet<AlphaChar>,
    to_trie: BTreeMap<AlphaChar, TrieChar>,
    to_char: Vec<AlphaChar>,
}

impl AlphaMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a contiguous range of code points to the alphabet, merging with
    /// any overlapping or adjacent ranges already present.
    pub fn add_range(&mut self, range: RangeInclusive<AlphaChar>) {
        self.ranges.insert(range);
        self.recalc_work_area();
    }

    fn recalc_work_area(&mut self) {
        self.to_trie.clear();
        self.to_char.clear();
        // trie-char 0 is reserved for TRIE_CHAR_TERM, so the dense numbering
        // of real alphabet characters starts at 1.
        self.to_char.push(0);
        let mut next: TrieChar = 1;
        for range in self.ranges.iter() {
            for ac in *range.start()..=*range.end() {
                self.to_trie.insert(ac, next);
                self.to_char.push(ac);
                next = next.wrapping_add(1);
                if next == TRIE_CHAR_TERM {
                    // Alphabet exhausted the 8-bit space; further characters
                    // are unrepresentable and simply won't map.
                    return;
                }
            }
        }
    }

    pub fn char_to_trie(&self, ac: AlphaChar) -> Option<TrieChar> {
        self.to_trie.get(&ac).copied()
    }

    pub fn trie_to_char(&self, tc: TrieChar) -> Option<AlphaChar> {
        if tc == TRIE_CHAR_TERM {
            return Some(0);
        }
        self.to_char.get(tc as usize).copied()
    }

    /// Map a null-terminated `AlphaChar` string to trie-chars, appending the
    /// terminator. Returns `None` if any character is outside the alphabet.
    pub fn char_to_trie_str(&self, str: &[AlphaChar]) -> Option<Vec<TrieChar>> {
        let mut out = Vec::with_capacity(str.len());
        for &ac in str {
            if ac == 0 {
                out.push(TRIE_CHAR_TERM);
                return Some(out);
            }
            out.push(self.char_to_trie(ac)?);
        }
        out.push(TRIE_CHAR_TERM);
        Some(out)
    }
}

#[cfg(feature = "std")]
impl AlphaMap {
    pub(crate) fn read<T: Read>(reader: &mut T) -> io::Result<Self> {
        if reader.read_u32::<BigEndian>()? != ALPHAMAP_SIGNATURE {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "invalid AlphaMap signature"));
        }
        let n_ranges = reader.read_i32::<BigEndian>()?;
        let mut map = Self::new();
        for _ in 0..n_ranges {
            let begin = reader.read_u32::<BigEndian>()?;
            let end = reader.read_u32::<BigEndian>()?;
            map.ranges.insert(begin..=end);
        }
        map.recalc_work_area();
        Ok(map)
    }

    pub(crate) fn serialize<T: Write>(&self, writer: &mut T) -> io::Result<()> {
        writer.write_u32::<BigEndian>(ALPHAMAP_SIGNATURE)?;
        writer.write_i32::<BigEndian>(self.ranges.iter().count() as i32)?;
        for range in self.ranges.iter() {
            writer.write_u32::<BigEndian>(*range.start())?;
            writer.write_u32::<BigEndian>(*range.end())?;
        }
        Ok(())
    }

    pub(crate) fn serialized_size(&self) -> usize {
        8 + 8 * self.ranges.iter().count()
    }
}
