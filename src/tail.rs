//! Tail pool: suffix storage for the single remaining key fragment once a
//! trie branch has been collapsed to one candidate, grounded in libdatrie's
//! `datrie/tail.c`.

use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::io::{self, Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

#[cfg(feature = "std")]
use crate::types::{TrieDeserializable, TrieSerializable};
use crate::types::{TrieChar, TrieIndex, TRIE_INDEX_ERROR};

pub(crate) const TAIL_SIGNATURE: u32 = 0xdffcdffc;

/// A tail entry is free iff its suffix is absent. A live suffix always
/// includes its trailing `TRIE_CHAR_TERM` byte, so a zero-length stored
/// suffix is never mistaken for a free slot.
#[derive(Clone)]
struct TailBlock<TrieData> {
    next_free: TrieIndex,
    suffix: Option<Vec<TrieChar>>,
    data: TrieData,
}

#[derive(Clone)]
pub(crate) struct Tail<TrieData> {
    blocks: Vec<TailBlock<TrieData>>,
    first_free: TrieIndex,
}

impl<TrieData: Default> Default for Tail<TrieData> {
    fn default() -> Self {
        Self {
            blocks: Vec::new(),
            first_free: TRIE_INDEX_ERROR,
        }
    }
}

impl<TrieData: Default> Tail<TrieData> {
    fn block(&self, index: TrieIndex) -> Option<&TailBlock<TrieData>> {
        if index <= 0 {
            return None;
        }
        self.blocks.get(index as usize - 1)
    }

    fn block_mut(&mut self, index: TrieIndex) -> Option<&mut TailBlock<TrieData>> {
        if index <= 0 {
            return None;
        }
        self.blocks.get_mut(index as usize - 1)
    }

    pub(crate) fn get_suffix(&self, index: TrieIndex) -> Option<&[TrieChar]> {
        self.block(index)?.suffix.as_deref()
    }

    pub(crate) fn set_suffix(&mut self, index: TrieIndex, suffix: Option<Vec<TrieChar>>) {
        if let Some(b) = self.block_mut(index) {
            b.suffix = suffix;
        }
    }

    pub(crate) fn get_data(&self, index: TrieIndex) -> Option<&TrieData> {
        Some(&self.block(index)?.data)
    }

    pub(crate) fn get_data_mut(&mut self, index: TrieIndex) -> Option<&mut TrieData> {
        Some(&mut self.block_mut(index)?.data)
    }

    pub(crate) fn set_data(&mut self, index: TrieIndex, data: TrieData) {
        if let Some(b) = self.block_mut(index) {
            b.data = data;
        }
    }

    /// Allocate a new tail entry holding `suffix`, with default data, reusing
    /// a freed slot if one is available.
    pub(crate) fn add_suffix(&mut self, suffix: Option<Vec<TrieChar>>) -> TrieIndex {
        let index = if self.first_free != TRIE_INDEX_ERROR {
            let index = self.first_free;
            self.first_free = self.blocks[index as usize - 1].next_free;
            index
        } else {
            self.blocks.push(TailBlock {
                next_free: TRIE_INDEX_ERROR,
                suffix: None,
                data: TrieData::default(),
            });
            self.blocks.len() as TrieIndex
        };
        let block = &mut self.blocks[index as usize - 1];
        block.next_free = TRIE_INDEX_ERROR;
        block.suffix = suffix;
        block.data = TrieData::default();
        index
    }

    pub(crate) fn delete(&mut self, index: TrieIndex) {
        if index <= 0 || index as usize > self.blocks.len() {
            return;
        }
        let block = &mut self.blocks[index as usize - 1];
        block.suffix = None;
        block.data = TrieData::default();
        block.next_free = self.first_free;
        self.first_free = index;
    }

    /// Advance one trie-char through the suffix at `suffix_idx`, returning
    /// the next offset iff `c` matches.
    pub(crate) fn walk_char(&self, index: TrieIndex, suffix_idx: TrieIndex, c: TrieChar) -> Option<TrieIndex> {
        let suffix = self.get_suffix(index)?;
        let cur = *suffix.get(suffix_idx.max(0) as usize)?;
        if cur == c {
            Some(suffix_idx + 1)
        } else {
            None
        }
    }

    pub(crate) fn is_walkable_char(&self, index: TrieIndex, suffix_idx: TrieIndex, c: TrieChar) -> bool {
        let Some(suffix) = self.get_suffix(index) else {
            return false;
        };
        matches!(suffix.get(suffix_idx.max(0) as usize), Some(&sc) if sc == c)
    }
}

#[cfg(feature = "std")]
impl<TrieData: Default + TrieSerializable> Tail<TrieData> {
    pub(crate) fn serialize<T: Write>(&self, writer: &mut T) -> io::Result<()> {
        writer.write_u32::<BigEndian>(TAIL_SIGNATURE)?;
        writer.write_i32::<BigEndian>(self.first_free)?;
        writer.write_i32::<BigEndian>(self.blocks.len() as TrieIndex)?;
        for block in &self.blocks {
            match &block.suffix {
                Some(suffix) => {
                    if suffix.len() > i16::MAX as usize {
                        return Err(io::Error::new(
                            io::ErrorKind::InvalidData,
                            "tail suffix too long to serialize",
                        ));
                    }
                    writer.write_i16::<BigEndian>(suffix.len() as i16)?;
                    writer.write_all(suffix)?;
                    block.data.serialize(writer)?;
                }
                None => {
                    writer.write_i16::<BigEndian>(0)?;
                    writer.write_i32::<BigEndian>(block.next_free)?;
                }
            }
        }
        Ok(())
    }

    pub(crate) fn serialized_size(&self) -> usize {
        let mut size = 4 + 4 + 4;
        for block in &self.blocks {
            size += 2;
            match &block.suffix {
                Some(suffix) => size += suffix.len() + block.data.serialized_size(),
                None => size += 4,
            }
        }
        size
    }
}

#[cfg(feature = "std")]
impl<TrieData: Default + TrieDeserializable> Tail<TrieData> {
    pub(crate) fn read<T: Read>(reader: &mut T) -> io::Result<Self> {
        if reader.read_u32::<BigEndian>()? != TAIL_SIGNATURE {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "invalid Tail signature"));
        }
        let first_free = reader.read_i32::<BigEndian>()?;
        let n_blocks = reader.read_i32::<BigEndian>()?;

        let mut blocks = Vec::with_capacity(n_blocks as usize);
        for _ in 0..n_blocks {
            let len = reader.read_i16::<BigEndian>()?;
            if len == 0 {
                let next_free = reader.read_i32::<BigEndian>()?;
                blocks.push(TailBlock {
                    next_free,
                    suffix: None,
                    data: TrieData::default(),
                });
            } else {
                let mut suffix = alloc::vec![0u8; len as usize];
                reader.read_exact(&mut suffix)?;
                let data = TrieData::deserialize(reader)?;
                blocks.push(TailBlock {
                    next_free: TRIE_INDEX_ERROR,
                    suffix: Some(suffix),
                    data,
                });
            }
        }

        Ok(Self { blocks, first_free })
    }
}
