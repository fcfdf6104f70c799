//! C-ABI value type used by the `cffi` surface and `trietool`: a plain
//! `i32` payload, newtyped so it can carry its own `TrieSerializable` impl
//! independent of the blanket one on bare `i32`.

#[cfg(feature = "std")]
use std::io::{self, Read, Write};

#[cfg(feature = "std")]
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

#[cfg(feature = "std")]
use crate::types::{TrieDeserializable, TrieSerializable};

#[cfg(feature = "std")]
use core::mem::size_of;

pub const TRIE_DATA_ERROR: CTrieData = CTrieData(-1);

#[cfg(feature = "cffi")]
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bool(pub i32);

#[cfg(feature = "cffi")]
pub const TRUE: Bool = Bool(1);
#[cfg(feature = "cffi")]
pub const FALSE: Bool = Bool(0);

#[cfg(feature = "cffi")]
impl From<bool> for Bool {
    fn from(v: bool) -> Self {
        if v {
            TRUE
        } else {
            FALSE
        }
    }
}

#[cfg(feature = "cffi")]
impl From<Bool> for bool {
    fn from(v: Bool) -> Self {
        v.0 != 0
    }
}

#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CTrieData(pub i32);

impl From<i32> for CTrieData {
    fn from(v: i32) -> Self {
        CTrieData(v)
    }
}

impl From<CTrieData> for i32 {
    fn from(v: CTrieData) -> Self {
        v.0
    }
}

#[cfg(feature = "std")]
impl TrieSerializable for CTrieData {
    fn serialize<T: Write>(&self, writer: &mut T) -> io::Result<()> {
        writer.write_i32::<BigEndian>(self.0)
    }

    fn serialized_size(&self) -> usize {
        size_of::<i32>()
    }
}

#[cfg(feature = "std")]
impl TrieDeserializable for CTrieData {
    fn deserialize<T: Read>(reader: &mut T) -> io::Result<Self> {
        Ok(CTrieData(reader.read_i32::<BigEndian>()?))
    }
}
