use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::VdfError;

/// Size of one catalog record on disk.
pub const ENTRY_SIZE: u64 = 80;
pub const FLAG_DIRECTORY: u32 = 0x80000000;
pub const FLAG_LAST: u32 = 0x40000000;

const NAME_LENGTH: usize = 64;

/// One record of the archive catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    /// Data offset for files, catalog index of the first child for directories.
    pub offset: u32,
    pub size: u32,
    pub flags: u32,
    pub attributes: u32,
}

impl Entry {
    pub fn is_dir(&self) -> bool {
        self.flags & FLAG_DIRECTORY != 0
    }

    pub fn is_last(&self) -> bool {
        self.flags & FLAG_LAST != 0
    }

    pub(crate) fn parse<R: Read>(rdr: &mut R) -> Result<Entry, VdfError> {
        let mut name = [0u8; NAME_LENGTH];
        rdr.read_exact(&mut name)?;

        Ok(Entry {
            name: decode_name(&name),
            offset: rdr.read_u32::<LittleEndian>()?,
            size: rdr.read_u32::<LittleEndian>()?,
            flags: rdr.read_u32::<LittleEndian>()?,
            attributes: rdr.read_u32::<LittleEndian>()?,
        })
    }
}

/// Names are Windows-1252, padded with spaces and sometimes NUL terminated. Only ASCII is
/// expected in practice, everything else is mapped as Latin-1.
pub(crate) fn decode_name(raw: &[u8]) -> String {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    raw[..end]
        .iter()
        .map(|&b| b as char)
        .collect::<String>()
        .trim_end_matches(' ')
        .to_string()
}

impl Entry {
    pub(crate) fn write<W: std::io::Write>(&self, w: &mut W) -> Result<(), VdfError> {
        use byteorder::WriteBytesExt;

        let mut name = [b' '; NAME_LENGTH];
        for (slot, byte) in name.iter_mut().zip(self.name.chars().map(|c| c as u32 as u8)) {
            *slot = byte;
        }
        w.write_all(&name)?;
        w.write_u32::<LittleEndian>(self.offset)?;
        w.write_u32::<LittleEndian>(self.size)?;
        w.write_u32::<LittleEndian>(self.flags)?;
        w.write_u32::<LittleEndian>(self.attributes)?;
        Ok(())
    }
}
