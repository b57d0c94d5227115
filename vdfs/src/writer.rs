use std::collections::{BTreeMap, VecDeque};
use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::archive::SIGNATURE_G1;
use crate::catalog::{Entry, ENTRY_SIZE, FLAG_DIRECTORY, FLAG_LAST};
use crate::VdfError;

const HEADER_SIZE: u32 = 296;
const VERSION: u32 = 0x50;
const ATTRIBUTE_ARCHIVE: u32 = 0x20;
const ATTRIBUTE_DIRECTORY: u32 = 0x10;

#[derive(Default)]
struct Directory {
    directories: BTreeMap<String, Directory>,
    files: BTreeMap<String, Vec<u8>>,
}

/// Builds an archive from in-memory files. Every directory level is laid out contiguously in the
/// catalog, breadth-first, the same layout the game's own archives use.
#[derive(Default)]
pub struct ArchiveWriter {
    comment: String,
    root: Directory,
}

impl ArchiveWriter {
    pub fn new(comment: &str) -> Self {
        Self {
            comment: comment.to_string(),
            root: Directory::default(),
        }
    }

    /// `path` uses `/` or `\` as separator, intermediate directories are created implicitly.
    pub fn add_file(&mut self, path: &str, data: Vec<u8>) -> &mut Self {
        let mut segments = path.split(['/', '\\']).filter(|s| !s.is_empty()).collect::<Vec<_>>();
        let Some(file_name) = segments.pop() else {
            return self;
        };

        let mut directory = &mut self.root;
        for segment in segments {
            directory = directory.directories.entry(segment.to_string()).or_default();
        }
        directory.files.insert(file_name.to_string(), data);
        self
    }

    pub fn write<W: Write>(&self, w: &mut W) -> Result<(), VdfError> {
        let mut entries: Vec<Entry> = Vec::new();
        let mut file_data: Vec<(usize, &[u8])> = Vec::new();
        let mut queue: VecDeque<(&Directory, Option<usize>)> = VecDeque::from([(&self.root, None)]);

        while let Some((directory, parent_entry)) = queue.pop_front() {
            let start = entries.len();
            if let Some(parent) = parent_entry {
                entries[parent].offset = start as u32;
            }

            for (name, child) in &directory.directories {
                entries.push(Entry {
                    name: name.clone(),
                    offset: 0,
                    size: 0,
                    flags: FLAG_DIRECTORY,
                    attributes: ATTRIBUTE_DIRECTORY,
                });
                queue.push_back((child, Some(entries.len() - 1)));
            }

            for (name, data) in &directory.files {
                entries.push(Entry {
                    name: name.clone(),
                    offset: 0,
                    size: data.len() as u32,
                    flags: 0,
                    attributes: ATTRIBUTE_ARCHIVE,
                });
                file_data.push((entries.len() - 1, data.as_slice()));
            }

            if entries.len() > start {
                if let Some(last) = entries.last_mut() {
                    last.flags |= FLAG_LAST;
                }
            }
        }

        let mut data_offset = HEADER_SIZE + entries.len() as u32 * ENTRY_SIZE as u32;
        for (index, data) in &file_data {
            entries[*index].offset = data_offset;
            data_offset += data.len() as u32;
        }

        let mut comment = [0x1Au8; 256];
        for (slot, byte) in comment.iter_mut().zip(self.comment.bytes()) {
            *slot = byte;
        }
        w.write_all(&comment)?;
        w.write_all(SIGNATURE_G1)?;
        w.write_u32::<LittleEndian>(entries.len() as u32)?;
        w.write_u32::<LittleEndian>(file_data.len() as u32)?;
        w.write_u32::<LittleEndian>(0)?;
        w.write_u32::<LittleEndian>(file_data.iter().map(|(_, data)| data.len() as u32).sum())?;
        w.write_u32::<LittleEndian>(HEADER_SIZE)?;
        w.write_u32::<LittleEndian>(VERSION)?;

        for entry in &entries {
            entry.write(w)?;
        }

        for (_, data) in &file_data {
            w.write_all(data)?;
        }

        Ok(())
    }
}
