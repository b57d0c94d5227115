use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::catalog::{Entry, ENTRY_SIZE};
use crate::VdfError;

pub const SIGNATURE_G1: &[u8; 16] = b"PSVDSC_V2.00\r\n\r\n";
pub const SIGNATURE_G2: &[u8; 16] = b"PSVDSC_V2.00\n\r\n\r";

const COMMENT_LENGTH: usize = 256;
/// The comment is terminated by a DOS EOF marker if it is shorter than the field.
const COMMENT_TERMINATOR: u8 = 0x1A;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub comment: String,
    pub signature: [u8; 16],
    pub entry_count: u32,
    pub file_count: u32,
    /// MS-DOS date/time of the archive creation.
    pub timestamp: u32,
    pub size: u32,
    pub catalog_offset: u32,
    pub version: u32,
}

impl Header {
    fn parse<R: Read>(rdr: &mut R) -> Result<Header, VdfError> {
        let mut comment = [0u8; COMMENT_LENGTH];
        rdr.read_exact(&mut comment)?;
        let comment_end = comment
            .iter()
            .position(|&b| b == COMMENT_TERMINATOR || b == 0)
            .unwrap_or(COMMENT_LENGTH);

        let mut signature = [0u8; 16];
        rdr.read_exact(&mut signature)?;
        if &signature != SIGNATURE_G1 && &signature != SIGNATURE_G2 {
            return Err(VdfError::InvalidSignature {
                signature: String::from_utf8_lossy(&signature).to_string(),
            });
        }

        Ok(Header {
            comment: comment[..comment_end]
                .iter()
                .map(|&b| b as char)
                .collect::<String>()
                .trim_end()
                .to_string(),
            signature,
            entry_count: rdr.read_u32::<LittleEndian>()?,
            file_count: rdr.read_u32::<LittleEndian>()?,
            timestamp: rdr.read_u32::<LittleEndian>()?,
            size: rdr.read_u32::<LittleEndian>()?,
            catalog_offset: rdr.read_u32::<LittleEndian>()?,
            version: rdr.read_u32::<LittleEndian>()?,
        })
    }
}

/// A file of the archive, as found by [`Archive::files`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    /// Slash separated path inside of the archive, e.g. `MESHES/_COMPILED/CHEST.MRM`
    pub path: String,
    pub name: String,
    pub offset: u32,
    pub size: u32,
}

pub struct Archive {
    path: Option<PathBuf>,
    header: Header,
    entries: Vec<Entry>,
}

impl Archive {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Archive, VdfError> {
        let file = File::open(path.as_ref())?;
        let mut archive = Archive::from_reader(&mut BufReader::new(file))?;
        archive.path = Some(path.as_ref().to_path_buf());
        Ok(archive)
    }

    pub fn from_reader<R: Read + Seek>(rdr: &mut R) -> Result<Archive, VdfError> {
        let archive_size = rdr.seek(SeekFrom::End(0))?;
        rdr.seek(SeekFrom::Start(0))?;
        let header = Header::parse(rdr)?;

        let count = header.entry_count as usize;
        let catalog_end = header.catalog_offset as u64 + count as u64 * ENTRY_SIZE;
        if catalog_end > archive_size {
            let fitting = archive_size.saturating_sub(header.catalog_offset as u64) / ENTRY_SIZE;
            return Err(VdfError::CatalogOutOfRange {
                index: fitting as usize,
                count,
            });
        }

        rdr.seek(SeekFrom::Start(header.catalog_offset as u64))?;
        let mut entries = Vec::with_capacity(count);
        for _ in 0..count {
            entries.push(Entry::parse(rdr)?);
        }

        Ok(Archive {
            path: None,
            header,
            entries,
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// The entries of one directory level, `None` being the archive root.
    pub fn children(&self, directory: Option<&Entry>) -> Result<&[Entry], VdfError> {
        match directory {
            None if self.entries.is_empty() => Ok(&[]),
            None => self.level_starting_at(0),
            Some(dir) => self.level_starting_at(dir.offset as usize),
        }
    }

    fn level_starting_at(&self, start: usize) -> Result<&[Entry], VdfError> {
        if start >= self.entries.len() {
            return Err(VdfError::CatalogOutOfRange {
                index: start,
                count: self.entries.len(),
            });
        }

        let end = self.entries[start..]
            .iter()
            .position(Entry::is_last)
            .map(|pos| start + pos + 1)
            .unwrap_or(self.entries.len());
        Ok(&self.entries[start..end])
    }

    /// Walks the catalog depth-first (with an explicit stack) and returns every file.
    pub fn files(&self) -> Result<Vec<FileNode>, VdfError> {
        // file_count is only a hint, the catalog length is bounded by the archive size
        let mut files = Vec::with_capacity(self.entries.len().min(self.header.file_count as usize));
        if self.entries.is_empty() {
            return Ok(files);
        }

        let mut visited = HashSet::new();
        let mut stack = vec![(String::new(), 0usize)];

        while let Some((prefix, start)) = stack.pop() {
            if !visited.insert(start) {
                return Err(VdfError::CatalogCycle { index: start });
            }

            for entry in self.level_starting_at(start)? {
                let path = match prefix.is_empty() {
                    true => entry.name.clone(),
                    false => format!("{}/{}", prefix, entry.name),
                };

                if entry.is_dir() {
                    stack.push((path, entry.offset as usize));
                } else {
                    files.push(FileNode {
                        path,
                        name: entry.name.clone(),
                        offset: entry.offset,
                        size: entry.size,
                    });
                }
            }
        }

        Ok(files)
    }

    /// Reads a file of an archive that has been opened from disk.
    pub fn read(&self, node: &FileNode) -> Result<Vec<u8>, VdfError> {
        match &self.path {
            Some(path) => read_entry_at(path, node),
            None => Err(VdfError::IOError(std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                "archive has not been opened from disk, use read_from",
            ))),
        }
    }

    pub fn read_from<R: Read + Seek>(&self, rdr: &mut R, node: &FileNode) -> Result<Vec<u8>, VdfError> {
        read_bounded(rdr, node)
    }
}

/// Reads a single file from the archive at `archive`, without parsing the catalog again.
pub fn read_entry_at<P: AsRef<Path>>(archive: P, node: &FileNode) -> Result<Vec<u8>, VdfError> {
    let mut file = File::open(archive)?;
    read_bounded(&mut file, node)
}

fn read_bounded<R: Read + Seek>(rdr: &mut R, node: &FileNode) -> Result<Vec<u8>, VdfError> {
    let archive_size = rdr.seek(SeekFrom::End(0))?;
    if node.offset as u64 + node.size as u64 > archive_size {
        return Err(VdfError::EntryOutOfBounds {
            name: node.path.clone(),
            offset: node.offset,
            size: node.size,
            archive_size,
        });
    }

    rdr.seek(SeekFrom::Start(node.offset as u64))?;
    let mut buf: Vec<u8> = vec![0; node.size as usize];
    rdr.read_exact(&mut buf)?;
    Ok(buf)
}
