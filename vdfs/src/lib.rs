//! A library for reading VDF archives (the virtual file system containers of the engine).
//!
//! Only the catalog is read eagerly; entry contents are read on demand and bounded by the size
//! of the archive, so an archive handle can be dropped right after traversal and entries can
//! still be fetched later through [`read_entry_at`].

#![allow(clippy::unreadable_literal)]

use thiserror::Error;

mod archive;
mod catalog;
mod writer;

pub use crate::archive::{read_entry_at, Archive, FileNode, Header};
pub use crate::catalog::{Entry, ENTRY_SIZE, FLAG_DIRECTORY, FLAG_LAST};
pub use crate::writer::ArchiveWriter;

#[cfg(test)]
mod tests;

#[derive(Error, Debug)]
pub enum VdfError {
    #[error("The archive signature {signature:?} is not a known VDF signature")]
    InvalidSignature { signature: String },

    #[error("Catalog entry {index} is outside of the catalog ({count} entries)")]
    CatalogOutOfRange { index: usize, count: usize },

    #[error("Catalog directory starting at {index} is referenced more than once")]
    CatalogCycle { index: usize },

    #[error("Entry {name} ({offset}+{size}) exceeds the archive size of {archive_size} bytes")]
    EntryOutOfBounds {
        name: String,
        offset: u32,
        size: u32,
        archive_size: u64,
    },

    #[error(transparent)]
    IOError(#[from] std::io::Error),
}
