//! The asset index: a map from lowercase compiled asset name to a lazy loader.
//!
//! Assets come from two sources, loose files below `_work/data/<category>/_compiled` and the
//! `.vdf` archives in `data/`. Both are scanned once per run, disk first, then the archives in a
//! fixed order. Every entry remembers its [`AssetSource`]; a source ranking equal or higher
//! replaces an existing entry, so archives override loose files and addon archives override their
//! base archive.

pub mod naming;

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use itertools::Itertools;
use log::{debug, info, trace, warn};

use crate::error::ConversionError;
use crate::io::common::loader::{AssetFormat, AssetLoader, AssetLocator, AssetRepository};
use crate::io::common::path::canonical_case_path;
use crate::io::index::naming::index_key;
use crate::io::vdf::loader::VdfLoader;

pub const VISUAL_CATEGORIES: [&str; 3] = ["anims", "textures", "meshes"];
pub const VISUAL_ARCHIVES: [&str; 6] = [
    "anims.vdf",
    "anims_addon.vdf",
    "textures.vdf",
    "textures_addon.vdf",
    "meshes.vdf",
    "meshes_addon.vdf",
];
pub const DEFAULT_TEXTURE: &str = "default.tga";

/// Where an index entry came from. The derived ordering is the precedence.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AssetSource {
    Disk,
    /// Position of the archive in [`VISUAL_ARCHIVES`]
    Archive(usize),
}

#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub source: AssetSource,
    pub loader: AssetLoader,
}

#[derive(Debug, Default)]
pub struct AssetIndex {
    entries: HashMap<String, IndexEntry>,
}

impl AssetIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans the game installation at `root`. A missing category directory is fatal, a missing or
    /// broken archive is skipped.
    pub fn build(root: &Path, repository: Arc<dyn AssetRepository>) -> Result<AssetIndex, ConversionError> {
        let now = Instant::now();
        let mut index = AssetIndex::new();

        index.index_disk(root, &repository).inspect_err(|err| {
            log::error!("Failed to index visuals: {}", err);
        })?;
        info!("Indexed from disk: {}", index.len());

        index.index_archives(root, &repository);
        info!("Indexed from archives: {}", index.len());

        info!(
            "Indexed {} visuals in {}ms",
            index.len(),
            now.elapsed().as_millis()
        );
        Ok(index)
    }

    fn index_disk(&mut self, root: &Path, repository: &Arc<dyn AssetRepository>) -> Result<(), ConversionError> {
        let mut stack = Vec::new();
        for category in VISUAL_CATEGORIES {
            let directory = canonical_case_path(&root.join("_work").join("data").join(category).join("_compiled"))?;
            stack.push(directory);
        }

        while let Some(directory) = stack.pop() {
            let entries =
                fs::read_dir(&directory).map_err(|err| ConversionError::io(directory.display().to_string(), &err))?;

            for entry in entries {
                let entry = entry.map_err(|err| ConversionError::io(directory.display().to_string(), &err))?;
                let path = entry.path();
                if path.is_dir() {
                    stack.push(path);
                    continue;
                }

                let file_name = entry.file_name().to_string_lossy().to_string();
                if let Some((key, format)) = index_key(&file_name) {
                    let loader = AssetLoader::new(AssetLocator::Disk(path), format, repository.clone());
                    self.insert(key, AssetSource::Disk, loader);
                }
            }
        }

        Ok(())
    }

    fn index_archives(&mut self, root: &Path, repository: &Arc<dyn AssetRepository>) {
        for (rank, archive_name) in VISUAL_ARCHIVES.iter().enumerate() {
            let path = match canonical_case_path(&root.join("data").join(archive_name)) {
                Ok(path) => path,
                Err(err) => {
                    debug!("Skipping archive {}: {}", archive_name, err);
                    continue;
                }
            };

            let mounted = match VdfLoader::mount(&path) {
                Ok(mounted) => mounted,
                Err(err) => {
                    warn!("Failed to mount {}: {}", path.display(), err);
                    continue;
                }
            };

            for node in mounted.files {
                if let Some((key, format)) = index_key(&node.name) {
                    let locator = AssetLocator::Archive {
                        archive: mounted.path.clone(),
                        node,
                    };
                    let loader = AssetLoader::new(locator, format, repository.clone());
                    self.insert(key, AssetSource::Archive(rank), loader);
                }
            }
        }
    }

    /// Registers `loader` under `key`, unless an entry from a higher ranking source exists.
    /// Returns whether the entry was taken.
    pub fn insert(&mut self, key: String, source: AssetSource, loader: AssetLoader) -> bool {
        match self.entries.get(&key) {
            Some(existing) if existing.source > source => {
                trace!("Keeping {} from {:?} over {:?}", key, existing.source, source);
                false
            }
            _ => {
                self.entries.insert(key, IndexEntry { source, loader });
                true
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&AssetLoader> {
        self.entries.get(key).map(|entry| &entry.loader)
    }

    pub fn entry(&self, key: &str) -> Option<&IndexEntry> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys_sorted(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).sorted().collect_vec()
    }

    pub fn counts_by_format(&self) -> Vec<(AssetFormat, usize)> {
        AssetFormat::ALL
            .into_iter()
            .map(|format| {
                let count = self
                    .entries
                    .values()
                    .filter(|entry| entry.loader.format() == format)
                    .count();
                (format, count)
            })
            .collect_vec()
    }

    /// Resolves a material texture reference to an indexed texture key, falling back to
    /// [`DEFAULT_TEXTURE`].
    pub fn texture(&self, name: &str) -> String {
        let key = name.to_ascii_lowercase();
        match self.contains(&key) {
            true => key,
            false => DEFAULT_TEXTURE.to_string(),
        }
    }
}
