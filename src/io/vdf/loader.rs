use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{debug, trace};
use vdfs::{Archive, FileNode, VdfError};

/// The file listing of one archive. The archive handle itself is released after mounting, files
/// are read later through [`vdfs::read_entry_at`].
#[derive(Debug, Clone)]
pub struct MountedArchive {
    pub path: PathBuf,
    pub files: Vec<FileNode>,
}

impl MountedArchive {
    /// Finds a file by its name (not path), ignoring case.
    pub fn find(&self, name: &str) -> Option<&FileNode> {
        self.files.iter().find(|node| node.name.eq_ignore_ascii_case(name))
    }
}

pub struct VdfLoader {}

impl VdfLoader {
    pub fn mount(path: &Path) -> Result<MountedArchive, VdfError> {
        let now = Instant::now();
        let archive = Archive::open(path)?;
        trace!(
            "{}: {} entries, {} files, \"{}\"",
            path.display(),
            archive.header().entry_count,
            archive.header().file_count,
            archive.header().comment
        );

        let files = archive.files()?;
        debug!(
            "Mounted {} ({} files) in {}ms",
            path.display(),
            files.len(),
            now.elapsed().as_millis()
        );

        Ok(MountedArchive {
            path: path.to_path_buf(),
            files,
        })
    }
}
