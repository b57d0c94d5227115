use std::fmt::{Debug, Display, Formatter};
use std::path::PathBuf;
use std::sync::Arc;

use bzen_files::mesh::types::{MorphMesh, MultiResolutionMesh, Texture};
use bzen_files::model::types::{Model, ModelHierarchy, ModelMesh};
use bzen_files::world::types::World;
use thiserror::Error;
use vdfs::FileNode;

/// The compiled asset formats the pipeline knows about.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AssetFormat {
    /// Multi resolution mesh
    Mrm,
    /// Model (hierarchy + model mesh)
    Mdl,
    /// Model mesh
    Mdm,
    /// Morph mesh
    Mmb,
    /// Model hierarchy
    Mdh,
    /// Texture
    Tex,
}

impl AssetFormat {
    pub const ALL: [AssetFormat; 6] = [
        AssetFormat::Mrm,
        AssetFormat::Mdl,
        AssetFormat::Mdm,
        AssetFormat::Mmb,
        AssetFormat::Mdh,
        AssetFormat::Tex,
    ];

    pub fn from_extension(extension: &str) -> Option<AssetFormat> {
        AssetFormat::ALL
            .into_iter()
            .find(|format| extension.eq_ignore_ascii_case(format.extension()))
    }

    pub fn extension(&self) -> &'static str {
        match self {
            AssetFormat::Mrm => "mrm",
            AssetFormat::Mdl => "mdl",
            AssetFormat::Mdm => "mdm",
            AssetFormat::Mmb => "mmb",
            AssetFormat::Mdh => "mdh",
            AssetFormat::Tex => "tex",
        }
    }

    /// Visuals reference their source file (e.g. `CHEST.3DS`), the game ships the compiled one.
    pub fn compiled_from_source(source_extension: &str) -> Option<AssetFormat> {
        match source_extension.to_ascii_lowercase().as_str() {
            "3ds" => Some(AssetFormat::Mrm),
            "asc" => Some(AssetFormat::Mdl),
            "mds" => Some(AssetFormat::Mdm),
            "mms" => Some(AssetFormat::Mmb),
            "tga" => Some(AssetFormat::Tex),
            _ => None,
        }
    }
}

/// Where an asset can be read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetLocator {
    Disk(PathBuf),
    Archive { archive: PathBuf, node: FileNode },
}

impl AssetLocator {
    pub fn file_name(&self) -> String {
        match self {
            AssetLocator::Disk(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_default(),
            AssetLocator::Archive { node, .. } => node.name.clone(),
        }
    }

    /// Reads the raw bytes, for repositories that decode from memory.
    pub fn read_bytes(&self) -> Result<Vec<u8>, LoadError> {
        match self {
            AssetLocator::Disk(path) => std::fs::read(path).map_err(|err| LoadError::Io {
                locator: self.to_string(),
                message: err.to_string(),
            }),
            AssetLocator::Archive { archive, node } => vdfs::read_entry_at(archive, node).map_err(|err| LoadError::Io {
                locator: self.to_string(),
                message: err.to_string(),
            }),
        }
    }
}

impl Display for AssetLocator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetLocator::Disk(path) => write!(f, "{}", path.display()),
            AssetLocator::Archive { archive, node } => write!(f, "{}:{}", archive.display(), node.path),
        }
    }
}

/// A decoded asset, tagged by its format.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeRecord {
    MultiResolutionMesh(MultiResolutionMesh),
    Model(Model),
    ModelMesh(ModelMesh),
    MorphMesh(MorphMesh),
    ModelHierarchy(ModelHierarchy),
    Texture(Texture),
}

impl NativeRecord {
    pub fn format(&self) -> AssetFormat {
        match self {
            NativeRecord::MultiResolutionMesh(_) => AssetFormat::Mrm,
            NativeRecord::Model(_) => AssetFormat::Mdl,
            NativeRecord::ModelMesh(_) => AssetFormat::Mdm,
            NativeRecord::MorphMesh(_) => AssetFormat::Mmb,
            NativeRecord::ModelHierarchy(_) => AssetFormat::Mdh,
            NativeRecord::Texture(_) => AssetFormat::Tex,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error("Failed to read {locator}: {message}")]
    Io { locator: String, message: String },

    #[error("Malformed asset: {reason}")]
    Malformed { reason: String },

    #[error("The repository cannot decode {0:?} assets")]
    Unsupported(AssetFormat),
}

/// The binary decoder of the proprietary formats.
pub trait AssetRepository: Send + Sync {
    fn load(&self, locator: &AssetLocator, format: AssetFormat) -> Result<NativeRecord, LoadError>;

    fn load_world(&self, locator: &AssetLocator) -> Result<World, LoadError>;
}

/// A lazy handle on one indexed asset. Every call to [`AssetLoader::load`] decodes again, caching
/// is the caller's business.
#[derive(Clone)]
pub struct AssetLoader {
    locator: AssetLocator,
    format: AssetFormat,
    repository: Arc<dyn AssetRepository>,
}

impl AssetLoader {
    pub fn new(locator: AssetLocator, format: AssetFormat, repository: Arc<dyn AssetRepository>) -> Self {
        Self {
            locator,
            format,
            repository,
        }
    }

    pub fn locator(&self) -> &AssetLocator {
        &self.locator
    }

    pub fn format(&self) -> AssetFormat {
        self.format
    }

    pub fn load(&self) -> Result<NativeRecord, LoadError> {
        self.repository.load(&self.locator, self.format)
    }
}

impl Debug for AssetLoader {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ locator: {}, format: {:?} }}", self.locator, self.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_by_extension() {
        assert_eq!(AssetFormat::from_extension("MRM"), Some(AssetFormat::Mrm));
        assert_eq!(AssetFormat::from_extension("tex"), Some(AssetFormat::Tex));
        assert_eq!(AssetFormat::from_extension("zen"), None);
        assert_eq!(AssetFormat::compiled_from_source("3DS"), Some(AssetFormat::Mrm));
        assert_eq!(AssetFormat::compiled_from_source("mds"), Some(AssetFormat::Mdm));
        assert_eq!(AssetFormat::compiled_from_source("pfx"), None);
    }

    #[test]
    fn read_bytes_from_disk_and_archive() -> Result<(), anyhow::Error> {
        let dir = tempfile::tempdir()?;
        let loose = dir.path().join("CHEST.MRM");
        std::fs::write(&loose, b"loose")?;

        let archive_path = dir.path().join("MESHES.VDF");
        let mut buf = Vec::new();
        vdfs::ArchiveWriter::new("")
            .add_file("_COMPILED/BARREL.MRM", b"packed".to_vec())
            .write(&mut buf)?;
        std::fs::write(&archive_path, buf)?;

        let node = vdfs::Archive::open(&archive_path)?
            .files()?
            .into_iter()
            .next()
            .expect("archive has one file");

        assert_eq!(AssetLocator::Disk(loose).read_bytes()?, b"loose");
        let packed = AssetLocator::Archive {
            archive: archive_path,
            node,
        };
        assert_eq!(packed.file_name(), "BARREL.MRM");
        assert_eq!(packed.read_bytes()?, b"packed");
        Ok(())
    }
}
