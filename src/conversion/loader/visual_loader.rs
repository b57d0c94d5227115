use bzen_files::mesh::types::{MorphMesh, MultiResolutionMesh};
use bzen_files::model::types::{Model, ModelHierarchy, ModelMesh};
use bzen_files::world::vob::VisualDecal;
use log::trace;

use crate::conversion::common::types::MeshData;
use crate::conversion::importer::decal_importer::DecalImporter;
use crate::conversion::importer::model_importer::ModelImporter;
use crate::conversion::importer::mrm_importer::MrmImporter;
use crate::error::ConversionError;
use crate::io::common::loader::{AssetFormat, LoadError, NativeRecord};
use crate::io::index::AssetIndex;
use crate::io::index::naming::compiled_key;
use crate::util::with_suffix;

/// The decoded records of one visual, one variant per kind of geometry.
#[derive(Debug, Clone)]
pub enum VisualGeometry {
    MultiResolutionMesh(MultiResolutionMesh),
    Model(Model),
    ModelMesh {
        mesh: ModelMesh,
        hierarchy: ModelHierarchy,
    },
    MorphMesh(MorphMesh),
    Decal(VisualDecal),
}

impl VisualGeometry {
    pub fn into_mesh(self, name: &str, scale: f32) -> Result<MeshData, ConversionError> {
        match self {
            VisualGeometry::MultiResolutionMesh(mrm) => MrmImporter::create_mesh(name, &mrm, scale),
            VisualGeometry::Model(model) => ModelImporter::create_model(name, &model, scale),
            VisualGeometry::ModelMesh { mesh, hierarchy } => ModelImporter::create_mesh(name, &mesh, &hierarchy, scale),
            VisualGeometry::MorphMesh(mmb) => MrmImporter::create_morph_mesh(name, &mmb, scale),
            VisualGeometry::Decal(decal) => Ok(DecalImporter::create_mesh(name, &decal, scale)),
        }
    }
}

pub struct VisualLoader {}

impl VisualLoader {
    /// Decodes the visual named by its source name, e.g. `CHEST.3DS` or `HUM_BODY.MDS`.
    pub fn decode(visual_name: &str, index: &AssetIndex, scale: f32) -> Result<MeshData, ConversionError> {
        let (key, format) = compiled_key(visual_name).ok_or_else(|| ConversionError::UnsupportedFormat {
            name: visual_name.to_string(),
        })?;
        Self::decode_compiled(&key, format, index, scale)
    }

    /// Decodes an already compiled, indexed asset, e.g. `chest.mrm`.
    pub fn decode_compiled(
        key: &str,
        format: AssetFormat,
        index: &AssetIndex,
        scale: f32,
    ) -> Result<MeshData, ConversionError> {
        trace!("Decoding {} as {:?}", key, format);
        Self::load_geometry(key, format, index)?.into_mesh(key, scale)
    }

    pub fn load_geometry(
        key: &str,
        format: AssetFormat,
        index: &AssetIndex,
    ) -> Result<VisualGeometry, ConversionError> {
        // hierarchies and textures are never placed on their own
        if matches!(format, AssetFormat::Mdh | AssetFormat::Tex) {
            return Err(ConversionError::UnsupportedFormat { name: key.to_string() });
        }

        match (format, Self::load_record(key, index)?) {
            (AssetFormat::Mrm, NativeRecord::MultiResolutionMesh(mrm)) => Ok(VisualGeometry::MultiResolutionMesh(mrm)),
            (AssetFormat::Mdl, NativeRecord::Model(model)) => Ok(VisualGeometry::Model(model)),
            (AssetFormat::Mmb, NativeRecord::MorphMesh(mmb)) => Ok(VisualGeometry::MorphMesh(mmb)),
            (AssetFormat::Mdm, NativeRecord::ModelMesh(mesh)) => {
                let hierarchy_key = with_suffix(key, AssetFormat::Mdh.extension());
                match Self::load_record(&hierarchy_key, index)? {
                    NativeRecord::ModelHierarchy(hierarchy) => Ok(VisualGeometry::ModelMesh { mesh, hierarchy }),
                    other => Err(Self::unexpected(&hierarchy_key, AssetFormat::Mdh, &other)),
                }
            }
            (format, other) => Err(Self::unexpected(key, format, &other)),
        }
    }

    fn load_record(key: &str, index: &AssetIndex) -> Result<NativeRecord, ConversionError> {
        let loader = index.get(key).ok_or_else(|| ConversionError::MissingAsset { name: key.to_string() })?;
        loader.load().map_err(|source| ConversionError::Decode {
            name: key.to_string(),
            source,
        })
    }

    fn unexpected(key: &str, expected: AssetFormat, record: &NativeRecord) -> ConversionError {
        ConversionError::Decode {
            name: key.to_string(),
            source: LoadError::Malformed {
                reason: format!("expected a {:?} record, got {:?}", expected, record.format()),
            },
        }
    }
}
