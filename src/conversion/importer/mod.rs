/// This module converts the records of bzen-files into the canonical [`MeshData`], which is what
/// gets cached, instanced and handed to the scene builder. Importers never touch the asset index,
/// loading the records is the business of the visual loader.
///
/// [`MeshData`]: crate::conversion::common::types::MeshData
pub mod decal_importer;
pub mod material_importer;
pub mod model_importer;
pub mod mrm_importer;
pub mod world_mesh_importer;

use crate::error::ConversionError;
use crate::io::common::loader::LoadError;

pub(crate) fn malformed(name: &str, reason: String) -> ConversionError {
    ConversionError::Decode {
        name: name.to_string(),
        source: LoadError::Malformed { reason },
    }
}
