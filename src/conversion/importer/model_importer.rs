use bzen_files::model::types::{Model, ModelHierarchy, ModelMesh};
use log::{debug, trace};

use crate::conversion::common::coordinate_systems::engine_to_blender;
use crate::conversion::common::mesh_merger::MeshMerger;
use crate::conversion::common::types::MeshData;
use crate::conversion::importer::mrm_importer::MrmImporter;
use crate::conversion::transform_composer::TransformComposer;
use crate::error::ConversionError;

pub struct ModelImporter {}

impl ModelImporter {
    /// Rigid attachments are placed by their node's composed transform, soft skins are already
    /// relative to the model root and only need the root translation removed.
    pub fn create_mesh(
        name: &str,
        mesh: &ModelMesh,
        hierarchy: &ModelHierarchy,
        scale: f32,
    ) -> Result<MeshData, ConversionError> {
        let composer = TransformComposer::compose(hierarchy, scale)?;
        let mut merged = MeshData::default();
        let mut placed_attachments = 0usize;

        for (index, node) in hierarchy.nodes.iter().enumerate() {
            let Some(attachment) = mesh.attachments.get(&node.name) else {
                continue;
            };

            let mut part = MrmImporter::create_mesh(name, attachment, scale)?;
            if let Some(transform) = composer.attachment_transform(index) {
                MeshMerger::mesh_transform_positions(&mut part, &transform);
            }
            MeshMerger::append(&mut merged, &part);
            placed_attachments += 1;
        }

        if placed_attachments < mesh.attachments.len() {
            debug!(
                "{}: {} attachments are not bound to any node",
                name,
                mesh.attachments.len() - placed_attachments
            );
        }

        let root_translation = engine_to_blender(hierarchy.root_translation, scale);
        for soft_skin in &mesh.meshes {
            let mut part = MrmImporter::create_mesh(name, &soft_skin.mesh, scale)?;
            MeshMerger::mesh_translate_positions(&mut part, -root_translation);
            MeshMerger::append(&mut merged, &part);
        }

        trace!("{}: {:?}", name, merged);
        Ok(merged)
    }

    pub fn create_model(name: &str, model: &Model, scale: f32) -> Result<MeshData, ConversionError> {
        Self::create_mesh(name, &model.mesh, &model.hierarchy, scale)
    }
}
