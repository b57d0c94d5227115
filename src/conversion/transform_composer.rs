use bzen_files::model::types::{HierarchyNode, ModelHierarchy};
use glam::Mat4;

use crate::conversion::common::coordinate_systems::{engine_mat3, hierarchy_root_correction, vec3};
use crate::error::ConversionError;

/// The world matrices of every node of a model hierarchy.
///
/// Roots (and nodes whose parent is negative) are corrected into the target convention once,
/// every other node inherits its parent's world matrix. Nodes have to be ordered parents first.
#[derive(Debug, Clone)]
pub struct TransformComposer {
    worlds: Vec<Mat4>,
}

impl TransformComposer {
    pub fn compose(hierarchy: &ModelHierarchy, scale: f32) -> Result<TransformComposer, ConversionError> {
        let correction = hierarchy_root_correction();
        let mut worlds: Vec<Mat4> = Vec::with_capacity(hierarchy.nodes.len());

        for (index, node) in hierarchy.nodes.iter().enumerate() {
            let local = Self::local_matrix(node, scale);
            let world = match node.parent {
                parent if parent < 0 => correction * local,
                parent => match worlds.get(parent as usize) {
                    Some(parent_world) => *parent_world * local,
                    None => return Err(ConversionError::InvalidHierarchy { index, parent }),
                },
            };
            worlds.push(world);
        }

        Ok(TransformComposer { worlds })
    }

    /// Rotation as stored, translation scaled but not axis swapped: the root correction takes
    /// care of that.
    pub fn local_matrix(node: &HierarchyNode, scale: f32) -> Mat4 {
        let rotation = engine_mat3(&node.rotation);
        let translation = vec3(node.translation) * scale;
        Mat4::from_cols(
            rotation.x_axis.extend(0.0),
            rotation.y_axis.extend(0.0),
            rotation.z_axis.extend(0.0),
            translation.extend(1.0),
        )
    }

    pub fn world(&self, index: usize) -> Option<Mat4> {
        self.worlds.get(index).copied()
    }

    /// The transform for geometry attached to node `index`. Attachment vertices are already axis
    /// swapped, so the correction is applied once more on top of the node's world matrix.
    pub fn attachment_transform(&self, index: usize) -> Option<Mat4> {
        self.world(index).map(|world| world * hierarchy_root_correction())
    }

    pub fn len(&self) -> usize {
        self.worlds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.worlds.is_empty()
    }
}
