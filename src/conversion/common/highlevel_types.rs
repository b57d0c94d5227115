use std::sync::Arc;

use glam::{Affine3A, Mat3, Quat, Vec3};

use crate::conversion::common::coordinate_systems::euler_xyz;
use crate::conversion::common::types::MeshData;

/// Meshes are shared between every object placing the same visual.
pub type SharedMesh = Arc<MeshData>;

/// An object of the scene, in target coordinates.
#[derive(Debug, Clone)]
pub struct PlacedObject {
    /// Unique within one world, e.g. `chest_1234` or `invisible:zcvobsound_77`
    pub name: String,
    pub mesh: SharedMesh,
    pub position: Vec3,
    pub rotation: Mat3,
}

impl PlacedObject {
    pub fn euler_xyz(&self) -> Vec3 {
        euler_xyz(&self.rotation)
    }

    pub fn quaternion(&self) -> Quat {
        Quat::from_mat3(&self.rotation)
    }

    pub fn transform(&self) -> Affine3A {
        Affine3A::from_mat3_translation(self.rotation, self.position)
    }

    /// Whether both objects are instances of the same mesh.
    pub fn shares_mesh_with(&self, other: &PlacedObject) -> bool {
        Arc::ptr_eq(&self.mesh, &other.mesh)
    }
}
