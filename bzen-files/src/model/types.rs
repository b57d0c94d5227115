use std::collections::HashMap;

use crate::common::types::{Mat3x3, Vec3f};
use crate::mesh::types::MultiResolutionMesh;

#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyNode {
    pub name: String,
    /// Index of the parent node, `-1` for a root.
    pub parent: i16,
    pub rotation: Mat3x3,
    pub translation: Vec3f,
}

/// Skeleton (`.mdh`). The nodes are ordered parents-first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelHierarchy {
    pub nodes: Vec<HierarchyNode>,
    pub root_translation: Vec3f,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoftSkinMesh {
    pub mesh: MultiResolutionMesh,
}

/// Model mesh (`.mdm`): rigid attachments keyed by the node name they are bound to and soft skins
/// that are already expressed relative to the model root.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelMesh {
    pub attachments: HashMap<String, MultiResolutionMesh>,
    pub meshes: Vec<SoftSkinMesh>,
}

/// Model (`.mdl`), i.e. a model mesh bundled with its hierarchy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    pub hierarchy: ModelHierarchy,
    pub mesh: ModelMesh,
}
