use crate::common::types::{Color, Vec2f, Vec3f};

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialRecord {
    pub name: String,
    pub color: Color,
    /// The texture name as referenced by the material, e.g. `STONE.TGA`. Empty if untextured.
    pub texture: String,
}

impl MaterialRecord {
    pub fn new(name: impl Into<String>, color: Color, texture: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color,
            texture: texture.into(),
        }
    }
}

/// A per-corner bundle of vertex position index, normal and texture coordinate.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Wedge {
    pub normal: Vec3f,
    pub texture: Vec2f,
    /// Index into [`MultiResolutionMesh::positions`]
    pub index: u16,
}

/// A triangle referencing three wedges of the owning [`SubMesh`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MeshTriangle {
    pub wedges: [u16; 3],
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubMesh {
    pub triangles: Vec<MeshTriangle>,
    pub wedges: Vec<Wedge>,
}

/// Progressive mesh (`.mrm`). Sub mesh `i` is rendered with material `i`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiResolutionMesh {
    pub positions: Vec<Vec3f>,
    pub materials: Vec<MaterialRecord>,
    pub sub_meshes: Vec<SubMesh>,
}

/// Morph mesh (`.mmb`). Only the base mesh is of interest, the morph animations are not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MorphMesh {
    pub name: String,
    pub mesh: MultiResolutionMesh,
}

/// Compiled texture (`.tex`). Pixel data is not needed for the conversion itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub mipmap_count: u32,
}
