use std::collections::HashMap;
use std::fmt::{Debug, Formatter};

use glam::{Vec2, Vec3, Vec4};

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialData {
    pub name: String,
    /// RGBA, every channel in `[0, 1]`
    pub color: Vec4,
    /// Lowercase texture asset name, e.g. `stone.tga`
    pub texture: Option<String>,
}

impl MaterialData {
    pub fn new(name: impl Into<String>, color: Vec4, texture: Option<String>) -> Self {
        Self {
            name: name.into(),
            color,
            texture,
        }
    }
}

/// The canonical mesh. `normals` and `uvs` are per face corner, `material_indices` per face.
#[derive(Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<[u32; 3]>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub materials: Vec<MaterialData>,
    pub material_indices: Vec<u32>,
}

impl MeshData {
    /// A mesh without vertices decodes fine but has nothing to place.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Whether the per-face and per-corner buffers line up with the faces.
    pub fn is_consistent(&self) -> bool {
        let corners = self.faces.len() * 3;
        self.material_indices.len() == self.faces.len()
            && self.normals.len() == corners
            && self.uvs.len() == corners
            && self
                .faces
                .iter()
                .flatten()
                .all(|&index| (index as usize) < self.vertices.len())
    }
}

impl Debug for MeshData {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ vertices: [{}], ", self.vertices.len())?;
        write!(f, "faces: [{}], ", self.faces.len())?;
        write!(f, "normals: [{}], ", self.normals.len())?;
        write!(f, "uvs: [{}], ", self.uvs.len())?;
        write!(f, "materials: {:?}, ", self.materials)?;
        write!(f, "material_indices: [{}] }}", self.material_indices.len())
    }
}

/// One triangle corner, in target coordinates.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Corner {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

/// Accumulates a [`MeshData`] while decoding. Positions are deduplicated by their exact
/// (post-conversion) value, normals and uvs never are.
#[derive(Default)]
pub struct MeshBuilder {
    mesh: MeshData,
    vertex_lookup: HashMap<[u32; 3], u32>,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, faces: usize) -> Self {
        Self {
            mesh: MeshData {
                vertices: Vec::with_capacity(vertices),
                faces: Vec::with_capacity(faces),
                normals: Vec::with_capacity(faces * 3),
                uvs: Vec::with_capacity(faces * 3),
                materials: Vec::new(),
                material_indices: Vec::with_capacity(faces),
            },
            vertex_lookup: HashMap::with_capacity(vertices),
        }
    }

    pub fn material(&mut self, material: MaterialData) -> u32 {
        self.mesh.materials.push(material);
        (self.mesh.materials.len() - 1) as u32
    }

    pub fn material_count(&self) -> usize {
        self.mesh.materials.len()
    }

    /// Returns the index of `position`, adding it if it has not been seen yet.
    pub fn vertex(&mut self, position: Vec3) -> u32 {
        // +0.0 folds -0.0 into 0.0, they are the same point
        let key = (position + Vec3::ZERO).to_array().map(f32::to_bits);
        let next = self.mesh.vertices.len() as u32;
        let index = *self.vertex_lookup.entry(key).or_insert(next);
        if index == next {
            self.mesh.vertices.push(position);
        }
        index
    }

    /// Adds `position` without deduplication.
    pub fn distinct_vertex(&mut self, position: Vec3) -> u32 {
        self.mesh.vertices.push(position);
        (self.mesh.vertices.len() - 1) as u32
    }

    pub fn triangle(&mut self, corners: [Corner; 3], material_index: u32) {
        let face = corners.map(|corner| self.vertex(corner.position));
        self.face(face, corners.map(|c| c.normal), corners.map(|c| c.uv), material_index);
    }

    /// Adds a face over already added vertices.
    pub fn face(&mut self, face: [u32; 3], normals: [Vec3; 3], uvs: [Vec2; 3], material_index: u32) {
        self.mesh.faces.push(face);
        self.mesh.normals.extend_from_slice(&normals);
        self.mesh.uvs.extend_from_slice(&uvs);
        self.mesh.material_indices.push(material_index);
    }

    pub fn build(self) -> MeshData {
        self.mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corner(x: f32, y: f32, z: f32) -> Corner {
        Corner {
            position: Vec3::new(x, y, z),
            normal: Vec3::Z,
            uv: Vec2::ZERO,
        }
    }

    #[test]
    fn shared_positions_are_deduplicated() {
        let mut builder = MeshBuilder::new();
        builder.triangle([corner(0.0, 0.0, 0.0), corner(1.0, 0.0, 0.0), corner(1.0, 1.0, 0.0)], 0);
        builder.triangle([corner(-0.0, 0.0, 0.0), corner(1.0, 1.0, 0.0), corner(0.0, 1.0, 0.0)], 0);
        let mesh = builder.build();

        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.faces, vec![[0, 1, 2], [0, 2, 3]]);
        assert_eq!(mesh.normals.len(), 6);
        assert!(mesh.is_consistent());
    }

    #[test]
    fn distinct_vertices_are_kept() {
        let mut builder = MeshBuilder::new();
        let a = builder.vertex(Vec3::ONE);
        let b = builder.distinct_vertex(Vec3::ONE);
        assert_ne!(a, b);
        assert_eq!(builder.build().vertices.len(), 2);
    }

    #[test]
    fn empty_mesh_is_flagged() {
        let mesh = MeshBuilder::new().build();
        assert!(mesh.is_empty());
        assert!(mesh.is_consistent());
    }
}
