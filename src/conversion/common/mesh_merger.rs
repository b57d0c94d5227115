use glam::{Mat4, Vec3};
use log::warn;

use crate::conversion::common::types::MeshData;

pub enum MeshMerger {}

impl MeshMerger {
    /// Concatenates meshes, offsetting face indices by the running vertex count and material
    /// indices by the running material count. Vertices are not deduplicated across meshes.
    pub fn merge_meshes(input_meshes: &[MeshData]) -> MeshData {
        let mut merged_mesh = MeshData {
            vertices: Vec::with_capacity(input_meshes.iter().map(|m| m.vertices.len()).sum()),
            faces: Vec::with_capacity(input_meshes.iter().map(|m| m.faces.len()).sum()),
            ..MeshData::default()
        };

        if input_meshes.is_empty() {
            warn!("Merging 0 meshes");
            return merged_mesh;
        }

        for mesh in input_meshes {
            Self::append(&mut merged_mesh, mesh);
        }

        merged_mesh
    }

    pub fn append(target: &mut MeshData, mesh: &MeshData) {
        let vertex_offset = target.vertices.len() as u32;
        let material_offset = target.materials.len() as u32;

        target.vertices.extend_from_slice(&mesh.vertices);
        target.normals.extend_from_slice(&mesh.normals);
        target.uvs.extend_from_slice(&mesh.uvs);
        target.materials.extend_from_slice(&mesh.materials);

        target
            .faces
            .extend(mesh.faces.iter().map(|face| face.map(|index| index + vertex_offset)));
        target
            .material_indices
            .extend(mesh.material_indices.iter().map(|index| index + material_offset));
    }

    pub fn mesh_transform_positions(mesh: &mut MeshData, transform: &Mat4) {
        for pos in &mut mesh.vertices {
            *pos = transform.transform_point3(*pos);
        }
    }

    pub fn mesh_translate_positions(mesh: &mut MeshData, offset: Vec3) {
        for pos in &mut mesh.vertices {
            *pos += offset;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::common::types::MaterialData;
    use glam::{Vec2, Vec4};

    fn triangle(material: &str) -> MeshData {
        MeshData {
            vertices: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            faces: vec![[0, 1, 2]],
            normals: vec![Vec3::Z; 3],
            uvs: vec![Vec2::ZERO; 3],
            materials: vec![MaterialData::new(material, Vec4::ONE, None)],
            material_indices: vec![0],
        }
    }

    #[test]
    fn merge_offsets_indices() {
        let merged = MeshMerger::merge_meshes(&[triangle("a"), triangle("b")]);

        assert_eq!(merged.vertices.len(), 6);
        assert_eq!(merged.faces, vec![[0, 1, 2], [3, 4, 5]]);
        assert_eq!(merged.material_indices, vec![0, 1]);
        assert_eq!(merged.materials[1].name, "b");
        assert!(merged.is_consistent());
    }

    #[test]
    fn merging_nothing_is_empty() {
        assert!(MeshMerger::merge_meshes(&[]).is_empty());
    }

    #[test]
    fn translate_positions() {
        let mut mesh = triangle("a");
        MeshMerger::mesh_translate_positions(&mut mesh, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(mesh.vertices[1], Vec3::new(1.0, 0.0, -1.0));
    }
}
