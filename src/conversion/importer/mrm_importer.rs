use bzen_files::mesh::types::{MorphMesh, MultiResolutionMesh};

use crate::conversion::common::coordinate_systems::{engine_normal_to_blender, engine_to_blender, engine_uv_to_blender};
use crate::conversion::common::types::{Corner, MeshBuilder, MeshData};
use crate::conversion::importer::malformed;
use crate::conversion::importer::material_importer::MaterialImporter;
use crate::error::ConversionError;

pub struct MrmImporter {}

impl MrmImporter {
    /// Every sub mesh is drawn with the material of the same index. `name` is only used for
    /// error reporting.
    pub fn create_mesh(name: &str, mrm: &MultiResolutionMesh, scale: f32) -> Result<MeshData, ConversionError> {
        let face_count = mrm.sub_meshes.iter().map(|s| s.triangles.len()).sum();
        let mut builder = MeshBuilder::with_capacity(mrm.positions.len(), face_count);

        for material in &mrm.materials {
            builder.material(MaterialImporter::create_material(material));
        }

        for (sub_mesh_index, sub_mesh) in mrm.sub_meshes.iter().enumerate() {
            for triangle in &sub_mesh.triangles {
                let mut corners = [Corner::default(); 3];

                for (corner, &wedge_index) in corners.iter_mut().zip(&triangle.wedges) {
                    let wedge = sub_mesh.wedges.get(wedge_index as usize).ok_or_else(|| {
                        malformed(
                            name,
                            format!("sub mesh {} references wedge {}", sub_mesh_index, wedge_index),
                        )
                    })?;
                    let position = mrm.positions.get(wedge.index as usize).ok_or_else(|| {
                        malformed(
                            name,
                            format!("sub mesh {} references position {}", sub_mesh_index, wedge.index),
                        )
                    })?;

                    *corner = Corner {
                        position: engine_to_blender(*position, scale),
                        normal: engine_normal_to_blender(wedge.normal),
                        uv: engine_uv_to_blender(wedge.texture),
                    };
                }

                builder.triangle(corners, sub_mesh_index as u32);
            }
        }

        Ok(builder.build())
    }

    /// Only the base mesh of a morph mesh is converted, the animations are dropped.
    pub fn create_morph_mesh(name: &str, mmb: &MorphMesh, scale: f32) -> Result<MeshData, ConversionError> {
        Self::create_mesh(name, &mmb.mesh, scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bzen_files::common::types::{Color, Vec2f, Vec3f};
    use bzen_files::mesh::types::{MaterialRecord, MeshTriangle, SubMesh, Wedge};
    use glam::{Vec2, Vec3};

    fn wedge(index: u16, u: f32) -> Wedge {
        Wedge {
            normal: Vec3f::new(0.0, 1.0, 0.0),
            texture: Vec2f::new(u, 0.5),
            index,
        }
    }

    fn two_sub_meshes() -> MultiResolutionMesh {
        MultiResolutionMesh {
            positions: vec![
                Vec3f::new(0.0, 0.0, 0.0),
                Vec3f::new(100.0, 0.0, 0.0),
                Vec3f::new(0.0, 100.0, 0.0),
                Vec3f::new(0.0, 0.0, 100.0),
            ],
            materials: vec![
                MaterialRecord::new("WOOD", Color::WHITE, "WOOD.TGA"),
                MaterialRecord::new("METAL", Color::WHITE, "METAL.TGA"),
            ],
            sub_meshes: vec![
                SubMesh {
                    triangles: vec![MeshTriangle { wedges: [0, 1, 2] }],
                    wedges: vec![wedge(0, 0.0), wedge(1, 1.0), wedge(2, 0.0)],
                },
                SubMesh {
                    triangles: vec![MeshTriangle { wedges: [0, 1, 2] }],
                    // shares position 0 with the first sub mesh, with a different uv
                    wedges: vec![wedge(0, 0.25), wedge(2, 1.0), wedge(3, 0.0)],
                },
            ],
        }
    }

    #[test]
    fn sub_meshes_map_to_materials() -> Result<(), anyhow::Error> {
        let mesh = MrmImporter::create_mesh("test.mrm", &two_sub_meshes(), 0.01)?;

        assert_eq!(mesh.materials.len(), 2);
        assert_eq!(mesh.material_indices, vec![0, 1]);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.faces, vec![[0, 1, 2], [0, 2, 3]]);
        assert!(mesh.is_consistent());
        Ok(())
    }

    #[test]
    fn coordinates_are_converted() -> Result<(), anyhow::Error> {
        let mesh = MrmImporter::create_mesh("test.mrm", &two_sub_meshes(), 0.01)?;

        // engine (0, 100, 0) is up, which is +Z in the target
        assert_eq!(mesh.vertices[2], Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(mesh.vertices[3], Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(mesh.normals[0], Vec3::Z);
        assert_eq!(mesh.uvs[3], Vec2::new(0.25, -0.5));
        Ok(())
    }

    #[test]
    fn broken_wedge_reference_is_a_decode_error() {
        let mut mrm = two_sub_meshes();
        mrm.sub_meshes[1].triangles[0].wedges = [0, 1, 9];

        let result = MrmImporter::create_mesh("broken.mrm", &mrm, 0.01);
        assert!(matches!(result, Err(ConversionError::Decode { ref name, .. }) if name == "broken.mrm"));
    }

    #[test]
    fn morph_mesh_uses_base_mesh() -> Result<(), anyhow::Error> {
        let mmb = MorphMesh {
            name: "HEAD".to_string(),
            mesh: two_sub_meshes(),
        };
        let mesh = MrmImporter::create_morph_mesh("head.mmb", &mmb, 0.01)?;
        assert_eq!(mesh, MrmImporter::create_mesh("test.mrm", &two_sub_meshes(), 0.01)?);
        Ok(())
    }
}
