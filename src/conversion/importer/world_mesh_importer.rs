use std::collections::HashSet;
use std::time::Instant;

use bzen_files::world::types::World;
use log::{debug, trace};

use crate::conversion::common::coordinate_systems::{engine_normal_to_blender, engine_to_blender, engine_uv_to_blender};
use crate::conversion::common::types::{Corner, MeshBuilder, MeshData};
use crate::conversion::importer::malformed;
use crate::conversion::importer::material_importer::MaterialImporter;
use crate::error::ConversionError;

pub struct WorldMeshImporter {}

impl WorldMeshImporter {
    /// Converts the level geometry. Only polygons referenced by the BSP leaves are visible
    /// geometry; portals, ghost occluders and LOD duplicates among them are skipped as well.
    pub fn create_mesh(world: &World, scale: f32) -> Result<MeshData, ConversionError> {
        let now = Instant::now();
        let mesh = &world.mesh;
        let leaves = &world.bsp_tree.leaf_polygon_indices;
        let mut builder = MeshBuilder::with_capacity(mesh.positions.len(), leaves.len() * 2);

        for material in &mesh.materials {
            builder.material(MaterialImporter::create_material(material));
        }

        let mut seen_polygons = HashSet::with_capacity(leaves.len());
        let mut skipped = 0usize;

        for &leaf_index in leaves {
            let polygon = mesh.polygons.get(leaf_index as usize).ok_or_else(|| {
                malformed(
                    &mesh.name,
                    format!("leaf references polygon {} of {}", leaf_index, mesh.polygons.len()),
                )
            })?;

            if !seen_polygons.insert(leaf_index) {
                continue;
            }

            if polygon.is_portal() || polygon.is_ghost_occluder() || polygon.is_lod() {
                skipped += 1;
                continue;
            }

            if polygon.feature_indices.len() != polygon.position_indices.len() {
                return Err(malformed(
                    &mesh.name,
                    format!(
                        "polygon {} has {} positions but {} features",
                        leaf_index,
                        polygon.position_indices.len(),
                        polygon.feature_indices.len()
                    ),
                ));
            }

            let corner = |i: usize| -> Result<Corner, ConversionError> {
                let position = mesh
                    .positions
                    .get(polygon.position_indices[i] as usize)
                    .ok_or_else(|| malformed(&mesh.name, format!("polygon {} position out of range", leaf_index)))?;
                let feature = mesh
                    .features
                    .get(polygon.feature_indices[i] as usize)
                    .ok_or_else(|| malformed(&mesh.name, format!("polygon {} feature out of range", leaf_index)))?;

                Ok(Corner {
                    position: engine_to_blender(*position, scale),
                    normal: engine_normal_to_blender(feature.normal),
                    uv: engine_uv_to_blender(feature.texture),
                })
            };

            // fan triangulation around the first corner
            for i in 1..polygon.position_indices.len().saturating_sub(1) {
                builder.triangle([corner(0)?, corner(i)?, corner(i + 1)?], polygon.material_index);
            }
        }

        let mesh_data = builder.build();
        trace!("Skipped {} invisible polygons of {}", skipped, mesh.name);
        debug!(
            "Converted world mesh {} ({:?}) in {}ms",
            mesh.name,
            mesh_data,
            now.elapsed().as_millis()
        );
        Ok(mesh_data)
    }
}
