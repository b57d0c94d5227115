use bzen_files::world::types::WayNet;
use glam::{Mat3, Vec3};
use log::info;

use crate::conversion::asset_graph::mesh_cache::MeshCache;
use crate::conversion::common::coordinate_systems::{engine_normal_to_blender, engine_to_blender};
use crate::conversion::common::highlevel_types::PlacedObject;
use crate::conversion::loader::visual_loader::VisualLoader;
use crate::error::ConversionError;
use crate::io::common::loader::AssetFormat;
use crate::io::index::AssetIndex;

pub const WAYPOINT_VISUAL: &str = "invisible_zcvobwaypoint.mrm";

pub struct WaynetConverter {}

impl WaynetConverter {
    /// Every waypoint becomes an instance of the waypoint helper mesh, facing along its direction.
    /// Unlike objects, a missing helper mesh fails the whole waynet.
    pub fn convert(
        way_net: &WayNet,
        index: &AssetIndex,
        cache: &MeshCache,
        scale: f32,
    ) -> Result<Vec<PlacedObject>, ConversionError> {
        let mesh = cache.resolve(WAYPOINT_VISUAL, || {
            VisualLoader::decode_compiled(WAYPOINT_VISUAL, AssetFormat::Mrm, index, scale)
        })?;

        let objects = way_net
            .points
            .iter()
            .map(|point| PlacedObject {
                name: point.name.to_ascii_lowercase(),
                mesh: mesh.clone(),
                position: engine_to_blender(point.position, scale),
                rotation: track_rotation(engine_normal_to_blender(point.direction)),
            })
            .collect::<Vec<_>>();

        info!("Indexed {} waypoints", objects.len());
        Ok(objects)
    }
}

/// A rotation whose +Y axis points along `direction`, keeping +Z as up as far as possible.
pub fn track_rotation(direction: Vec3) -> Mat3 {
    let y = direction.normalize_or_zero();
    let x = y.cross(Vec3::Z);
    if y == Vec3::ZERO || x.length_squared() < 1e-12 {
        return Mat3::IDENTITY;
    }

    let x = x.normalize();
    Mat3::from_cols(x, y, x.cross(y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_rotation_points_y_along_direction() {
        assert_eq!(track_rotation(Vec3::Y), Mat3::IDENTITY);

        let rotation = track_rotation(Vec3::new(2.0, 0.0, 0.0));
        assert!(rotation.y_axis.abs_diff_eq(Vec3::X, 1e-6));
        assert!(rotation.z_axis.abs_diff_eq(Vec3::Z, 1e-6));
        assert!((rotation.determinant() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_directions_fall_back_to_identity() {
        assert_eq!(track_rotation(Vec3::ZERO), Mat3::IDENTITY);
        assert_eq!(track_rotation(Vec3::Z), Mat3::IDENTITY);
    }
}
