use bitflags::bitflags;

use crate::common::types::{Vec2f, Vec3f};
use crate::mesh::types::MaterialRecord;
use crate::world::vob::VirtualObject;

bitflags! {
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
    pub struct PolygonFlags: u16 {
        const PORTAL = 0x0001;
        const OCCLUDER = 0x0002;
        const SECTOR = 0x0004;
        const SHOULD_RELIGHT = 0x0008;
        const OUTDOOR = 0x0010;
        const GHOST_OCCLUDER = 0x0020;
        const DYNAMICALLY_LIT = 0x0040;
        const LOD = 0x0080;
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    pub material_index: u32,
    pub lightmap_index: i32,
    pub flags: PolygonFlags,
    /// Corner positions, indices into [`WorldMesh::positions`]
    pub position_indices: Vec<u32>,
    /// Corner features, indices into [`WorldMesh::features`]. Same length as `position_indices`.
    pub feature_indices: Vec<u32>,
}

impl Polygon {
    pub fn is_portal(&self) -> bool {
        self.flags.contains(PolygonFlags::PORTAL)
    }

    pub fn is_ghost_occluder(&self) -> bool {
        self.flags.contains(PolygonFlags::GHOST_OCCLUDER)
    }

    pub fn is_lod(&self) -> bool {
        self.flags.contains(PolygonFlags::LOD)
    }
}

/// Per-corner vertex attributes of the world mesh.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct VertexFeature {
    pub texture: Vec2f,
    pub light: u32,
    pub normal: Vec3f,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorldMesh {
    pub name: String,
    pub positions: Vec<Vec3f>,
    pub features: Vec<VertexFeature>,
    pub polygons: Vec<Polygon>,
    pub materials: Vec<MaterialRecord>,
}

/// The spatial partition of the world mesh. Only the polygons referenced by its leaves are
/// actually visible geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BspTree {
    pub leaf_polygon_indices: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WayPoint {
    pub name: String,
    pub position: Vec3f,
    pub direction: Vec3f,
    pub under_water: bool,
    pub free_point: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WayNet {
    pub points: Vec<WayPoint>,
}

/// A decoded `.zen` world.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct World {
    pub mesh: WorldMesh,
    pub bsp_tree: BspTree,
    pub root_objects: Vec<VirtualObject>,
    pub way_net: WayNet,
}
