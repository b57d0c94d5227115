use bzen_files::world::vob::VisualDecal;
use glam::{Vec2, Vec3, Vec4};

use crate::conversion::common::types::{MaterialData, MeshBuilder, MeshData};
use crate::util::trim_suffix;

const FRONT_FACES: [[u32; 3]; 2] = [[0, 1, 2], [0, 2, 3]];
const BACK_FACES: [[u32; 3]; 2] = [[6, 5, 4], [7, 6, 4]];

const FRONT_UVS: [[Vec2; 3]; 2] = [
    [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)],
    [Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0), Vec2::new(0.0, 1.0)],
];
const BACK_UVS: [[Vec2; 3]; 2] = [
    [Vec2::new(1.0, 1.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 0.0)],
    [Vec2::new(0.0, 1.0), Vec2::new(1.0, 1.0), Vec2::new(0.0, 0.0)],
];

pub struct DecalImporter {}

impl DecalImporter {
    /// A double sided quad in the XZ plane, textured with the decal's own visual.
    pub fn create_mesh(visual_name: &str, decal: &VisualDecal, scale: f32) -> MeshData {
        let name = visual_name.to_ascii_lowercase();
        let (dx, dy) = (decal.dimension.x * scale, decal.dimension.y * scale);
        let mut builder = MeshBuilder::with_capacity(8, 4);

        builder.material(MaterialData::new(trim_suffix(&name), Vec4::ONE, Some(name.clone())));

        let quad = [
            Vec3::new(-dx, 0.0, -dy),
            Vec3::new(dx, 0.0, -dy),
            Vec3::new(dx, 0.0, dy),
            Vec3::new(-dx, 0.0, dy),
        ];

        // front and back get their own copies
        for position in quad.iter().chain(quad.iter()) {
            builder.distinct_vertex(*position);
        }

        for (face, uvs) in FRONT_FACES.into_iter().zip(FRONT_UVS) {
            builder.face(face, [Vec3::Z; 3], uvs, 0);
        }
        for (face, uvs) in BACK_FACES.into_iter().zip(BACK_UVS) {
            builder.face(face, [Vec3::NEG_Z; 3], uvs, 0);
        }

        builder.build()
    }
}
