mod support;

use std::fs;
use std::path::Path;

use bzen::conversion::common::types::MeshData;
use bzen::conversion::convert_world;
use bzen::conversion::export::obj_writer::ObjSceneWriter;
use bzen::conversion::export::{ExportStats, LEVEL_NAME, SceneBuilder, export_scene};
use bzen::error::ConversionError;
use bzen::io::common::loader::NativeRecord;
use bzen::settings::ConversionSettings;
use bzen::world::NoItemVisuals;
use bzen_files::common::types::Vec3f;
use bzen_files::world::types::World;
use bzen_files::world::vob::{VirtualObject, VisualKind, VobType};
use glam::{Mat3, Vec3};
use support::{Fixture, triangle_mrm};

/// Remembers what was asked of it.
#[derive(Default)]
struct RecordingBuilder {
    resources: Vec<String>,
    instances: Vec<(String, usize, Vec3)>,
    persisted: Option<String>,
}

impl SceneBuilder for RecordingBuilder {
    type MeshHandle = usize;

    fn create_mesh_resource(&mut self, name: &str, _mesh: &MeshData) -> Result<usize, ConversionError> {
        self.resources.push(name.to_string());
        Ok(self.resources.len() - 1)
    }

    fn create_instance(
        &mut self,
        name: &str,
        mesh: &usize,
        position: Vec3,
        _rotation: Mat3,
    ) -> Result<(), ConversionError> {
        self.instances.push((name.to_string(), *mesh, position));
        Ok(())
    }

    fn persist(&mut self, path: &Path) -> Result<(), ConversionError> {
        self.persisted = Some(path.display().to_string());
        Ok(())
    }
}

fn converted_chests() -> Result<bzen::conversion::ConvertedWorld, ConversionError> {
    let (index, _) = Fixture::new()
        .with("chest.mrm", NativeRecord::MultiResolutionMesh(triangle_mrm("WOOD")))
        .with("barrel.mrm", NativeRecord::MultiResolutionMesh(triangle_mrm("OAK")))
        .build();
    let objects = vec![
        VirtualObject::new(1, "", VobType::Vob)
            .with_visual("CHEST.3DS", VisualKind::MultiResolutionMesh)
            .with_position(Vec3f::new(100.0, 0.0, 0.0)),
        VirtualObject::new(2, "", VobType::Vob).with_visual("CHEST.3DS", VisualKind::MultiResolutionMesh),
        VirtualObject::new(3, "", VobType::Vob).with_visual("BARREL.3DS", VisualKind::MultiResolutionMesh),
    ];
    let world = World {
        root_objects: objects,
        ..World::default()
    };

    convert_world(&world, &index, &NoItemVisuals {}, &ConversionSettings::default())
}

#[test]
fn shared_meshes_become_one_resource() -> Result<(), anyhow::Error> {
    let converted = converted_chests()?;
    let mut builder = RecordingBuilder::default();

    let stats = export_scene(&mut builder, &converted, Path::new("newworld.blend"))?;

    assert_eq!(
        stats,
        ExportStats {
            mesh_resources: 3,
            instances: 4
        }
    );
    assert_eq!(builder.resources[0], LEVEL_NAME);
    assert_eq!(builder.instances[0], (LEVEL_NAME.to_string(), 0, Vec3::ZERO));

    let chests = builder
        .instances
        .iter()
        .filter(|(name, _, _)| name.starts_with("chest_"))
        .collect::<Vec<_>>();
    assert_eq!(chests.len(), 2);
    assert_eq!(chests[0].1, chests[1].1);
    assert_eq!(builder.persisted.as_deref(), Some("newworld.blend"));
    Ok(())
}

#[test]
fn obj_export_bakes_instances() -> Result<(), anyhow::Error> {
    let converted = converted_chests()?;
    let directory = tempfile::tempdir()?;
    let target = directory.path().join("newworld.obj");
    let mut writer = ObjSceneWriter::new();

    export_scene(&mut writer, &converted, &target)?;

    let obj = fs::read_to_string(&target)?;
    let mtl = fs::read_to_string(directory.path().join("newworld.mtl"))?;

    assert!(obj.starts_with("mtllib newworld.mtl\n"));
    assert_eq!(obj.lines().filter(|line| line.starts_with("o ")).count(), 4);
    assert_eq!(obj.lines().filter(|line| line.starts_with("v ")).count(), 9);
    assert_eq!(obj.lines().filter(|line| line.starts_with("f ")).count(), 3);
    assert!(obj.contains("o chest_1\n"));
    // chest_1 sits one unit along X, its first corner with it
    assert!(obj.contains("v 1 0 0\n"));

    // both chests share one material, the barrel has its own
    assert_eq!(mtl.lines().filter(|line| line.starts_with("newmtl ")).count(), 2);
    assert!(mtl.contains("map_Kd wood.tga"));
    assert!(mtl.contains("map_Kd oak.tga"));
    Ok(())
}

#[test]
fn unknown_mesh_handles_are_rejected() {
    let mut writer = ObjSceneWriter::new();
    let result = writer.create_instance("ghost", &3, Vec3::ZERO, Mat3::IDENTITY);

    assert!(matches!(result, Err(ConversionError::MeshResolution { .. })));
}
