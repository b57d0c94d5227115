//! Handing a converted world to a scene builder (the host authoring tool, or a file writer).

pub mod obj_writer;

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use glam::{Mat3, Vec3};
use log::info;

use crate::conversion::ConvertedWorld;
use crate::conversion::common::types::MeshData;
use crate::error::ConversionError;

pub const LEVEL_NAME: &str = "LEVEL";

pub trait SceneBuilder {
    type MeshHandle: Clone;

    /// Creates a mesh resource (with its materials) that can be instanced.
    fn create_mesh_resource(&mut self, name: &str, mesh: &MeshData) -> Result<Self::MeshHandle, ConversionError>;

    fn create_instance(
        &mut self,
        name: &str,
        mesh: &Self::MeshHandle,
        position: Vec3,
        rotation: Mat3,
    ) -> Result<(), ConversionError>;

    fn persist(&mut self, path: &Path) -> Result<(), ConversionError>;
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ExportStats {
    pub mesh_resources: usize,
    pub instances: usize,
}

/// Creates the level, one mesh resource per distinct shared mesh and one instance per object,
/// then persists the scene to `path`.
pub fn export_scene<B: SceneBuilder>(
    builder: &mut B,
    world: &ConvertedWorld,
    path: &Path,
) -> Result<ExportStats, ConversionError> {
    let now = Instant::now();
    let mut stats = ExportStats::default();

    info!("Creating world");
    let level = builder.create_mesh_resource(LEVEL_NAME, &world.level)?;
    builder.create_instance(LEVEL_NAME, &level, Vec3::ZERO, Mat3::IDENTITY)?;
    stats.mesh_resources += 1;
    stats.instances += 1;

    info!("Creating VOBs");
    let mut handles: HashMap<*const MeshData, B::MeshHandle> = HashMap::new();
    for object in &world.objects {
        let handle = match handles.entry(Arc::as_ptr(&object.mesh)) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => {
                let handle = builder.create_mesh_resource(&object.name, &object.mesh)?;
                stats.mesh_resources += 1;
                entry.insert(handle).clone()
            }
        };

        builder.create_instance(&object.name, &handle, object.position, object.rotation)?;
        stats.instances += 1;
    }

    info!("Saving to {}...", path.display());
    builder.persist(path)?;
    info!(
        "Exported {} meshes, {} instances in {}ms",
        stats.mesh_resources,
        stats.instances,
        now.elapsed().as_millis()
    );
    Ok(stats)
}
