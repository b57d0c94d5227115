pub mod asset_graph;
pub mod common;
pub mod export;
pub mod importer;
pub mod loader;
pub mod transform_composer;

use std::time::Instant;

use bzen_files::world::types::World;
use log::{error, info};

use crate::conversion::asset_graph::mesh_cache::{CacheStats, MeshCache};
use crate::conversion::common::highlevel_types::PlacedObject;
use crate::conversion::common::types::MeshData;
use crate::conversion::importer::world_mesh_importer::WorldMeshImporter;
use crate::error::ConversionError;
use crate::io::index::AssetIndex;
use crate::settings::ConversionSettings;
use crate::world::ItemVisualResolver;
use crate::world::vob_walker::VobWalker;
use crate::world::waynet::WaynetConverter;

/// The result of one conversion run.
#[derive(Debug)]
pub struct ConvertedWorld {
    pub level: MeshData,
    pub objects: Vec<PlacedObject>,
    /// Objects (by id) that were skipped
    pub failures: Vec<(u32, ConversionError)>,
    pub cache_stats: CacheStats,
}

/// Walks the object tree (and the waynet, if enabled) and converts the level mesh. Every run gets
/// its own mesh cache.
pub fn convert_world(
    world: &World,
    index: &AssetIndex,
    items: &dyn ItemVisualResolver,
    settings: &ConversionSettings,
) -> Result<ConvertedWorld, ConversionError> {
    let now = Instant::now();
    let cache = MeshCache::new();

    info!("Parsing VOBs");
    let walker = VobWalker::new(index, &cache, items, settings.scale);
    let outcome = walker.walk(&world.root_objects).inspect_err(|err| {
        error!("Failed to index VOBs: {}", err);
    })?;
    let mut objects = outcome.objects;

    if settings.waynet {
        info!("Parsing waynet");
        let waypoints = WaynetConverter::convert(&world.way_net, index, &cache, settings.scale).inspect_err(|err| {
            error!("Failed to index Waynet: {}", err);
        })?;
        objects.extend(waypoints);
    }

    if objects.is_empty() {
        error!("Attention! No VOB entries were found during parsing!");
    }

    info!("Parsing world data");
    let level = WorldMeshImporter::create_mesh(world, settings.scale)?;
    if level.is_empty() {
        error!("Attention! World mesh is empty!");
    }

    let cache_stats = cache.stats();
    info!(
        "Converted world: {} objects, {} distinct meshes ({} failed), {} cache hits in {}ms",
        objects.len(),
        cache_stats.entries,
        cache_stats.failures,
        cache_stats.hits,
        now.elapsed().as_millis()
    );

    Ok(ConvertedWorld {
        level,
        objects,
        failures: outcome.failures,
        cache_stats,
    })
}
