#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bzen::io::common::loader::{AssetFormat, AssetLoader, AssetLocator, AssetRepository, LoadError, NativeRecord};
use bzen::io::index::{AssetIndex, AssetSource};
use bzen::world::ItemVisualResolver;
use bzen_files::common::types::{Color, Vec2f, Vec3f};
use bzen_files::mesh::types::{MaterialRecord, MeshTriangle, MultiResolutionMesh, SubMesh, Wedge};
use bzen_files::world::types::World;
use dashmap::DashMap;

/// Hands out prepared records by file name and counts how often each one was decoded.
#[derive(Default)]
pub struct FakeRepository {
    records: HashMap<String, NativeRecord>,
    loads: DashMap<String, usize>,
    total_loads: AtomicUsize,
}

impl FakeRepository {
    pub fn loads_of(&self, name: &str) -> usize {
        self.loads.get(name).map(|count| *count).unwrap_or(0)
    }

    pub fn total_loads(&self) -> usize {
        self.total_loads.load(Ordering::Relaxed)
    }
}

impl AssetRepository for FakeRepository {
    fn load(&self, locator: &AssetLocator, format: AssetFormat) -> Result<NativeRecord, LoadError> {
        let name = locator.file_name().to_ascii_lowercase();
        *self.loads.entry(name.clone()).or_insert(0) += 1;
        self.total_loads.fetch_add(1, Ordering::Relaxed);

        match self.records.get(&name) {
            Some(record) if record.format() == format => Ok(record.clone()),
            Some(record) => Err(LoadError::Malformed {
                reason: format!("{} is a {:?}", name, record.format()),
            }),
            None => Err(LoadError::Io {
                locator: name,
                message: "not found".to_string(),
            }),
        }
    }

    fn load_world(&self, locator: &AssetLocator) -> Result<World, LoadError> {
        Err(LoadError::Malformed {
            reason: format!("{} is not a world", locator),
        })
    }
}

/// Builds an [`AssetIndex`] over a [`FakeRepository`]. Every record is indexed as a loose file.
#[derive(Default)]
pub struct Fixture {
    records: HashMap<String, NativeRecord>,
    /// Indexed names without a record, loading them fails
    broken: Vec<String>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, record: NativeRecord) -> Self {
        self.records.insert(name.to_ascii_lowercase(), record);
        self
    }

    pub fn with_broken(mut self, name: &str) -> Self {
        self.broken.push(name.to_ascii_lowercase());
        self
    }

    pub fn build(self) -> (AssetIndex, Arc<FakeRepository>) {
        let names = self.records.keys().cloned().chain(self.broken).collect::<Vec<_>>();
        let repository = Arc::new(FakeRepository {
            records: self.records,
            ..FakeRepository::default()
        });

        let mut index = AssetIndex::new();
        for name in names {
            let extension = name.rsplit('.').next().unwrap_or_default();
            let format = AssetFormat::from_extension(extension).expect("fixture names carry a known extension");
            let loader = AssetLoader::new(
                AssetLocator::Disk(PathBuf::from(format!("_work/data/meshes/_compiled/{}", name))),
                format,
                repository.clone(),
            );
            index.insert(name, AssetSource::Disk, loader);
        }

        (index, repository)
    }
}

pub struct FakeItems {
    pub visuals: HashMap<String, String>,
}

impl ItemVisualResolver for FakeItems {
    fn resolve_item_visual(&self, object_name: &str) -> Option<String> {
        self.visuals.get(object_name).cloned()
    }
}

pub fn wedge(index: u16, normal: Vec3f, texture: Vec2f) -> Wedge {
    Wedge { normal, texture, index }
}

/// A single triangle in the engine's XY plane, 100 units wide.
pub fn triangle_mrm(material: &str) -> MultiResolutionMesh {
    let normal = Vec3f::new(0.0, 0.0, -1.0);
    MultiResolutionMesh {
        positions: vec![
            Vec3f::new(0.0, 0.0, 0.0),
            Vec3f::new(100.0, 0.0, 0.0),
            Vec3f::new(0.0, 100.0, 0.0),
        ],
        materials: vec![MaterialRecord::new(material, Color::WHITE, format!("{}.TGA", material))],
        sub_meshes: vec![SubMesh {
            triangles: vec![MeshTriangle { wedges: [0, 1, 2] }],
            wedges: vec![
                wedge(0, normal, Vec2f::new(0.0, 0.0)),
                wedge(1, normal, Vec2f::new(1.0, 0.0)),
                wedge(2, normal, Vec2f::new(0.0, 1.0)),
            ],
        }],
    }
}
