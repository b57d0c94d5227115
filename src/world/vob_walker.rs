use std::time::Instant;

use bzen_files::world::vob::{VirtualObject, VisualDecal, VisualKind, VobType};
use log::{debug, info, warn};

use crate::conversion::asset_graph::mesh_cache::MeshCache;
use crate::conversion::common::coordinate_systems::{engine_rotation_to_blender, engine_to_blender};
use crate::conversion::common::highlevel_types::{PlacedObject, SharedMesh};
use crate::conversion::importer::decal_importer::DecalImporter;
use crate::conversion::loader::visual_loader::VisualLoader;
use crate::error::ConversionError;
use crate::io::common::loader::AssetFormat;
use crate::io::index::AssetIndex;
use crate::io::index::naming::compiled_key;
use crate::util::trim_suffix;
use crate::world::ItemVisualResolver;
use crate::world::markers::marker_visual;

/// How an object of the tree is turned into a placed object.
#[derive(Debug, Clone, PartialEq)]
pub enum VobClass<'a> {
    /// Level compos and particle effects, nothing to place
    Container,
    Marker(&'static str),
    Decal(&'a str, &'a VisualDecal),
    Item,
    Generic,
}

impl<'a> VobClass<'a> {
    pub fn of(vob: &'a VirtualObject) -> VobClass<'a> {
        let visual_kind = vob.visual.as_ref().map(|visual| &visual.kind);

        if vob.vob_type == VobType::LevelCompo || matches!(visual_kind, Some(VisualKind::ParticleEffect)) {
            return VobClass::Container;
        }

        if let Some(marker) = marker_visual(vob.vob_type) {
            return VobClass::Marker(marker);
        }

        if let Some(visual) = &vob.visual {
            if let VisualKind::Decal(decal) = &visual.kind {
                return VobClass::Decal(&visual.name, decal);
            }
        }

        match vob.vob_type {
            VobType::Item => VobClass::Item,
            _ => VobClass::Generic,
        }
    }
}

#[derive(Debug, Default)]
pub struct WalkOutcome {
    pub objects: Vec<PlacedObject>,
    /// Objects that could not be placed, with the reason. Traversal continued past them.
    pub failures: Vec<(u32, ConversionError)>,
}

/// Flattens the object tree of a world into placed objects, depth first, without recursion.
pub struct VobWalker<'a> {
    index: &'a AssetIndex,
    cache: &'a MeshCache,
    items: &'a dyn ItemVisualResolver,
    scale: f32,
}

impl<'a> VobWalker<'a> {
    pub fn new(index: &'a AssetIndex, cache: &'a MeshCache, items: &'a dyn ItemVisualResolver, scale: f32) -> Self {
        Self {
            index,
            cache,
            items,
            scale,
        }
    }

    /// Fails only for a world without objects. Per-object failures are logged, collected into the
    /// outcome, and the object's children are visited regardless.
    pub fn walk(&self, root_objects: &[VirtualObject]) -> Result<WalkOutcome, ConversionError> {
        if root_objects.is_empty() {
            return Err(ConversionError::EmptyWorld);
        }

        let now = Instant::now();
        let mut outcome = WalkOutcome::default();
        let mut stack = root_objects.iter().collect::<Vec<_>>();
        let mut visited = 0usize;

        while let Some(vob) = stack.pop() {
            visited += 1;
            match self.place(vob) {
                Ok(Some(object)) => outcome.objects.push(object),
                Ok(None) => {}
                Err(err) => {
                    warn!("Failed to place VOB {} ({}): {}", vob.name, vob.id, err);
                    outcome.failures.push((vob.id, err));
                }
            }

            stack.extend(vob.children.iter());
        }

        info!("Indexed {} VOBs", outcome.objects.len());
        debug!(
            "Visited {} VOBs, {} failed, in {}ms",
            visited,
            outcome.failures.len(),
            now.elapsed().as_millis()
        );
        Ok(outcome)
    }

    /// Places a single object, ignoring its children. `None` for containers.
    pub fn place(&self, vob: &VirtualObject) -> Result<Option<PlacedObject>, ConversionError> {
        let (name, mesh) = match VobClass::of(vob) {
            VobClass::Container => return Ok(None),
            VobClass::Marker(visual) => {
                let name = match vob.name.is_empty() {
                    true => format!("invisible:{}_{}", vob.vob_type.class_name().to_ascii_lowercase(), vob.id),
                    false => format!("invisible:{}_{}", vob.name.to_ascii_lowercase(), vob.id),
                };
                let mesh = self.cache.resolve(visual, || {
                    VisualLoader::decode_compiled(visual, AssetFormat::Mrm, self.index, self.scale)
                })?;
                (name, mesh)
            }
            VobClass::Decal(visual_name, decal) => {
                let key = format!(
                    "decal:{}@{}x{}",
                    visual_name.to_ascii_lowercase(),
                    decal.dimension.x,
                    decal.dimension.y
                );
                let mesh = self
                    .cache
                    .resolve(&key, || Ok(DecalImporter::create_mesh(visual_name, decal, self.scale)))?;
                (Self::object_name(visual_name, vob.id), mesh)
            }
            VobClass::Item => {
                let visual_name = self
                    .items
                    .resolve_item_visual(&vob.name)
                    .filter(|name| !name.is_empty())
                    .ok_or_else(|| ConversionError::NoVisualReference {
                        object: vob.name.clone(),
                    })?;
                let mesh = self.resolve_visual(&visual_name)?;
                (Self::object_name(&visual_name, vob.id), mesh)
            }
            VobClass::Generic => {
                let visual_name = vob
                    .visual
                    .as_ref()
                    .map(|visual| visual.name.as_str())
                    .filter(|name| !name.is_empty())
                    .ok_or_else(|| ConversionError::NoVisualReference {
                        object: format!("{} ({})", vob.name, vob.id),
                    })?;
                let mesh = self.resolve_visual(visual_name)?;
                (Self::object_name(visual_name, vob.id), mesh)
            }
        };

        if mesh.is_empty() {
            return Err(ConversionError::MeshResolution {
                object: name,
                reason: "the mesh is empty".to_string(),
            });
        }

        Ok(Some(PlacedObject {
            name,
            mesh,
            position: engine_to_blender(vob.position, self.scale),
            rotation: engine_rotation_to_blender(&vob.rotation),
        }))
    }

    fn resolve_visual(&self, visual_name: &str) -> Result<SharedMesh, ConversionError> {
        let (key, format) = compiled_key(visual_name).ok_or_else(|| ConversionError::UnsupportedFormat {
            name: visual_name.to_string(),
        })?;
        self.cache
            .resolve(&key, || VisualLoader::decode_compiled(&key, format, self.index, self.scale))
    }

    fn object_name(visual_name: &str, id: u32) -> String {
        format!("{}_{}", trim_suffix(visual_name).to_ascii_lowercase(), id)
    }
}
