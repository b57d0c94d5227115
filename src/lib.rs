//! Converts engine worlds (`.zen`) and the visuals they reference into a renderer agnostic scene
//! model: one merged level mesh plus a flat list of placed, instanced objects.
//!
//! The pipeline is split into
//! - [`io::index::AssetIndex`]: which compiled asset lives where (loose files or `.vdf` archives)
//! - [`conversion::loader::visual_loader::VisualLoader`]: decoding visuals into [`conversion::common::types::MeshData`]
//! - [`conversion::asset_graph::mesh_cache::MeshCache`]: decode-once, share-everywhere
//! - [`world::vob_walker::VobWalker`]: flattening the object tree into placed objects
//! - [`conversion::export`]: handing the result over to a scene builder

pub mod conversion;
pub mod error;
pub mod io;
pub mod settings;
pub mod util;
pub mod world;
