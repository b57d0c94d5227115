//! Plain data model of already decoded engine assets.
//!
//! The asset repository (the binary decoder of the proprietary formats) produces these records,
//! the conversion pipeline only reads them. Field names follow the engine's own terminology where
//! it is unambiguous (wedges, features, leaf polygons, soft skins).

pub mod common;
pub mod mesh;
pub mod model;
pub mod world;
