/// The engine is left handed with Y up, the target is right handed with Z up (blender), and a
/// handful of conversions between the two are needed everywhere.
pub mod coordinate_systems;
/// The results of walking a world: objects placed into the scene, referencing shared meshes.
pub mod highlevel_types;
pub mod mesh_merger;
/// The canonical mesh model every asset format is converted into.
pub mod types;
