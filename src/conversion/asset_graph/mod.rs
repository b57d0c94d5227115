pub mod mesh_cache;
