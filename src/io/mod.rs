pub mod common;
pub mod index;
pub mod vdf;
