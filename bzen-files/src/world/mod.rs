pub mod types;
pub mod vob;
