use bzen_files::mesh::types::MaterialRecord;

use crate::conversion::common::types::MaterialData;
use crate::util::color_as_rgba;

pub struct MaterialImporter {}

impl MaterialImporter {
    pub fn create_material(record: &MaterialRecord) -> MaterialData {
        let texture = match record.texture.is_empty() {
            true => None,
            false => Some(record.texture.to_ascii_lowercase()),
        };

        MaterialData::new(record.name.clone(), color_as_rgba(record.color), texture)
    }
}
