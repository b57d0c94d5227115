use crate::io::common::loader::AssetFormat;
use crate::util::{suffix, with_suffix};

/// The key a compiled asset file is registered under, or `None` if it is not a known format.
///
/// Keys are lowercase file names. Textures are the exception: the engine references them by their
/// source name (`STONE.TGA`) while the compiled file is `STONE-C.TEX`, so both spellings are
/// folded onto `stone.tga`.
pub fn index_key(file_name: &str) -> Option<(String, AssetFormat)> {
    let format = AssetFormat::from_extension(&suffix(file_name))?;
    let name = file_name.to_ascii_lowercase();

    let key = match format {
        AssetFormat::Tex => with_suffix(&name.replace("-c.", "."), "tga"),
        _ => name,
    };

    Some((key, format))
}

/// The key under which the compiled counterpart of a source visual name is indexed, e.g.
/// `CHEST.3DS` -> `chest.mrm`.
pub fn compiled_key(visual_name: &str) -> Option<(String, AssetFormat)> {
    let format = AssetFormat::compiled_from_source(&suffix(visual_name))?;
    let key = match format {
        AssetFormat::Tex => visual_name.to_ascii_lowercase(),
        _ => with_suffix(&visual_name.to_ascii_lowercase(), format.extension()),
    };
    Some((key, format))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiled_files_are_keyed_by_lowercase_name() {
        assert_eq!(index_key("CHEST.MRM"), Some(("chest.mrm".to_string(), AssetFormat::Mrm)));
        assert_eq!(index_key("Hum_Body.MDH"), Some(("hum_body.mdh".to_string(), AssetFormat::Mdh)));
        assert_eq!(index_key("README.TXT"), None);
        assert_eq!(index_key("NO_EXTENSION"), None);
    }

    #[test]
    fn textures_fold_compression_marker() {
        assert_eq!(index_key("STONE-C.TEX"), Some(("stone.tga".to_string(), AssetFormat::Tex)));
        assert_eq!(index_key("stone.tex"), Some(("stone.tga".to_string(), AssetFormat::Tex)));
    }

    #[test]
    fn source_names_map_to_compiled_keys() {
        assert_eq!(compiled_key("CHEST.3DS"), Some(("chest.mrm".to_string(), AssetFormat::Mrm)));
        assert_eq!(compiled_key("Hum.ASC"), Some(("hum.mdl".to_string(), AssetFormat::Mdl)));
        assert_eq!(compiled_key("CHESTBIG.MDS"), Some(("chestbig.mdm".to_string(), AssetFormat::Mdm)));
        assert_eq!(compiled_key("FACE.MMS"), Some(("face.mmb".to_string(), AssetFormat::Mmb)));
        assert_eq!(compiled_key("STONE.TGA"), Some(("stone.tga".to_string(), AssetFormat::Tex)));
        assert_eq!(compiled_key("FIRE.PFX"), None);
    }
}
