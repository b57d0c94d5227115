use bzen_files::common::types::Color;
use glam::Vec4;

/// The lowercase extension of `name`, without the dot. Empty if there is none.
pub fn suffix(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() => extension.to_ascii_lowercase(),
        _ => String::new(),
    }
}

/// Replaces the extension of `name` (or appends one if it has none).
pub fn with_suffix(name: &str, extension: &str) -> String {
    format!("{}.{}", trim_suffix(name), extension)
}

pub fn trim_suffix(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    }
}

pub fn color_as_rgba(color: Color) -> Vec4 {
    Vec4::new(
        color.r as f32 / 255.0,
        color.g as f32 / 255.0,
        color.b as f32 / 255.0,
        color.a as f32 / 255.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_handling() {
        assert_eq!(suffix("CHEST.3DS"), "3ds");
        assert_eq!(suffix("NOEXTENSION"), "");
        assert_eq!(suffix(".hidden"), "");
        assert_eq!(with_suffix("chest.3ds", "mrm"), "chest.mrm");
        assert_eq!(with_suffix("chest", "mrm"), "chest.mrm");
        assert_eq!(trim_suffix("barrel.tga"), "barrel");
        assert_eq!(trim_suffix("some.name.mds"), "some.name");
    }

    #[test]
    fn colors_are_normalized() {
        let rgba = color_as_rgba(Color::new(255, 0, 51, 255));
        assert_eq!(rgba, Vec4::new(1.0, 0.0, 0.2, 1.0));
    }
}
