use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use bzen_files::world::types::World;
use log::{debug, info, warn};

use crate::error::ConversionError;
use crate::io::common::loader::{AssetLocator, AssetRepository};
use crate::io::common::path::canonical_case_path;
use crate::io::vdf::loader::VdfLoader;
use crate::util::suffix;

pub const WORLD_ARCHIVES: [&str; 2] = ["worlds.vdf", "worlds_addon.vdf"];

/// Resolves the conversion input to the world file:
/// - `v:NEWWORLD.ZEN` searches the world archives, the last archive containing it wins
/// - `w:NEWWORLD.ZEN` searches `_work/data/worlds` on disk
/// - a bare file name tries the archives, then the disk
/// - anything else is taken as a path
pub fn locate_world(input: &str, root: &Path) -> Result<AssetLocator, ConversionError> {
    if suffix(input) != "zen" {
        return Err(ConversionError::UnsupportedFormat { name: input.to_string() });
    }

    match input.split_once(':') {
        Some((prefix, name)) if prefix.eq_ignore_ascii_case("v") => locate_in_archives(name, root),
        Some((prefix, name)) if prefix.eq_ignore_ascii_case("w") => locate_on_disk(name, root),
        _ if Path::new(input).components().count() == 1 => {
            locate_in_archives(input, root).or_else(|err| {
                debug!("{}, trying the disk", err);
                locate_on_disk(input, root)
            })
        }
        _ => match Path::new(input).is_file() {
            true => Ok(AssetLocator::Disk(PathBuf::from(input))),
            false => Err(ConversionError::WorldNotFound { name: input.to_string() }),
        },
    }
}

fn locate_in_archives(name: &str, root: &Path) -> Result<AssetLocator, ConversionError> {
    let mut found = None;

    for archive_name in WORLD_ARCHIVES {
        let Ok(path) = canonical_case_path(&root.join("data").join(archive_name)) else {
            continue;
        };

        match VdfLoader::mount(&path) {
            Ok(mounted) => {
                if let Some(node) = mounted.find(name) {
                    found = Some(AssetLocator::Archive {
                        archive: mounted.path.clone(),
                        node: node.clone(),
                    });
                }
            }
            Err(err) => warn!("Failed to mount {}: {}", path.display(), err),
        }
    }

    match found {
        Some(locator) => {
            info!("Loading from archive: {}", locator);
            Ok(locator)
        }
        None => Err(ConversionError::WorldNotFound {
            name: format!("{} in data/worlds.vdf or data/worlds_addon.vdf", name),
        }),
    }
}

fn locate_on_disk(name: &str, root: &Path) -> Result<AssetLocator, ConversionError> {
    let worlds = canonical_case_path(&root.join("_work").join("data").join("worlds"))?;
    let mut stack = vec![worlds];

    while let Some(directory) = stack.pop() {
        let entries =
            fs::read_dir(&directory).map_err(|err| ConversionError::io(directory.display().to_string(), &err))?;

        for entry in entries.filter_map(|entry| entry.ok()) {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else if entry.file_name().to_string_lossy().eq_ignore_ascii_case(name) {
                info!("Loading world from disk: {}", path.display());
                return Ok(AssetLocator::Disk(path));
            }
        }
    }

    Err(ConversionError::WorldNotFound {
        name: format!("{} in _work/data/worlds", name),
    })
}

pub fn load_world(locator: &AssetLocator, repository: &dyn AssetRepository) -> Result<World, ConversionError> {
    let now = Instant::now();
    let world = repository.load_world(locator).map_err(|source| ConversionError::Decode {
        name: locator.to_string(),
        source,
    })?;

    info!(
        "Loaded world {} ({} root objects, {} waypoints) in {}ms",
        locator.file_name(),
        world.root_objects.len(),
        world.way_net.points.len(),
        now.elapsed().as_millis()
    );
    Ok(world)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::common::loader::{AssetFormat, LoadError, NativeRecord};
    use bzen_files::world::vob::{VirtualObject, VobType};

    /// Knows a single world, `NEWWORLD.ZEN`.
    struct OneWorld {}

    impl AssetRepository for OneWorld {
        fn load(&self, _locator: &AssetLocator, format: AssetFormat) -> Result<NativeRecord, LoadError> {
            Err(LoadError::Unsupported(format))
        }

        fn load_world(&self, locator: &AssetLocator) -> Result<World, LoadError> {
            match locator.file_name().as_str() {
                "NEWWORLD.ZEN" => Ok(World {
                    root_objects: vec![VirtualObject::new(1, "LEVEL-VOBTREE", VobType::LevelCompo)],
                    ..World::default()
                }),
                _ => Err(LoadError::Malformed {
                    reason: "not a world".to_string(),
                }),
            }
        }
    }

    fn write_world_archive(path: &Path, world_path: &str, content: &str) -> Result<(), anyhow::Error> {
        let mut buf = Vec::new();
        vdfs::ArchiveWriter::new("")
            .add_file(world_path, content.as_bytes().to_vec())
            .write(&mut buf)?;
        fs::write(path, buf)?;
        Ok(())
    }

    #[test]
    fn input_must_be_a_world() {
        let result = locate_world("v:NEWWORLD.ZIP", Path::new("."));
        assert!(matches!(result, Err(ConversionError::UnsupportedFormat { .. })));
    }

    #[test]
    fn addon_archive_wins() -> Result<(), anyhow::Error> {
        let root = tempfile::tempdir()?;
        fs::create_dir(root.path().join("Data"))?;
        write_world_archive(&root.path().join("Data/WORLDS.VDF"), "_WORK/DATA/WORLDS/NEWWORLD.ZEN", "base")?;
        write_world_archive(
            &root.path().join("Data/WORLDS_ADDON.VDF"),
            "_WORK/DATA/WORLDS/ADDON/NEWWORLD.ZEN",
            "addon",
        )?;

        let locator = locate_world("v:newworld.zen", root.path())?;
        assert_eq!(locator.read_bytes()?, b"addon");
        Ok(())
    }

    #[test]
    fn disk_worlds_are_found_recursively() -> Result<(), anyhow::Error> {
        let root = tempfile::tempdir()?;
        let worlds = root.path().join("_WORK/DATA/WORLDS/NEWWORLD");
        fs::create_dir_all(&worlds)?;
        fs::write(worlds.join("NEWWORLD.ZEN"), b"disk")?;

        let locator = locate_world("w:NewWorld.zen", root.path())?;
        assert_eq!(locator, AssetLocator::Disk(worlds.join("NEWWORLD.ZEN")));
        Ok(())
    }

    #[test]
    fn bare_names_fall_back_to_disk() -> Result<(), anyhow::Error> {
        let root = tempfile::tempdir()?;
        let worlds = root.path().join("_work/data/worlds");
        fs::create_dir_all(&worlds)?;
        fs::write(worlds.join("OLDWORLD.ZEN"), b"disk")?;

        let locator = locate_world("OLDWORLD.ZEN", root.path())?;
        assert_eq!(locator.read_bytes()?, b"disk");

        let missing = locate_world("NEWWORLD.ZEN", root.path());
        assert!(matches!(missing, Err(ConversionError::WorldNotFound { .. })));
        Ok(())
    }

    #[test]
    fn paths_are_used_as_is() -> Result<(), anyhow::Error> {
        let root = tempfile::tempdir()?;
        let world = root.path().join("custom.zen");
        fs::write(&world, b"")?;

        let input = world.to_string_lossy().to_string();
        assert_eq!(locate_world(&input, Path::new("."))?, AssetLocator::Disk(world));
        Ok(())
    }

    #[test_log::test]
    fn worlds_are_decoded_by_the_repository() -> Result<(), anyhow::Error> {
        let root = tempfile::tempdir()?;
        let worlds = root.path().join("_work/data/worlds");
        fs::create_dir_all(&worlds)?;
        fs::write(worlds.join("NEWWORLD.ZEN"), b"")?;
        fs::write(worlds.join("BROKEN.ZEN"), b"")?;

        let world = load_world(&locate_world("w:newworld.zen", root.path())?, &OneWorld {})?;
        assert_eq!(world.root_objects.len(), 1);

        let broken = locate_world("w:BROKEN.ZEN", root.path())?;
        assert!(matches!(
            load_world(&broken, &OneWorld {}),
            Err(ConversionError::Decode {
                source: LoadError::Malformed { .. },
                ..
            })
        ));
        Ok(())
    }
}
