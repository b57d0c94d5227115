use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::ConversionError;

/// Resolves `path` segment by segment against the file system, ignoring case. Game installations
/// mix `_WORK/DATA` and `_work/Data` freely, which matters on case sensitive file systems.
///
/// A segment with no match, or with several matches differing only in case, is an error.
pub fn canonical_case_path(path: &Path) -> Result<PathBuf, ConversionError> {
    let mut current = match path.is_absolute() {
        true => PathBuf::new(),
        false => std::env::current_dir().map_err(|err| ConversionError::io("current directory", &err))?,
    };

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => current.push(component),
            Component::CurDir => {}
            Component::ParentDir => {
                current.pop();
            }
            Component::Normal(segment) => {
                let segment = segment.to_string_lossy();
                current = find_case_insensitive(&current, &segment)?;
            }
        }
    }

    Ok(current)
}

fn find_case_insensitive(directory: &Path, segment: &str) -> Result<PathBuf, ConversionError> {
    let entries = fs::read_dir(directory).map_err(|err| ConversionError::io(directory.display().to_string(), &err))?;

    let mut matches = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().eq_ignore_ascii_case(segment))
        .map(|entry| entry.path())
        .collect::<Vec<_>>();

    match matches.len() {
        1 => Ok(matches.remove(0)),
        count => Err(ConversionError::PathResolution {
            base: directory.to_path_buf(),
            segment: segment.to_string(),
            matches: count,
        }),
    }
}
