use std::path::PathBuf;

use thiserror::Error;

use crate::io::common::loader::LoadError;

/// Everything that can go wrong while indexing assets or converting a world.
///
/// Errors are `Clone` because a failed cache entry hands the same error to every object that
/// references it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("Cannot resolve {segment:?} below {base:?}: {matches} case-insensitive matches")]
    PathResolution {
        base: PathBuf,
        segment: String,
        matches: usize,
    },

    #[error("The format of {name} is not supported")]
    UnsupportedFormat { name: String },

    #[error("Failed to decode {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: LoadError,
    },

    #[error("{object} has no resolvable visual")]
    NoVisualReference { object: String },

    #[error("Could not produce a mesh for {object}: {reason}")]
    MeshResolution { object: String, reason: String },

    #[error("{name} is not part of the asset index")]
    MissingAsset { name: String },

    #[error("Hierarchy node {index} references parent {parent}, which is not declared before it")]
    InvalidHierarchy { index: usize, parent: i16 },

    #[error("The world has no root objects")]
    EmptyWorld,

    #[error("World {name} could not be found")]
    WorldNotFound { name: String },

    #[error("{context}: {message}")]
    Io { context: String, message: String },
}

impl ConversionError {
    pub(crate) fn io(context: impl Into<String>, err: &std::io::Error) -> Self {
        ConversionError::Io {
            context: context.into(),
            message: err.to_string(),
        }
    }
}
