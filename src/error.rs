//! Error types for scene loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a scene (or OBJ/MTL) load.
#[derive(Error, Debug)]
pub enum SceneError {
    /// An OBJ or MTL line violates its expected field count or face arity.
    #[error("{source_name}:{line}: {message}")]
    MalformedInput {
        source_name: String,
        line: usize,
        message: String,
    },
    /// A referenced file could not be fetched.
    #[error("missing resource {path}: {source}")]
    MissingResource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unknown node type `{0}`")]
    UnknownNodeType(String),
    #[error("unknown camera type `{0}`")]
    UnknownCameraType(String),
    /// The scene description is well-formed JSON but describes something unusable.
    #[error("malformed scene: {0}")]
    MalformedScene(String),
    #[error("scene JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl SceneError {
    pub(crate) fn malformed(source_name: &str, line: usize, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            source_name: source_name.to_owned(),
            line,
            message: message.into(),
        }
    }
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Texture acquisition failures. These never abort a scene load.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// The loader stopped (panicked or dropped its channel) before producing an image.
    #[error("image loader for {path} stopped before reporting a result")]
    Abandoned { path: PathBuf },
}
