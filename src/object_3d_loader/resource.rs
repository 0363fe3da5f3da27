use std::{fs, path::Path};

use crate::error::{SceneError, SceneResult};

/// Synchronous access to text resources (scene JSON, OBJ and MTL files).
pub trait TextFetcher {
    fn fetch_text(&self, path: &Path) -> SceneResult<String>;
}

/// Reads resources from the local file system.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsTextFetcher;

impl TextFetcher for FsTextFetcher {
    fn fetch_text(&self, path: &Path) -> SceneResult<String> {
        fs::read_to_string(path).map_err(|source| SceneError::MissingResource {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Resolves `relative` against the directory containing `file`.
pub fn resolve_sibling(file: &Path, relative: &str) -> std::path::PathBuf {
    match file.parent() {
        Some(dir) => dir.join(relative),
        None => Path::new(relative).to_path_buf(),
    }
}

/// File name argument of an OBJ/MTL directive: the remaining fields rejoined with single
/// spaces. `None` when the directive has no argument.
pub fn file_name_argument<'a>(fields: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let name = fields.into_iter().collect::<Vec<_>>().join(" ");
    (!name.is_empty()).then_some(name)
}
