//! Module loading: resolve artifact paths into [`ModuleMetadata`].
//!
//! Each compiled test artifact ships a manifest. JSON is the default; a path
//! ending in `.toml` is read as TOML. Loading is fail-fast: the first bad path
//! aborts the whole batch, since a partial report is worse than none.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::metadata::ModuleMetadata;

/// Errors from the loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("empty artifact path in assembly list")]
    EmptyPath,

    #[error("failed to read module manifest {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON module manifest {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid TOML module manifest {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Split the comma-separated assembly argument into paths.
///
/// Entries are trimmed but never dropped; an empty entry fails at load time.
pub fn parse_assembly_list(input: &str) -> Vec<PathBuf> {
    input.split(',').map(|p| PathBuf::from(p.trim())).collect()
}

/// Load one module manifest.
pub fn load_module(path: &Path) -> Result<ModuleMetadata, LoadError> {
    if path.as_os_str().is_empty() {
        return Err(LoadError::EmptyPath);
    }

    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_toml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("toml"));

    let mut module: ModuleMetadata = if is_toml {
        toml::from_str(&text).map_err(|source| LoadError::Toml {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        serde_json::from_str(&text).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })?
    };

    if module.name.is_empty() {
        module.name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
    }

    debug!(module = %module.name, types = module.types.len(), "loaded module manifest");
    Ok(module)
}

/// Load every path in order, stopping at the first failure.
pub fn load_modules<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<ModuleMetadata>, LoadError> {
    paths.iter().map(|p| load_module(p.as_ref())).collect()
}
