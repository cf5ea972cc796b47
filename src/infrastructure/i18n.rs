//! Message bundle loading.
//!
//! Built-in bundles are compiled in; a locales directory may add to or
//! override them. Each `*.json` file is one entry named after its stem, so
//! `cli.uk_UA.json` becomes the `cli` namespace of `uk_UA`.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::application::services::MessageCatalog;

const BUILTIN_BUNDLES: &[(&str, &str)] = &[
    ("cli.en", include_str!("../../locales/cli.en.json")),
    ("cli.uk_UA", include_str!("../../locales/cli.uk_UA.json")),
];

/// Message bundle loading failure.
#[derive(Debug, Error)]
pub enum I18nError {
    /// A directory or bundle could not be read.
    #[error("failed to read locales from {path}: {source}")]
    Io {
        /// Path involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// A bundle is not valid JSON.
    #[error("invalid message bundle {path}: {source}")]
    Parse {
        /// Bundle involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
}

/// Returns the compiled-in bundle entries.
///
/// # Errors
/// Returns error if a built-in bundle is not valid JSON.
pub fn builtin_entries() -> Result<Vec<(String, Value)>, I18nError> {
    BUILTIN_BUNDLES
        .iter()
        .map(|(entry, content)| {
            serde_json::from_str(content)
                .map(|bundle| ((*entry).to_string(), bundle))
                .map_err(|source| I18nError::Parse {
                    path: PathBuf::from(format!("{entry}.json")),
                    source,
                })
        })
        .collect()
}

/// Reads every `*.json` bundle in `dir`, ordered by file name.
///
/// # Errors
/// Returns error if the directory or a bundle cannot be read or parsed.
pub fn load_dir(dir: &Path) -> Result<Vec<(String, Value)>, I18nError> {
    let io_error = |source| I18nError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(io_error)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let mut entries = Vec::with_capacity(paths.len());
    for path in paths {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            warn!(path = %path.display(), "Skipping bundle with non UTF-8 name");
            continue;
        };
        let stem = stem.to_string();

        let content = fs::read_to_string(&path).map_err(|source| I18nError::Io {
            path: path.clone(),
            source,
        })?;
        let bundle = serde_json::from_str(&content)
            .map_err(|source| I18nError::Parse { path: path.clone(), source })?;

        debug!(entry = %stem, "Loaded message bundle");
        entries.push((stem, bundle));
    }

    Ok(entries)
}

/// Builds the catalog from built-in bundles plus an optional directory and
/// selects `locale` when it has messages.
///
/// # Errors
/// Returns error if a bundle cannot be read or parsed.
pub fn load_catalog(locale: &str, dir: Option<&Path>) -> Result<MessageCatalog, I18nError> {
    let mut entries = builtin_entries()?;
    if let Some(dir) = dir {
        entries.extend(load_dir(dir)?);
    }

    let mut catalog = MessageCatalog::from_entries(entries);
    if !catalog.set_locale(locale) {
        warn!(locale, active = catalog.locale(), "Requested locale has no messages");
    }
    Ok(catalog)
}
