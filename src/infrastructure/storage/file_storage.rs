//! TOML file token storage.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, warn};

use crate::domain::entities::AuthToken;
use crate::domain::errors::StorageError;
use crate::domain::ports::TokenStoragePort;

/// On-disk layout. An empty `token` means "no token".
#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default)]
    token: String,
}

/// Persists the session token in a small TOML file.
#[derive(Debug, Clone)]
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write(&self, value: &str) -> Result<(), StorageError> {
        let content = toml::to_string(&SessionFile {
            token: value.to_string(),
        })
        .map_err(|e| StorageError::StorageFailed(e.to_string()))?;

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || save_atomically(&path, &content))
            .await
            .map_err(|e| StorageError::StorageFailed(e.to_string()))?
    }
}

fn save_atomically(path: &Path, content: &str) -> Result<(), StorageError> {
    let parent = path
        .parent()
        .ok_or_else(|| StorageError::AccessFailed(format!("invalid path {}", path.display())))?;
    std::fs::create_dir_all(parent)?;

    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.persist(path).map_err(|e| e.error)?;

    Ok(())
}

#[async_trait]
impl TokenStoragePort for FileTokenStorage {
    async fn get_token(&self) -> Result<Option<AuthToken>, StorageError> {
        debug!(path = %self.path.display(), "Reading session file");

        if !fs::try_exists(&self.path).await? {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).await?;
        match toml::from_str::<SessionFile>(&content) {
            Ok(file) => Ok(AuthToken::new(file.token)),
            Err(e) => {
                warn!(error = %e, "Failed to parse session file, treating as logged out");
                Ok(None)
            }
        }
    }

    async fn store_token(&self, token: &AuthToken) -> Result<(), StorageError> {
        debug!(path = %self.path.display(), "Writing session file");
        self.write(token.as_str()).await
    }

    async fn delete_token(&self) -> Result<(), StorageError> {
        if !fs::try_exists(&self.path).await? {
            return Ok(());
        }
        debug!(path = %self.path.display(), "Clearing session file");
        self.write("").await
    }
}
