use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use juggle_core::model::ThemeMode;
use serde::{Deserialize, Serialize};

use crate::repository::{StorageError, ThemeRepository};

#[derive(Debug, Serialize, Deserialize)]
struct ThemeDocument {
    theme: ThemeMode,
}

/// Theme preference stored as a small JSON document on disk.
///
/// A missing or unreadable document reads as the light theme.
#[derive(Debug, Clone)]
pub struct JsonThemeFile {
    path: PathBuf,
}

impl JsonThemeFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ThemeRepository for JsonThemeFile {
    async fn load_theme(&self) -> Result<ThemeMode, StorageError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(ThemeMode::default()),
            Err(err) => return Err(StorageError::Connection(err.to_string())),
        };
        match serde_json::from_str::<ThemeDocument>(&raw) {
            Ok(doc) => Ok(doc.theme),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "ignoring corrupt theme file");
                Ok(ThemeMode::default())
            }
        }
    }

    async fn save_theme(&self, theme: ThemeMode) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|err| StorageError::Connection(err.to_string()))?;
        }
        let body = serde_json::to_string_pretty(&ThemeDocument { theme })
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        std::fs::write(&self.path, body).map_err(|err| StorageError::Connection(err.to_string()))?;
        tracing::debug!(path = %self.path.display(), ?theme, "theme saved");
        Ok(())
    }
}
