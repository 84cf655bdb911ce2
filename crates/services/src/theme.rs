use std::sync::{Arc, Mutex, PoisonError};

use juggle_core::model::ThemeMode;
use storage::repository::ThemeRepository;

use crate::error::ThemeError;

/// Light/dark preference, cached in memory and persisted on change.
pub struct ThemeService {
    repo: Arc<dyn ThemeRepository>,
    current: Mutex<ThemeMode>,
}

impl ThemeService {
    /// Load the saved preference. Read failures fall back to light.
    pub async fn load(repo: Arc<dyn ThemeRepository>) -> Self {
        let current = match repo.load_theme().await {
            Ok(theme) => theme,
            Err(err) => {
                tracing::warn!(error = %err, "could not read theme preference");
                ThemeMode::default()
            }
        };
        Self {
            repo,
            current: Mutex::new(current),
        }
    }

    #[must_use]
    pub fn current(&self) -> ThemeMode {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Flip the theme and persist it.
    ///
    /// # Errors
    ///
    /// Returns `ThemeError` if the preference cannot be saved; the in-memory
    /// value still changes.
    pub async fn toggle(&self) -> Result<ThemeMode, ThemeError> {
        let next = {
            let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
            *current = current.toggled();
            *current
        };
        if let Err(err) = self.repo.save_theme(next).await {
            tracing::warn!(error = %err, ?next, "could not save theme preference");
            return Err(err.into());
        }
        tracing::debug!(?next, "theme toggled");
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::InMemoryRepository;
    use storage::repository::StorageError;

    struct ReadOnlyTheme;

    #[async_trait::async_trait]
    impl ThemeRepository for ReadOnlyTheme {
        async fn load_theme(&self) -> Result<ThemeMode, StorageError> {
            Ok(ThemeMode::Light)
        }

        async fn save_theme(&self, _theme: ThemeMode) -> Result<(), StorageError> {
            Err(StorageError::Connection("read-only".into()))
        }
    }

    #[tokio::test]
    async fn toggle_persists() {
        let repo = Arc::new(InMemoryRepository::new());
        let theme = ThemeService::load(repo.clone()).await;
        assert_eq!(theme.current(), ThemeMode::Light);

        assert_eq!(theme.toggle().await.unwrap(), ThemeMode::Dark);
        assert_eq!(repo.load_theme().await.unwrap(), ThemeMode::Dark);

        let reloaded = ThemeService::load(repo).await;
        assert_eq!(reloaded.current(), ThemeMode::Dark);
    }

    #[tokio::test]
    async fn failed_save_still_flips_in_memory() {
        let theme = ThemeService::load(Arc::new(ReadOnlyTheme)).await;
        let err = theme.toggle().await.unwrap_err();
        assert!(matches!(err, ThemeError::Storage(StorageError::Connection(_))));
        assert_eq!(theme.current(), ThemeMode::Dark);
    }
}
