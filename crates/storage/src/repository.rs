use async_trait::async_trait;
use juggle_core::model::{
    Achievement, AchievementId, Module, ModuleId, NewsArticle, NewsId, PracticeSession,
    ThemeMode, User,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::fixtures::Fixtures;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for learning modules.
#[async_trait]
pub trait ModuleRepository: Send + Sync {
    /// All modules in program order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the modules cannot be read.
    async fn list_modules(&self) -> Result<Vec<Module>, StorageError>;

    /// Fetch a module by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_module(&self, id: &ModuleId) -> Result<Module, StorageError>;

    /// Persist or update a module.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the module cannot be stored.
    async fn upsert_module(&self, module: &Module) -> Result<(), StorageError>;
}

#[async_trait]
pub trait AchievementRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the achievements cannot be read.
    async fn list_achievements(&self) -> Result<Vec<Achievement>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the achievement cannot be stored.
    async fn upsert_achievement(&self, achievement: &Achievement) -> Result<(), StorageError>;
}

/// Append-only log of practice sessions.
#[async_trait]
pub trait PracticeSessionRepository: Send + Sync {
    /// Sessions in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the sessions cannot be read.
    async fn list_sessions(&self) -> Result<Vec<PracticeSession>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if a session with the same id exists.
    async fn append_session(&self, session: &PracticeSession) -> Result<(), StorageError>;
}

#[async_trait]
pub trait NewsRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the articles cannot be read.
    async fn list_news(&self) -> Result<Vec<NewsArticle>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_news(&self, id: NewsId) -> Result<NewsArticle, StorageError>;
}

/// Holds the single user profile.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the profile cannot be read.
    async fn current_user(&self) -> Result<Option<User>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the profile cannot be stored.
    async fn save_user(&self, user: &User) -> Result<(), StorageError>;
}

/// Durable color theme preference.
#[async_trait]
pub trait ThemeRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the preference cannot be read.
    async fn load_theme(&self) -> Result<ThemeMode, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the preference cannot be stored.
    async fn save_theme(&self, theme: ThemeMode) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for the application and tests.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    modules: Arc<Mutex<HashMap<ModuleId, Module>>>,
    achievements: Arc<Mutex<Vec<Achievement>>>,
    sessions: Arc<Mutex<Vec<PracticeSession>>>,
    news: Arc<Mutex<Vec<NewsArticle>>>,
    user: Arc<Mutex<Option<User>>>,
    theme: Arc<Mutex<ThemeMode>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-populated with the given fixture set.
    #[must_use]
    pub fn seeded(fixtures: Fixtures) -> Self {
        let modules = fixtures
            .modules
            .into_iter()
            .map(|module| (module.id().clone(), module))
            .collect();
        Self {
            modules: Arc::new(Mutex::new(modules)),
            achievements: Arc::new(Mutex::new(fixtures.achievements)),
            sessions: Arc::new(Mutex::new(fixtures.sessions)),
            news: Arc::new(Mutex::new(fixtures.news)),
            user: Arc::new(Mutex::new(Some(fixtures.user))),
            theme: Arc::new(Mutex::new(ThemeMode::default())),
        }
    }
}

fn poisoned(err: impl std::fmt::Display) -> StorageError {
    StorageError::Connection(err.to_string())
}

#[async_trait]
impl ModuleRepository for InMemoryRepository {
    async fn list_modules(&self) -> Result<Vec<Module>, StorageError> {
        let guard = self.modules.lock().map_err(poisoned)?;
        let mut modules: Vec<Module> = guard.values().cloned().collect();
        modules.sort_by(|a, b| a.order().cmp(&b.order()).then_with(|| a.id().cmp(b.id())));
        Ok(modules)
    }

    async fn get_module(&self, id: &ModuleId) -> Result<Module, StorageError> {
        let guard = self.modules.lock().map_err(poisoned)?;
        guard.get(id).cloned().ok_or(StorageError::NotFound)
    }

    async fn upsert_module(&self, module: &Module) -> Result<(), StorageError> {
        let mut guard = self.modules.lock().map_err(poisoned)?;
        guard.insert(module.id().clone(), module.clone());
        Ok(())
    }
}

#[async_trait]
impl AchievementRepository for InMemoryRepository {
    async fn list_achievements(&self) -> Result<Vec<Achievement>, StorageError> {
        let guard = self.achievements.lock().map_err(poisoned)?;
        Ok(guard.clone())
    }

    async fn upsert_achievement(&self, achievement: &Achievement) -> Result<(), StorageError> {
        let mut guard = self.achievements.lock().map_err(poisoned)?;
        match guard.iter_mut().find(|a| a.id() == achievement.id()) {
            Some(existing) => *existing = achievement.clone(),
            None => guard.push(achievement.clone()),
        }
        Ok(())
    }
}

#[async_trait]
impl PracticeSessionRepository for InMemoryRepository {
    async fn list_sessions(&self) -> Result<Vec<PracticeSession>, StorageError> {
        let guard = self.sessions.lock().map_err(poisoned)?;
        Ok(guard.clone())
    }

    async fn append_session(&self, session: &PracticeSession) -> Result<(), StorageError> {
        let mut guard = self.sessions.lock().map_err(poisoned)?;
        if guard.iter().any(|s| s.id == session.id) {
            return Err(StorageError::Conflict);
        }
        guard.push(session.clone());
        Ok(())
    }
}

#[async_trait]
impl NewsRepository for InMemoryRepository {
    async fn list_news(&self) -> Result<Vec<NewsArticle>, StorageError> {
        let guard = self.news.lock().map_err(poisoned)?;
        Ok(guard.clone())
    }

    async fn get_news(&self, id: NewsId) -> Result<NewsArticle, StorageError> {
        let guard = self.news.lock().map_err(poisoned)?;
        guard
            .iter()
            .find(|article| article.id == id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn current_user(&self) -> Result<Option<User>, StorageError> {
        let guard = self.user.lock().map_err(poisoned)?;
        Ok(guard.clone())
    }

    async fn save_user(&self, user: &User) -> Result<(), StorageError> {
        let mut guard = self.user.lock().map_err(poisoned)?;
        *guard = Some(user.clone());
        Ok(())
    }
}

#[async_trait]
impl ThemeRepository for InMemoryRepository {
    async fn load_theme(&self) -> Result<ThemeMode, StorageError> {
        let guard = self.theme.lock().map_err(poisoned)?;
        Ok(*guard)
    }

    async fn save_theme(&self, theme: ThemeMode) -> Result<(), StorageError> {
        let mut guard = self.theme.lock().map_err(poisoned)?;
        *guard = theme;
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub modules: Arc<dyn ModuleRepository>,
    pub achievements: Arc<dyn AchievementRepository>,
    pub sessions: Arc<dyn PracticeSessionRepository>,
    pub news: Arc<dyn NewsRepository>,
    pub users: Arc<dyn UserRepository>,
    pub theme: Arc<dyn ThemeRepository>,
}

impl Storage {
    /// Empty in-memory storage.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_repository(InMemoryRepository::new())
    }

    /// In-memory storage seeded from the embedded fixtures.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the fixtures are invalid.
    pub fn with_fixtures() -> Result<Self, StorageError> {
        let fixtures = Fixtures::load()?;
        Ok(Self::from_repository(InMemoryRepository::seeded(fixtures)))
    }

    #[must_use]
    pub fn from_repository(repo: InMemoryRepository) -> Self {
        Self {
            modules: Arc::new(repo.clone()),
            achievements: Arc::new(repo.clone()),
            sessions: Arc::new(repo.clone()),
            news: Arc::new(repo.clone()),
            users: Arc::new(repo.clone()),
            theme: Arc::new(repo),
        }
    }

    /// Swap the theme backend, e.g. for the JSON file store.
    #[must_use]
    pub fn with_theme_repository(mut self, theme: Arc<dyn ThemeRepository>) -> Self {
        self.theme = theme;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use juggle_core::model::{ModuleStatus, SessionId, SessionRating};
    use juggle_core::time::fixed_now;

    fn seeded() -> InMemoryRepository {
        InMemoryRepository::seeded(Fixtures::load().unwrap())
    }

    #[tokio::test]
    async fn lists_modules_in_program_order() {
        let repo = seeded();
        let ids: Vec<String> = repo
            .list_modules()
            .await
            .unwrap()
            .iter()
            .map(|m| m.id().to_string())
            .collect();
        assert_eq!(
            ids,
            ["module-1", "module-2", "module-3", "module-4", "module-5", "module-6"]
        );
    }

    #[tokio::test]
    async fn upserted_module_is_visible() {
        let repo = seeded();
        let mut module = repo.get_module(&ModuleId::new("module-2")).await.unwrap();
        module.set_progress(60).unwrap();
        repo.upsert_module(&module).await.unwrap();

        let fetched = repo.get_module(&ModuleId::new("module-2")).await.unwrap();
        assert_eq!(fetched.progress(), 60);
        assert_eq!(fetched.status(), ModuleStatus::InProgress);
    }

    #[tokio::test]
    async fn missing_module_is_not_found() {
        let repo = seeded();
        let err = repo.get_module(&ModuleId::new("module-99")).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn duplicate_session_id_conflicts() {
        let repo = InMemoryRepository::new();
        let session = PracticeSession {
            id: SessionId::new("session-1"),
            module_id: ModuleId::new("module-1"),
            date: fixed_now(),
            duration_minutes: 15,
            notes: String::new(),
            rating: SessionRating::new(4).unwrap(),
            prop: None,
            metrics: Default::default(),
        };
        repo.append_session(&session).await.unwrap();
        let err = repo.append_session(&session).await.unwrap_err();
        assert!(matches!(err, StorageError::Conflict));
        assert_eq!(repo.list_sessions().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn achievement_upsert_replaces_in_place() {
        let repo = seeded();
        let before = repo.list_achievements().await.unwrap();
        let mut target = before
            .iter()
            .find(|a| a.id() == &AchievementId::new("achievement-4"))
            .cloned()
            .unwrap();
        assert!(target.unlock(fixed_now()));
        repo.upsert_achievement(&target).await.unwrap();

        let after = repo.list_achievements().await.unwrap();
        assert_eq!(after.len(), before.len());
        let position = after.iter().position(|a| a.id() == target.id()).unwrap();
        assert!(after[position].is_unlocked());
    }

    #[tokio::test]
    async fn fixture_storage_has_user_and_news() {
        let storage = Storage::with_fixtures().unwrap();
        let user = storage.users.current_user().await.unwrap().unwrap();
        assert_eq!(user.name(), "Test User");
        let article = storage.news.get_news(NewsId::new(1)).await.unwrap();
        assert_eq!(article.id, NewsId::new(1));
        assert_eq!(storage.theme.load_theme().await.unwrap(), ThemeMode::Light);
    }

    #[tokio::test]
    async fn empty_storage_has_no_user() {
        let storage = Storage::in_memory();
        assert!(storage.users.current_user().await.unwrap().is_none());
        assert!(storage.modules.list_modules().await.unwrap().is_empty());
    }
}
