use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::api::ApiClient;
use crate::auth::AuthStore;
use crate::config::{AppConfig, SimulatedLatency};
use crate::error::AppServicesError;
use crate::module_service::ModuleCatalogService;
use crate::news_service::NewsService;
use crate::practice_service::PracticeService;
use crate::progress::ProgressStore;
use crate::theme::ThemeService;
use crate::user_service::UserService;

/// Assembles app-facing services and stores over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    config: Arc<AppConfig>,
    auth: Arc<AuthStore>,
    progress: Arc<ProgressStore>,
    modules: Arc<ModuleCatalogService>,
    news: Arc<NewsService>,
    practice: Arc<PracticeService>,
    users: Arc<UserService>,
    theme: Arc<ThemeService>,
}

impl AppServices {
    /// Wire services without signing in or loading anything.
    pub async fn new(config: AppConfig, clock: Clock, storage: &Storage) -> Self {
        let api = ApiClient::new(config.api.clone());
        let auth = Arc::new(AuthStore::new(config.latency, Arc::clone(&storage.users)));
        let progress = Arc::new(ProgressStore::new(
            clock,
            config.latency,
            storage,
            Arc::clone(&auth) as Arc<dyn crate::auth::UserSession>,
        ));
        let modules = Arc::new(ModuleCatalogService::new(
            api.clone(),
            Arc::clone(&storage.modules),
        ));
        let news = Arc::new(NewsService::new(api.clone(), Arc::clone(&storage.news)));
        let practice = Arc::new(PracticeService::new(
            api.clone(),
            Arc::clone(&storage.sessions),
        ));
        let users = Arc::new(UserService::new(api, Arc::clone(&storage.users)));
        let theme = Arc::new(ThemeService::load(Arc::clone(&storage.theme)).await);

        Self {
            config: Arc::new(config),
            auth,
            progress,
            modules,
            news,
            practice,
            users,
            theme,
        }
    }

    /// Wire services, sign in as the stored learner, and load their progress.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the profile or progress cannot be read.
    pub async fn bootstrap(
        config: AppConfig,
        clock: Clock,
        storage: &Storage,
    ) -> Result<Self, AppServicesError> {
        let services = Self::new(config, clock, storage).await;
        match services.auth.restore_session().await? {
            Some(user) => tracing::info!(user = %user.id(), "starting signed in"),
            None => tracing::info!("no stored profile, starting signed out"),
        }
        services.progress.load_progress().await?;
        Ok(services)
    }

    /// Fixture-backed services with no simulated latency, for previews and tests.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the fixtures are invalid.
    pub async fn with_fixtures(clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::with_fixtures()?;
        let config = AppConfig {
            latency: SimulatedLatency::none(),
            ..AppConfig::default()
        };
        Self::bootstrap(config, clock, &storage).await
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn latency(&self) -> SimulatedLatency {
        self.config.latency
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthStore> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressStore> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn modules(&self) -> Arc<ModuleCatalogService> {
        Arc::clone(&self.modules)
    }

    #[must_use]
    pub fn news(&self) -> Arc<NewsService> {
        Arc::clone(&self.news)
    }

    #[must_use]
    pub fn practice(&self) -> Arc<PracticeService> {
        Arc::clone(&self.practice)
    }

    #[must_use]
    pub fn users(&self) -> Arc<UserService> {
        Arc::clone(&self.users)
    }

    #[must_use]
    pub fn theme(&self) -> Arc<ThemeService> {
        Arc::clone(&self.theme)
    }
}
