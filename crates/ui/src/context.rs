use std::sync::Arc;

use services::{
    AppServices, AuthStore, ModuleCatalogService, NewsService, PracticeService, ProgressStore,
    SimulatedLatency, ThemeService, UserService,
};

pub trait UiApp: Send + Sync {
    fn app_name(&self) -> String;
    fn latency(&self) -> SimulatedLatency;

    fn auth(&self) -> Arc<AuthStore>;
    fn progress(&self) -> Arc<ProgressStore>;
    fn modules(&self) -> Arc<ModuleCatalogService>;
    fn news(&self) -> Arc<NewsService>;
    fn practice(&self) -> Arc<PracticeService>;
    fn users(&self) -> Arc<UserService>;
    fn theme(&self) -> Arc<ThemeService>;
}

impl UiApp for AppServices {
    fn app_name(&self) -> String {
        self.config().app.name.clone()
    }

    fn latency(&self) -> SimulatedLatency {
        AppServices::latency(self)
    }

    fn auth(&self) -> Arc<AuthStore> {
        AppServices::auth(self)
    }

    fn progress(&self) -> Arc<ProgressStore> {
        AppServices::progress(self)
    }

    fn modules(&self) -> Arc<ModuleCatalogService> {
        AppServices::modules(self)
    }

    fn news(&self) -> Arc<NewsService> {
        AppServices::news(self)
    }

    fn practice(&self) -> Arc<PracticeService> {
        AppServices::practice(self)
    }

    fn users(&self) -> Arc<UserService> {
        AppServices::users(self)
    }

    fn theme(&self) -> Arc<ThemeService> {
        AppServices::theme(self)
    }
}

#[derive(Clone)]
pub struct AppContext {
    app_name: String,
    latency: SimulatedLatency,

    auth: Arc<AuthStore>,
    progress: Arc<ProgressStore>,
    modules: Arc<ModuleCatalogService>,
    news: Arc<NewsService>,
    practice: Arc<PracticeService>,
    users: Arc<UserService>,
    theme: Arc<ThemeService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            app_name: app.app_name(),
            latency: app.latency(),
            auth: app.auth(),
            progress: app.progress(),
            modules: app.modules(),
            news: app.news(),
            practice: app.practice(),
            users: app.users(),
            theme: app.theme(),
        }
    }

    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    #[must_use]
    pub fn latency(&self) -> SimulatedLatency {
        self.latency
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

// Provided by the composition root in `crates/app`.

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
