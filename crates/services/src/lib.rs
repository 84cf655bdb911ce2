#![forbid(unsafe_code)]

pub mod api;
pub mod app_services;
pub mod auth;
pub mod config;
pub mod error;
pub mod module_service;
pub mod news_service;
pub mod practice_service;
pub mod progress;
pub mod reflection;
pub mod theme;
pub mod user_service;
pub mod walkthrough;

pub use juggle_core::Clock;

pub use api::ApiClient;
pub use app_services::AppServices;
pub use auth::{AuthSnapshot, AuthStore, UserSession};
pub use config::{ApiConfig, AppConfig, AppInfo, AwsConfig, Endpoint, SimulatedLatency};
pub use error::{
    ApiError, AppServicesError, AuthError, ConfigError, ProgressError, ReflectionError,
    ThemeError, WalkthroughError,
};
pub use module_service::{ModuleCatalogService, ModuleFilter};
pub use news_service::{NewsFilter, NewsService};
pub use practice_service::PracticeService;
pub use progress::{
    AchievementStats, DashboardSummary, LoadOutcome, LoadPhase, PracticeStats, ProgressSnapshot,
    ProgressStore, ProgressUpdate,
};
pub use reflection::{ReflectionFlow, ReflectionOutcome, ReflectionStage};
pub use theme::ThemeService;
pub use user_service::UserService;
pub use walkthrough::{StepAdvance, Walkthrough, WalkthroughStep};
