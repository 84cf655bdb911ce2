//! Shared error types for the services crate.

use thiserror::Error;

use juggle_core::model::{ModuleError, ModuleId, PracticeSessionError, UserError};
use storage::repository::StorageError;

/// Errors emitted by `ApiClient`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("API base URL is not configured")]
    NotConfigured,
    #[error("API request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted while reading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{key} must be a whole number, got {value:?}")]
    InvalidInteger { key: &'static str, value: String },
    #[error("{key} must be a non-negative number, got {value:?}")]
    InvalidScale { key: &'static str, value: String },
}

/// Errors emitted by `ProgressStore` mutations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("module not found: {0}")]
    ModuleNotFound(ModuleId),
    #[error("module is locked: {0}")]
    ModuleLocked(ModuleId),
    #[error(transparent)]
    Module(ModuleError),
    #[error(transparent)]
    Session(#[from] PracticeSessionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<ModuleError> for ProgressError {
    fn from(err: ModuleError) -> Self {
        match err {
            ModuleError::Locked(id) => ProgressError::ModuleLocked(id),
            other => ProgressError::Module(other),
        }
    }
}

/// Errors emitted by `AuthStore`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("not signed in")]
    NotSignedIn,
    #[error(transparent)]
    Profile(#[from] UserError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted when opening a module walkthrough.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WalkthroughError {
    #[error("Module not found")]
    NotFound(ModuleId),
    #[error("This module is locked. Complete previous modules to unlock it.")]
    Locked(ModuleId),
}

/// Errors emitted by the reflection flow.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReflectionError {
    #[error("rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(u8),
    #[error("no module available for reflection")]
    NoModule,
    #[error("unknown quiz question: {0}")]
    UnknownQuestion(String),
    #[error("reflection already submitted")]
    AlreadySubmitted,
    #[error(transparent)]
    Progress(#[from] ProgressError),
}

/// Errors emitted by `ThemeService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ThemeError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error(transparent)]
    Theme(#[from] ThemeError),
}
