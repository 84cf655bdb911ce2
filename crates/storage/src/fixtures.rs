//! Static sample data the application starts from.
//!
//! The documents are embedded at compile time and use the same JSON shape the
//! dashboard API serves, so they double as fallback payloads for the API client.

use std::collections::HashSet;

use juggle_core::model::{Achievement, Module, NewsArticle, PracticeSession, User};
use serde::de::DeserializeOwned;

use crate::records::{
    AchievementRecord, ModuleRecord, NewsRecord, PracticeSessionRecord, UserRecord,
    modules_from_records,
};
use crate::repository::StorageError;

pub const MODULES_JSON: &str = include_str!("../fixtures/modules.json");
pub const ACHIEVEMENTS_JSON: &str = include_str!("../fixtures/achievements.json");
pub const PRACTICE_SESSIONS_JSON: &str = include_str!("../fixtures/practice_sessions.json");
pub const NEWS_JSON: &str = include_str!("../fixtures/news.json");
pub const USER_JSON: &str = include_str!("../fixtures/user.json");

/// Validated fixture data set.
#[derive(Debug, Clone)]
pub struct Fixtures {
    pub modules: Vec<Module>,
    pub achievements: Vec<Achievement>,
    pub sessions: Vec<PracticeSession>,
    pub news: Vec<NewsArticle>,
    pub user: User,
}

impl Fixtures {
    /// Parse and validate the embedded documents.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if a document fails to parse, a
    /// record violates a domain invariant, an id is duplicated, or a record
    /// references a module that does not exist.
    pub fn load() -> Result<Self, StorageError> {
        let modules = modules_from_records(parse("modules", MODULES_JSON)?)?;
        let achievements = parse::<Vec<AchievementRecord>>("achievements", ACHIEVEMENTS_JSON)?
            .into_iter()
            .map(AchievementRecord::into_achievement)
            .collect::<Result<Vec<_>, _>>()?;
        let sessions = parse::<Vec<PracticeSessionRecord>>("sessions", PRACTICE_SESSIONS_JSON)?
            .into_iter()
            .map(PracticeSessionRecord::into_session)
            .collect::<Vec<_>>();
        let news = parse::<Vec<NewsRecord>>("news", NEWS_JSON)?
            .into_iter()
            .map(NewsRecord::into_article)
            .collect::<Vec<_>>();
        let user = parse::<UserRecord>("user", USER_JSON)?.into_user()?;

        let fixtures = Self {
            modules,
            achievements,
            sessions,
            news,
            user,
        };
        fixtures.check_references()?;
        tracing::debug!(
            modules = fixtures.modules.len(),
            achievements = fixtures.achievements.len(),
            sessions = fixtures.sessions.len(),
            news = fixtures.news.len(),
            "fixtures loaded"
        );
        Ok(fixtures)
    }

    fn check_references(&self) -> Result<(), StorageError> {
        let mut module_ids = HashSet::new();
        for module in &self.modules {
            if !module_ids.insert(module.id()) {
                return Err(duplicate("module", module.id()));
            }
        }

        let mut achievement_ids = HashSet::new();
        for achievement in &self.achievements {
            if !achievement_ids.insert(achievement.id()) {
                return Err(duplicate("achievement", achievement.id()));
            }
            if let Some(module_id) = achievement.module_id() {
                if !module_ids.contains(module_id) {
                    return Err(dangling("achievement", achievement.id(), module_id));
                }
            }
        }

        let mut session_ids = HashSet::new();
        for session in &self.sessions {
            if !session_ids.insert(&session.id) {
                return Err(duplicate("session", &session.id));
            }
            if !module_ids.contains(&session.module_id) {
                return Err(dangling("session", &session.id, &session.module_id));
            }
        }

        let mut news_ids = HashSet::new();
        for article in &self.news {
            if !news_ids.insert(article.id) {
                return Err(duplicate("news article", article.id));
            }
        }
        Ok(())
    }
}

/// Raw wire records for the API client's fallback payloads.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if the embedded document is malformed.
pub fn module_records() -> Result<Vec<ModuleRecord>, StorageError> {
    parse("modules", MODULES_JSON)
}

/// # Errors
///
/// Returns `StorageError::Serialization` if the embedded document is malformed.
pub fn news_records() -> Result<Vec<NewsRecord>, StorageError> {
    parse("news", NEWS_JSON)
}

/// # Errors
///
/// Returns `StorageError::Serialization` if the embedded document is malformed.
pub fn session_records() -> Result<Vec<PracticeSessionRecord>, StorageError> {
    parse("sessions", PRACTICE_SESSIONS_JSON)
}

/// # Errors
///
/// Returns `StorageError::Serialization` if the embedded document is malformed.
pub fn user_record() -> Result<UserRecord, StorageError> {
    parse("user", USER_JSON)
}

fn parse<T: DeserializeOwned>(name: &str, json: &str) -> Result<T, StorageError> {
    serde_json::from_str(json)
        .map_err(|err| StorageError::Serialization(format!("{name} fixture: {err}")))
}

fn duplicate(kind: &str, id: impl std::fmt::Display) -> StorageError {
    StorageError::Serialization(format!("duplicate {kind} id {id}"))
}

fn dangling(kind: &str, id: impl std::fmt::Display, module: impl std::fmt::Display) -> StorageError {
    StorageError::Serialization(format!("{kind} {id} references unknown module {module}"))
}
