//! Wire/fixture shapes for domain types.
//!
//! These mirror the JSON documents served by the dashboard API (and embedded
//! as fixtures) so the domain layer never sees serialization concerns.

use chrono::{DateTime, NaiveDate, Utc};
use juggle_core::model::{
    Achievement, AchievementCategory, AchievementId, JugglingProp, LearningStyle, Module,
    ModuleId, ModuleInfo, ModuleStatus, NewsArticle, NewsCategory, NewsId, PracticeMetrics,
    PracticeSession, SessionId, SessionRating, TimeEstimate, User, UserId,
};
use serde::{Deserialize, Serialize};

use crate::repository::StorageError;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeEstimateRecord {
    #[serde(default)]
    pub tech: String,
    #[serde(default)]
    pub juggling: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRecord {
    pub id: ModuleId,
    /// Missing on older payloads; filled from array position.
    #[serde(default)]
    pub order: Option<u32>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub juggling_prop: JugglingProp,
    #[serde(default)]
    pub tech_theme: String,
    #[serde(default)]
    pub aws_services: Vec<String>,
    #[serde(default)]
    pub otto_tie_in: Option<String>,
    #[serde(default)]
    pub reflection: Option<String>,
    #[serde(default)]
    pub time_estimate: TimeEstimateRecord,
    pub status: ModuleStatus,
    #[serde(default)]
    pub progress: u8,
    /// Redundant with `status`; accepted for compatibility and cross-checked.
    #[serde(default)]
    pub unlocked: Option<bool>,
}

impl ModuleRecord {
    #[must_use]
    pub fn from_module(module: &Module) -> Self {
        let info = module.info();
        Self {
            id: info.id.clone(),
            order: Some(info.order),
            name: info.name.clone(),
            description: info.description.clone(),
            juggling_prop: info.prop,
            tech_theme: info.tech_theme.clone(),
            aws_services: info.technologies.clone(),
            otto_tie_in: info.tie_in.clone(),
            reflection: info.reflection_prompt.clone(),
            time_estimate: TimeEstimateRecord {
                tech: info.time_estimate.tech.clone(),
                juggling: info.time_estimate.juggling.clone(),
            },
            status: module.status(),
            progress: module.progress(),
            unlocked: Some(module.is_unlocked()),
        }
    }

    /// Convert the record back into a domain `Module`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the `unlocked` flag disagrees
    /// with `status` or the module invariants are violated.
    pub fn into_module(self, fallback_order: u32) -> Result<Module, StorageError> {
        let locked = self.status == ModuleStatus::Locked;
        if let Some(unlocked) = self.unlocked {
            if unlocked == locked {
                return Err(StorageError::Serialization(format!(
                    "{}: unlocked={unlocked} disagrees with status {}",
                    self.id, self.status
                )));
            }
        }

        let id = self.id.clone();
        let info = ModuleInfo {
            id: self.id,
            order: self.order.unwrap_or(fallback_order),
            name: self.name,
            description: self.description,
            prop: self.juggling_prop,
            tech_theme: self.tech_theme,
            technologies: self.aws_services,
            tie_in: self.otto_tie_in,
            reflection_prompt: self.reflection,
            time_estimate: TimeEstimate {
                tech: self.time_estimate.tech,
                juggling: self.time_estimate.juggling,
            },
        };
        Module::new(info, self.status, self.progress)
            .map_err(|err| StorageError::Serialization(format!("{id}: {err}")))
    }
}

/// Convert a module payload, assigning sequence positions where absent, and
/// return the modules sorted by that sequence.
///
/// # Errors
///
/// Returns the first conversion failure.
pub fn modules_from_records(records: Vec<ModuleRecord>) -> Result<Vec<Module>, StorageError> {
    let mut modules = records
        .into_iter()
        .zip(1_u32..)
        .map(|(record, position)| record.into_module(position))
        .collect::<Result<Vec<_>, _>>()?;
    modules.sort_by_key(Module::order);
    Ok(modules)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementRecord {
    pub id: AchievementId,
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
    pub category: AchievementCategory,
    #[serde(default)]
    pub module_id: Option<ModuleId>,
    #[serde(default)]
    pub unlocked: bool,
    #[serde(default)]
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl AchievementRecord {
    #[must_use]
    pub fn from_achievement(achievement: &Achievement) -> Self {
        Self {
            id: achievement.id().clone(),
            title: achievement.title().to_string(),
            description: achievement.description().to_string(),
            icon: Some(achievement.icon().to_string()),
            category: achievement.category(),
            module_id: achievement.module_id().cloned(),
            unlocked: achievement.is_unlocked(),
            unlocked_at: achievement.unlocked_at(),
        }
    }

    /// # Errors
    ///
    /// Returns `StorageError::Serialization` when `unlocked` and `unlockedAt`
    /// disagree.
    pub fn into_achievement(self) -> Result<Achievement, StorageError> {
        let achievement = Achievement::new(
            self.id.clone(),
            self.title,
            self.description,
            self.icon.unwrap_or_else(|| "🏆".to_string()),
            self.category,
            self.module_id,
        );
        match (self.unlocked, self.unlocked_at) {
            (true, Some(at)) => Ok(achievement.unlocked_at_time(at)),
            (false, None) => Ok(achievement),
            (true, None) => Err(StorageError::Serialization(format!(
                "{}: unlocked without unlockedAt",
                self.id
            ))),
            (false, Some(_)) => Err(StorageError::Serialization(format!(
                "{}: unlockedAt set on a locked achievement",
                self.id
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsRecord {
    #[serde(default)]
    pub drops: Option<u32>,
    #[serde(default)]
    pub longest_streak: Option<u32>,
    #[serde(default)]
    pub catches: Option<u32>,
    #[serde(default)]
    pub consistency: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeSessionRecord {
    pub id: SessionId,
    pub module_id: ModuleId,
    pub date: DateTime<Utc>,
    /// Minutes.
    pub duration: u32,
    #[serde(default)]
    pub notes: String,
    pub rating: SessionRating,
    #[serde(default)]
    pub prop_type: Option<JugglingProp>,
    #[serde(default)]
    pub metrics: Option<MetricsRecord>,
}

impl PracticeSessionRecord {
    #[must_use]
    pub fn from_session(session: &PracticeSession) -> Self {
        let m = session.metrics;
        let metrics = (m != PracticeMetrics::default()).then_some(MetricsRecord {
            drops: m.drops,
            longest_streak: m.longest_streak_secs,
            catches: m.catches,
            consistency: m.consistency,
        });
        Self {
            id: session.id.clone(),
            module_id: session.module_id.clone(),
            date: session.date,
            duration: session.duration_minutes,
            notes: session.notes.clone(),
            rating: session.rating,
            prop_type: session.prop,
            metrics,
        }
    }

    #[must_use]
    pub fn into_session(self) -> PracticeSession {
        let metrics = self.metrics.unwrap_or_default();
        PracticeSession {
            id: self.id,
            module_id: self.module_id,
            date: self.date,
            duration_minutes: self.duration,
            notes: self.notes,
            rating: self.rating,
            prop: self.prop_type,
            metrics: PracticeMetrics {
                drops: metrics.drops,
                longest_streak_secs: metrics.longest_streak,
                catches: metrics.catches,
                consistency: metrics.consistency,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsRecord {
    pub id: NewsId,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    pub category: NewsCategory,
    #[serde(default)]
    pub author: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl NewsRecord {
    #[must_use]
    pub fn into_article(self) -> NewsArticle {
        NewsArticle {
            id: self.id,
            title: self.title,
            slug: self.slug,
            category: self.category,
            author: self.author,
            published_on: self.date,
            summary: self.summary,
            content: self.content,
            image_url: self.image,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub learning_style: LearningStyle,
    #[serde(default)]
    pub level: u32,
}

impl UserRecord {
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id().clone(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            avatar: user.avatar().map(str::to_string),
            learning_style: user.learning_style(),
            level: user.level(),
        }
    }

    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the user fails validation.
    pub fn into_user(self) -> Result<User, StorageError> {
        let id = self.id.clone();
        User::new(
            self.id,
            self.name,
            self.email,
            self.avatar,
            self.learning_style,
            self.level,
        )
        .map_err(|err| StorageError::Serialization(format!("{id}: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_record_rejects_contradicting_unlocked_flag() {
        let json = r#"{
            "id": "module-3", "name": "Flower Stick", "jugglingProp": "flower-stick",
            "status": "locked", "progress": 0, "unlocked": true
        }"#;
        let record: ModuleRecord = serde_json::from_str(json).unwrap();
        let err = record.into_module(3).unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[test]
    fn modules_without_order_use_array_position() {
        let json = r#"[
            {"id": "b", "name": "Second", "jugglingProp": "rings", "status": "locked"},
            {"id": "a", "name": "First", "jugglingProp": "balls", "status": "in-progress", "progress": 20, "order": 1}
        ]"#;
        let records: Vec<ModuleRecord> = serde_json::from_str(json).unwrap();
        let modules = modules_from_records(records).unwrap();
        // Both claim order 1; stable sort keeps payload order.
        assert_eq!(modules[0].id().as_str(), "b");
        assert_eq!(modules[1].order(), 1);
    }

    #[test]
    fn module_record_round_trips_through_domain() {
        let json = r#"{
            "id": "module-2", "order": 2, "name": "Rings", "jugglingProp": "rings",
            "techTheme": "MLOps", "awsServices": ["SageMaker Pipelines"],
            "status": "in-progress", "progress": 45, "unlocked": true
        }"#;
        let record: ModuleRecord = serde_json::from_str(json).unwrap();
        let module = record.into_module(1).unwrap();
        let back = ModuleRecord::from_module(&module);
        assert_eq!(back.progress, 45);
        assert_eq!(back.unlocked, Some(true));
        assert_eq!(back.aws_services, vec!["SageMaker Pipelines".to_string()]);
    }

    #[test]
    fn achievement_record_requires_timestamp_when_unlocked() {
        let json = r#"{"id": "x", "title": "X", "category": "tech", "unlocked": true}"#;
        let record: AchievementRecord = serde_json::from_str(json).unwrap();
        assert!(record.into_achievement().is_err());
    }

    #[test]
    fn achievement_record_accepts_name_alias() {
        let json = r#"{"id": "x", "name": "Named", "category": "juggling"}"#;
        let record: AchievementRecord = serde_json::from_str(json).unwrap();
        let achievement = record.into_achievement().unwrap();
        assert_eq!(achievement.title(), "Named");
        assert!(!achievement.is_unlocked());
    }

    #[test]
    fn session_record_rejects_out_of_range_rating() {
        let json = r#"{"id": "s", "moduleId": "module-1", "date": "2023-04-15T10:00:00Z",
                       "duration": 10, "rating": 9}"#;
        assert!(serde_json::from_str::<PracticeSessionRecord>(json).is_err());
    }
}
