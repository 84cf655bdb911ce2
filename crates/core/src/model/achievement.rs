use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::{AchievementId, ModuleId};

/// Which track an achievement rewards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    /// Physical skill practice.
    Juggling,
    /// Technical work.
    Tech,
}

impl AchievementCategory {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AchievementCategory::Juggling => "Juggling",
            AchievementCategory::Tech => "Tech",
        }
    }
}

/// An unlockable achievement.
///
/// `unlocked_at` is present exactly when the achievement is unlocked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Achievement {
    id: AchievementId,
    title: String,
    description: String,
    icon: String,
    category: AchievementCategory,
    module_id: Option<ModuleId>,
    unlocked_at: Option<DateTime<Utc>>,
}

impl Achievement {
    #[must_use]
    pub fn new(
        id: AchievementId,
        title: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
        category: AchievementCategory,
        module_id: Option<ModuleId>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            icon: icon.into(),
            category,
            module_id,
            unlocked_at: None,
        }
    }

    /// Rehydrate an achievement that was already unlocked at `at`.
    #[must_use]
    pub fn unlocked_at_time(mut self, at: DateTime<Utc>) -> Self {
        self.unlocked_at = Some(at);
        self
    }

    #[must_use]
    pub fn id(&self) -> &AchievementId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    #[must_use]
    pub fn category(&self) -> AchievementCategory {
        self.category
    }

    #[must_use]
    pub fn module_id(&self) -> Option<&ModuleId> {
        self.module_id.as_ref()
    }

    #[must_use]
    pub fn is_unlocked(&self) -> bool {
        self.unlocked_at.is_some()
    }

    #[must_use]
    pub fn unlocked_at(&self) -> Option<DateTime<Utc>> {
        self.unlocked_at
    }

    /// Unlock at `now`. Repeated unlocks keep the first timestamp.
    ///
    /// Returns true only on the locked -> unlocked transition.
    pub fn unlock(&mut self, now: DateTime<Utc>) -> bool {
        if self.unlocked_at.is_some() {
            return false;
        }
        self.unlocked_at = Some(now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;
    use chrono::Duration;

    fn pipeline_pioneer() -> Achievement {
        Achievement::new(
            AchievementId::new("achievement-4"),
            "Pipeline Pioneer",
            "Deploy your first MLOps pipeline",
            "🔄",
            AchievementCategory::Tech,
            Some(ModuleId::new("module-2")),
        )
    }

    #[test]
    fn unlock_stamps_time_once() {
        let mut achievement = pipeline_pioneer();
        assert!(!achievement.is_unlocked());

        let first = fixed_now();
        assert!(achievement.unlock(first));
        assert!(!achievement.unlock(first + Duration::minutes(5)));
        assert_eq!(achievement.unlocked_at(), Some(first));
    }

    #[test]
    fn rehydrated_achievement_is_unlocked() {
        let achievement = pipeline_pioneer().unlocked_at_time(fixed_now());
        assert!(achievement.is_unlocked());
        assert_eq!(achievement.module_id(), Some(&ModuleId::new("module-2")));
    }
}
