use juggle_core::model::{Achievement, AchievementCategory};
use services::AchievementStats;

use crate::vm::time_fmt::format_date;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AchievementVm {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub category_label: &'static str,
    pub unlocked: bool,
    pub unlocked_label: Option<String>,
}

impl From<&Achievement> for AchievementVm {
    fn from(achievement: &Achievement) -> Self {
        Self {
            id: achievement.id().as_str().to_string(),
            title: achievement.title().to_string(),
            description: achievement.description().to_string(),
            icon: achievement.icon().to_string(),
            category_label: achievement.category().label(),
            unlocked: achievement.is_unlocked(),
            unlocked_label: achievement
                .unlocked_at()
                .map(|at| format!("Unlocked {}", format_date(at))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AchievementGroupVm {
    pub title: &'static str,
    pub count_label: String,
    pub percent: u8,
    pub items: Vec<AchievementVm>,
}

/// Juggling and tech groups, unlocked items first within each.
#[must_use]
pub fn map_achievement_groups(achievements: &[Achievement]) -> Vec<AchievementGroupVm> {
    let stats = AchievementStats::compute(achievements);
    [AchievementCategory::Juggling, AchievementCategory::Tech]
        .into_iter()
        .map(|category| {
            let count = stats.for_category(category);
            let mut items: Vec<AchievementVm> = achievements
                .iter()
                .filter(|a| a.category() == category)
                .map(AchievementVm::from)
                .collect();
            items.sort_by_key(|item| !item.unlocked);
            AchievementGroupVm {
                title: category.label(),
                count_label: format!("{} / {}", count.unlocked, count.total),
                percent: count.percent(),
                items,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono::Utc;
    use juggle_core::model::AchievementId;

    fn achievement(id: &str, category: AchievementCategory, unlocked: bool) -> Achievement {
        let achievement = Achievement::new(
            AchievementId::new(id),
            id,
            "",
            "🏆",
            category,
            None,
        );
        if unlocked {
            achievement.unlocked_at_time(Utc.with_ymd_and_hms(2023, 4, 17, 9, 0, 0).unwrap())
        } else {
            achievement
        }
    }

    #[test]
    fn groups_by_category_with_unlocked_first() {
        let groups = map_achievement_groups(&[
            achievement("a", AchievementCategory::Tech, false),
            achievement("b", AchievementCategory::Tech, true),
            achievement("c", AchievementCategory::Juggling, true),
        ]);
        assert_eq!(groups[0].title, "Juggling");
        assert_eq!(groups[0].count_label, "1 / 1");
        assert_eq!(groups[1].count_label, "1 / 2");
        assert_eq!(groups[1].percent, 50);
        assert_eq!(groups[1].items[0].id, "b");
        assert_eq!(
            groups[1].items[0].unlocked_label.as_deref(),
            Some("Unlocked Apr 17, 2023")
        );
    }
}
