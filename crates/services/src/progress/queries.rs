use std::cmp::Reverse;

use juggle_core::model::{
    Achievement, AchievementCategory, JugglingProp, Module, ModuleStatus, PracticeSession,
};

use super::store::ProgressSnapshot;

const RECENT_LIMIT: usize = 3;

/// Rounded integer percentage; 0 when `total` is 0.
#[must_use]
pub fn percent(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let rounded = (part.min(total) * 100 + total / 2) / total;
    u8::try_from(rounded).unwrap_or(100)
}

/// Headline numbers for the dashboard page.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    /// First module still in progress, in program order.
    pub active_module: Option<Module>,
    pub recent_achievements: Vec<Achievement>,
    pub recent_sessions: Vec<PracticeSession>,
    pub completed_modules: usize,
    pub total_modules: usize,
    pub overall_progress: u8,
    pub unlocked_achievements: usize,
    pub total_achievements: usize,
}

impl DashboardSummary {
    #[must_use]
    pub fn from_snapshot(snapshot: &ProgressSnapshot) -> Self {
        let active_module = snapshot
            .modules
            .iter()
            .filter(|m| m.status() == ModuleStatus::InProgress)
            .min_by_key(|m| m.order())
            .cloned();

        let mut recent_achievements: Vec<Achievement> = snapshot
            .achievements
            .iter()
            .filter(|a| a.is_unlocked())
            .cloned()
            .collect();
        recent_achievements.sort_by_key(|a| Reverse(a.unlocked_at()));
        recent_achievements.truncate(RECENT_LIMIT);

        let completed_modules = snapshot.modules.iter().filter(|m| m.is_completed()).count();
        let total_modules = snapshot.modules.len();

        Self {
            active_module,
            recent_achievements,
            recent_sessions: recent_sessions(&snapshot.sessions, RECENT_LIMIT),
            completed_modules,
            total_modules,
            overall_progress: percent(completed_modules, total_modules),
            unlocked_achievements: snapshot.achievements.iter().filter(|a| a.is_unlocked()).count(),
            total_achievements: snapshot.achievements.len(),
        }
    }
}

/// Up to `limit` sessions, newest first.
#[must_use]
pub fn recent_sessions(sessions: &[PracticeSession], limit: usize) -> Vec<PracticeSession> {
    let mut sorted = sessions.to_vec();
    sorted.sort_by_key(|s| Reverse(s.date));
    sorted.truncate(limit);
    sorted
}

/// Aggregates for the practice page, optionally limited to one prop.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PracticeStats {
    pub session_count: usize,
    pub total_minutes: u32,
    pub average_minutes: u32,
    pub longest_streak_secs: Option<u32>,
    pub total_catches: u32,
    pub total_drops: u32,
    pub average_rating: Option<f32>,
}

impl PracticeStats {
    #[must_use]
    pub fn compute(sessions: &[PracticeSession], prop: Option<JugglingProp>) -> Self {
        let selected: Vec<&PracticeSession> = sessions
            .iter()
            .filter(|s| prop.is_none_or(|p| s.prop == Some(p)))
            .collect();
        if selected.is_empty() {
            return Self::default();
        }

        let count = u32::try_from(selected.len()).unwrap_or(u32::MAX);
        let minutes = wide_sum(selected.iter().map(|s| s.duration_minutes));
        let rating_sum = wide_sum(selected.iter().map(|s| u32::from(s.rating.value())));
        let average_minutes = (minutes + u64::from(count) / 2) / u64::from(count);

        #[allow(clippy::cast_precision_loss)]
        let average_rating = rating_sum as f32 / count as f32;

        Self {
            session_count: selected.len(),
            total_minutes: clamp_u32(minutes),
            average_minutes: clamp_u32(average_minutes),
            longest_streak_secs: selected
                .iter()
                .filter_map(|s| s.metrics.longest_streak_secs)
                .max(),
            total_catches: clamp_u32(wide_sum(selected.iter().filter_map(|s| s.metrics.catches))),
            total_drops: clamp_u32(wide_sum(selected.iter().filter_map(|s| s.metrics.drops))),
            average_rating: Some(average_rating),
        }
    }
}

/// Totals saturate at `u32::MAX` instead of overflowing.
fn wide_sum(values: impl Iterator<Item = u32>) -> u64 {
    values.fold(0u64, |acc, v| acc.saturating_add(u64::from(v)))
}

fn clamp_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnlockCount {
    pub unlocked: usize,
    pub total: usize,
}

impl UnlockCount {
    #[must_use]
    pub fn percent(self) -> u8 {
        percent(self.unlocked, self.total)
    }

    fn add(&mut self, achievement: &Achievement) {
        self.total += 1;
        if achievement.is_unlocked() {
            self.unlocked += 1;
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AchievementStats {
    pub juggling: UnlockCount,
    pub tech: UnlockCount,
    pub overall: UnlockCount,
}

impl AchievementStats {
    #[must_use]
    pub fn compute(achievements: &[Achievement]) -> Self {
        let mut stats = Self::default();
        for achievement in achievements {
            match achievement.category() {
                AchievementCategory::Juggling => stats.juggling.add(achievement),
                AchievementCategory::Tech => stats.tech.add(achievement),
            }
            stats.overall.add(achievement);
        }
        stats
    }

    #[must_use]
    pub fn for_category(&self, category: AchievementCategory) -> UnlockCount {
        match category {
            AchievementCategory::Juggling => self.juggling,
            AchievementCategory::Tech => self.tech,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::store::LoadPhase;
    use storage::Fixtures;

    fn fixture_snapshot() -> ProgressSnapshot {
        let fixtures = Fixtures::load().unwrap();
        ProgressSnapshot {
            phase: LoadPhase::Ready,
            modules: fixtures.modules,
            achievements: fixtures.achievements,
            sessions: fixtures.sessions,
            loading: false,
            error: None,
        }
    }

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(percent(1, 6), 17);
        assert_eq!(percent(1, 8), 13);
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(3, 3), 100);
    }

    #[test]
    fn dashboard_summary_from_fixtures() {
        let summary = DashboardSummary::from_snapshot(&fixture_snapshot());
        assert_eq!(summary.active_module.unwrap().id().as_str(), "module-2");
        assert_eq!(summary.completed_modules, 1);
        assert_eq!(summary.overall_progress, 17);
        assert_eq!(summary.recent_achievements.len(), 3);
        assert_eq!(summary.recent_achievements[0].id().as_str(), "achievement-3");
        assert_eq!(summary.recent_sessions[0].id.as_str(), "session-3");
        assert_eq!(summary.unlocked_achievements, 4);
        assert_eq!(summary.total_achievements, 10);
    }

    #[test]
    fn empty_snapshot_has_zero_progress() {
        let summary = DashboardSummary::from_snapshot(&ProgressSnapshot::default());
        assert!(summary.active_module.is_none());
        assert_eq!(summary.overall_progress, 0);
    }

    #[test]
    fn practice_stats_by_prop() {
        let sessions = Fixtures::load().unwrap().sessions;
        let all = PracticeStats::compute(&sessions, None);
        assert_eq!(all.session_count, 3);
        assert_eq!(all.total_minutes, 50);
        assert_eq!(all.average_minutes, 17);
        assert_eq!(all.longest_streak_secs, Some(35));

        let rings = PracticeStats::compute(&sessions, Some(JugglingProp::Rings));
        assert_eq!(rings.session_count, 1);
        assert_eq!(rings.longest_streak_secs, Some(12));

        let clubs = PracticeStats::compute(&sessions, Some(JugglingProp::Clubs));
        assert_eq!(clubs, PracticeStats::default());
    }

    #[test]
    fn practice_stats_saturate_instead_of_overflowing() {
        let mut sessions = Fixtures::load().unwrap().sessions;
        for session in &mut sessions {
            session.duration_minutes = 3_000_000_000;
            session.metrics.catches = Some(u32::MAX);
            session.metrics.drops = Some(u32::MAX);
        }
        let stats = PracticeStats::compute(&sessions, None);
        assert_eq!(stats.total_minutes, u32::MAX);
        assert_eq!(stats.average_minutes, 3_000_000_000);
        assert_eq!(stats.total_catches, u32::MAX);
        assert_eq!(stats.total_drops, u32::MAX);
    }

    #[test]
    fn achievement_stats_split_by_category() {
        let stats = AchievementStats::compute(&Fixtures::load().unwrap().achievements);
        assert_eq!(stats.overall.total, 10);
        assert_eq!(stats.overall.unlocked, 4);
        assert_eq!(
            stats.juggling.total + stats.tech.total,
            stats.overall.total
        );
        assert_eq!(stats.for_category(AchievementCategory::Juggling), stats.juggling);
    }
}
