use juggle_core::model::User;
use services::{DashboardSummary, ProgressSnapshot};

use crate::vm::achievement_vm::AchievementVm;
use crate::vm::module_vm::ModuleCardVm;
use crate::vm::practice_vm::{SessionRowVm, map_session_rows};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardVm {
    pub greeting: String,
    pub level_label: Option<String>,
    pub overall_percent: u8,
    pub modules_label: String,
    pub achievements_label: String,
    pub active_module: Option<ModuleCardVm>,
    pub recent_achievements: Vec<AchievementVm>,
    pub recent_sessions: Vec<SessionRowVm>,
}

#[must_use]
pub fn map_dashboard(snapshot: &ProgressSnapshot, user: Option<&User>) -> DashboardVm {
    let summary = DashboardSummary::from_snapshot(snapshot);
    DashboardVm {
        greeting: user.map_or_else(
            || "Welcome back!".to_string(),
            |user| format!("Welcome back, {}!", user.name()),
        ),
        level_label: user.map(|user| format!("Level {}", user.level())),
        overall_percent: summary.overall_progress,
        modules_label: format!(
            "{} of {} modules completed",
            summary.completed_modules, summary.total_modules
        ),
        achievements_label: format!(
            "{} of {} achievements unlocked",
            summary.unlocked_achievements, summary.total_achievements
        ),
        active_module: summary.active_module.as_ref().map(ModuleCardVm::from),
        recent_achievements: summary
            .recent_achievements
            .iter()
            .map(AchievementVm::from)
            .collect(),
        recent_sessions: map_session_rows(&summary.recent_sessions, &snapshot.modules),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use services::LoadPhase;
    use storage::Fixtures;

    #[test]
    fn fixture_dashboard_labels() {
        let fixtures = Fixtures::load().unwrap();
        let snapshot = ProgressSnapshot {
            phase: LoadPhase::Ready,
            modules: fixtures.modules,
            achievements: fixtures.achievements,
            sessions: fixtures.sessions,
            loading: false,
            error: None,
        };
        let vm = map_dashboard(&snapshot, Some(&fixtures.user));
        assert_eq!(vm.greeting, "Welcome back, Test User!");
        assert_eq!(vm.level_label.as_deref(), Some("Level 7"));
        assert_eq!(vm.modules_label, "1 of 6 modules completed");
        assert_eq!(vm.overall_percent, 17);
        assert_eq!(vm.active_module.unwrap().id, "module-2");
        assert_eq!(vm.recent_sessions[0].id, "session-3");
        assert_eq!(vm.recent_achievements.len(), 3);
    }
}
