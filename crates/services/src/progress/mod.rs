mod queries;
mod store;

pub use queries::{
    AchievementStats, DashboardSummary, PracticeStats, UnlockCount, percent, recent_sessions,
};
pub use store::{
    LOAD_FAILED, LoadOutcome, LoadPhase, ProgressSnapshot, ProgressStore, ProgressUpdate,
    SESSION_FAILED, UNLOCK_FAILED, UPDATE_FAILED,
};
