mod achievement;
mod ids;
mod module;
mod news;
mod practice;
mod theme;
mod user;

pub use ids::{AchievementId, ModuleId, NewsId, ParseIdError, SessionId, UserId};

pub use achievement::{Achievement, AchievementCategory};
pub use module::{
    JugglingProp, Module, ModuleError, ModuleInfo, ModuleStatus, ProgressChange, TimeEstimate,
};
pub use news::{NewsArticle, NewsCategory};
pub use practice::{
    MAX_SESSION_MINUTES, PracticeMetrics, PracticeSession, PracticeSessionDraft,
    PracticeSessionError, SessionRating,
};
pub use theme::ThemeMode;
pub use user::{LearningStyle, ProfileUpdate, User, UserError};
