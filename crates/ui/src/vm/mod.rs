mod achievement_vm;
mod dashboard_vm;
mod markdown_vm;
mod module_vm;
mod news_vm;
mod practice_vm;
mod profile_vm;
mod reflection_vm;
mod time_fmt;

pub use achievement_vm::{AchievementGroupVm, AchievementVm, map_achievement_groups};
pub use dashboard_vm::{DashboardVm, map_dashboard};
pub use markdown_vm::{markdown_to_html, normalize_markdown, reading_minutes, sanitize_html};
pub use module_vm::{ModuleCardVm, map_module_cards, status_class};
pub use news_vm::{ArticleVm, NewsCardVm, map_article, map_news_cards};
pub use practice_vm::{
    PracticeForm, PracticeFormErrors, PracticeStatsVm, SessionDetailVm, SessionRowVm,
    map_session_detail, map_session_rows, stars, validate_practice_form,
};
pub use profile_vm::ProfileForm;
pub use reflection_vm::quiz_verdict;
pub use time_fmt::{format_date, format_day, format_streak};
