mod achievements;
mod article;
mod components;
mod dashboard;
mod login;
mod modules;
mod news;
mod not_found;
mod practice;
mod profile;
mod reflection;
mod session_detail;
mod state;
mod walkthrough;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use achievements::AchievementsView;
pub use article::ArticleView;
pub use dashboard::DashboardView;
pub use login::LoginView;
pub use modules::ModulesView;
pub use news::NewsView;
pub use not_found::NotFoundView;
pub use practice::PracticeView;
pub use profile::ProfileView;
pub use reflection::ReflectionView;
pub use session_detail::SessionDetailView;
pub use state::{
    ShellState, ViewError, ViewState, load_snapshot, use_shell_provider, view_state_from_resource,
};
pub use walkthrough::WalkthroughView;
