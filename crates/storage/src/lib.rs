#![forbid(unsafe_code)]

pub mod fixtures;
pub mod records;
pub mod repository;
pub mod theme_file;

pub use fixtures::Fixtures;
pub use repository::{
    AchievementRepository, InMemoryRepository, ModuleRepository, NewsRepository,
    PracticeSessionRepository, Storage, StorageError, ThemeRepository, UserRepository,
};
pub use theme_file::JsonThemeFile;
