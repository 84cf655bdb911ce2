use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::ModuleId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModuleError {
    #[error("module name cannot be empty")]
    EmptyName,

    #[error("module order must be >= 1")]
    InvalidOrder,

    #[error("progress {0} is out of range (0-100)")]
    ProgressOutOfRange(u8),

    #[error("locked module must have zero progress (got {0})")]
    LockedWithProgress(u8),

    #[error("status {status} does not match progress {progress}")]
    StatusProgressMismatch { status: ModuleStatus, progress: u8 },

    #[error("module {0} is locked")]
    Locked(ModuleId),

    #[error("unknown juggling prop: {0}")]
    UnknownProp(String),

    #[error("unknown module status: {0}")]
    UnknownStatus(String),
}

//
// ─── JUGGLING PROP ─────────────────────────────────────────────────────────────
//

/// Physical-skill track a module is built around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JugglingProp {
    Balls,
    Rings,
    FlowerStick,
    Clubs,
    DevilStick,
    CigarBoxes,
}

impl JugglingProp {
    pub const ALL: [JugglingProp; 6] = [
        JugglingProp::Balls,
        JugglingProp::Rings,
        JugglingProp::FlowerStick,
        JugglingProp::Clubs,
        JugglingProp::DevilStick,
        JugglingProp::CigarBoxes,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            JugglingProp::Balls => "balls",
            JugglingProp::Rings => "rings",
            JugglingProp::FlowerStick => "flower-stick",
            JugglingProp::Clubs => "clubs",
            JugglingProp::DevilStick => "devil-stick",
            JugglingProp::CigarBoxes => "cigar-boxes",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            JugglingProp::Balls => "Balls",
            JugglingProp::Rings => "Rings",
            JugglingProp::FlowerStick => "Flower Stick",
            JugglingProp::Clubs => "Clubs",
            JugglingProp::DevilStick => "Devil Stick",
            JugglingProp::CigarBoxes => "Cigar Boxes",
        }
    }
}

impl fmt::Display for JugglingProp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JugglingProp {
    type Err = ModuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JugglingProp::ALL
            .into_iter()
            .find(|prop| prop.as_str() == s)
            .ok_or_else(|| ModuleError::UnknownProp(s.to_string()))
    }
}

//
// ─── STATUS ────────────────────────────────────────────────────────────────────
//

/// Lifecycle of a module: `Locked -> InProgress -> Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleStatus {
    Locked,
    InProgress,
    Completed,
}

impl ModuleStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ModuleStatus::Locked => "locked",
            ModuleStatus::InProgress => "in-progress",
            ModuleStatus::Completed => "completed",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ModuleStatus::Locked => "Locked",
            ModuleStatus::InProgress => "In Progress",
            ModuleStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for ModuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleStatus {
    type Err = ModuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "locked" => Ok(ModuleStatus::Locked),
            "in-progress" => Ok(ModuleStatus::InProgress),
            "completed" => Ok(ModuleStatus::Completed),
            other => Err(ModuleError::UnknownStatus(other.to_string())),
        }
    }
}

//
// ─── MODULE ────────────────────────────────────────────────────────────────────
//

/// Rough time commitment for each track of a module.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimeEstimate {
    pub tech: String,
    pub juggling: String,
}

/// Descriptive content of a module. Carries no progress state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleInfo {
    pub id: ModuleId,
    /// 1-based position in the program sequence.
    pub order: u32,
    pub name: String,
    pub description: String,
    pub prop: JugglingProp,
    pub tech_theme: String,
    /// Services/technologies the tech track uses, in teaching order.
    pub technologies: Vec<String>,
    pub tie_in: Option<String>,
    pub reflection_prompt: Option<String>,
    pub time_estimate: TimeEstimate,
}

/// What a progress update did to a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressChange {
    pub previous: u8,
    pub current: u8,
    pub status: ModuleStatus,
    /// True when this update moved the module into `Completed`.
    pub completed_now: bool,
}

/// A learning module with its progress state.
///
/// Invariants (enforced by every constructor and mutation):
/// - `progress <= 100`
/// - `status == Locked` implies `progress == 0`
/// - `status == Completed` if and only if `progress == 100`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    info: ModuleInfo,
    status: ModuleStatus,
    progress: u8,
}

impl Module {
    /// Build a module from its content and persisted progress state.
    ///
    /// # Errors
    ///
    /// Returns `ModuleError` if the name is empty, the order is zero, or the
    /// status/progress pair violates the module invariants.
    pub fn new(info: ModuleInfo, status: ModuleStatus, progress: u8) -> Result<Self, ModuleError> {
        if info.name.trim().is_empty() {
            return Err(ModuleError::EmptyName);
        }
        if info.order == 0 {
            return Err(ModuleError::InvalidOrder);
        }
        if progress > 100 {
            return Err(ModuleError::ProgressOutOfRange(progress));
        }
        match status {
            ModuleStatus::Locked if progress != 0 => {
                return Err(ModuleError::LockedWithProgress(progress));
            }
            ModuleStatus::Completed if progress != 100 => {
                return Err(ModuleError::StatusProgressMismatch { status, progress });
            }
            ModuleStatus::InProgress if progress == 100 => {
                return Err(ModuleError::StatusProgressMismatch { status, progress });
            }
            _ => {}
        }

        Ok(Self {
            info,
            status,
            progress,
        })
    }

    #[must_use]
    pub fn id(&self) -> &ModuleId {
        &self.info.id
    }

    #[must_use]
    pub fn info(&self) -> &ModuleInfo {
        &self.info
    }

    #[must_use]
    pub fn order(&self) -> u32 {
        self.info.order
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.info.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.info.description
    }

    #[must_use]
    pub fn prop(&self) -> JugglingProp {
        self.info.prop
    }

    #[must_use]
    pub fn tech_theme(&self) -> &str {
        &self.info.tech_theme
    }

    #[must_use]
    pub fn technologies(&self) -> &[String] {
        &self.info.technologies
    }

    #[must_use]
    pub fn status(&self) -> ModuleStatus {
        self.status
    }

    #[must_use]
    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Derived from status; there is no separately stored flag to drift.
    #[must_use]
    pub fn is_unlocked(&self) -> bool {
        self.status != ModuleStatus::Locked
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == ModuleStatus::Completed
    }

    /// Set progress, clamped to 100, and derive the status from it.
    ///
    /// Regressing a completed module below 100 moves it back to `InProgress`.
    ///
    /// # Errors
    ///
    /// Returns `ModuleError::Locked` if the module has not been unlocked yet.
    pub fn set_progress(&mut self, percent: u8) -> Result<ProgressChange, ModuleError> {
        if self.status == ModuleStatus::Locked {
            return Err(ModuleError::Locked(self.info.id.clone()));
        }

        let previous = self.progress;
        let was_completed = self.is_completed();
        let current = percent.min(100);

        self.progress = current;
        self.status = if current == 100 {
            ModuleStatus::Completed
        } else {
            ModuleStatus::InProgress
        };

        Ok(ProgressChange {
            previous,
            current,
            status: self.status,
            completed_now: !was_completed && self.is_completed(),
        })
    }

    /// Move a locked module to `InProgress` at zero progress.
    ///
    /// Returns false when the module was already unlocked.
    pub fn unlock(&mut self) -> bool {
        if self.is_unlocked() {
            return false;
        }
        self.status = ModuleStatus::InProgress;
        self.progress = 0;
        true
    }

    /// Case-insensitive match against name, description, and tech theme.
    #[must_use]
    pub fn matches_text(&self, needle_lower: &str) -> bool {
        if needle_lower.is_empty() {
            return true;
        }
        self.info.name.to_lowercase().contains(needle_lower)
            || self.info.description.to_lowercase().contains(needle_lower)
            || self.info.tech_theme.to_lowercase().contains(needle_lower)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn info(id: &str, order: u32, prop: JugglingProp) -> ModuleInfo {
        ModuleInfo {
            id: ModuleId::new(id),
            order,
            name: format!("Module {order}"),
            description: "Cascade basics and managed AI".to_string(),
            prop,
            tech_theme: "AI Foundations".to_string(),
            technologies: vec!["Amazon Bedrock".to_string()],
            tie_in: None,
            reflection_prompt: None,
            time_estimate: TimeEstimate::default(),
        }
    }

    #[test]
    fn locked_module_must_have_zero_progress() {
        let err = Module::new(info("module-3", 3, JugglingProp::FlowerStick), ModuleStatus::Locked, 10)
            .unwrap_err();
        assert_eq!(err, ModuleError::LockedWithProgress(10));
    }

    #[test]
    fn completed_requires_full_progress() {
        let err = Module::new(info("module-1", 1, JugglingProp::Balls), ModuleStatus::Completed, 80)
            .unwrap_err();
        assert!(matches!(err, ModuleError::StatusProgressMismatch { .. }));

        let err = Module::new(info("module-1", 1, JugglingProp::Balls), ModuleStatus::InProgress, 100)
            .unwrap_err();
        assert!(matches!(err, ModuleError::StatusProgressMismatch { .. }));
    }

    #[test]
    fn set_progress_clamps_and_completes() {
        let mut module =
            Module::new(info("module-2", 2, JugglingProp::Rings), ModuleStatus::InProgress, 45).unwrap();
        let change = module.set_progress(180).unwrap();
        assert_eq!(change.previous, 45);
        assert_eq!(change.current, 100);
        assert!(change.completed_now);
        assert_eq!(module.status(), ModuleStatus::Completed);
    }

    #[test]
    fn regressing_completed_module_reopens_it() {
        let mut module =
            Module::new(info("module-1", 1, JugglingProp::Balls), ModuleStatus::Completed, 100).unwrap();
        let change = module.set_progress(60).unwrap();
        assert!(!change.completed_now);
        assert_eq!(module.status(), ModuleStatus::InProgress);
        assert_eq!(module.progress(), 60);
    }

    #[test]
    fn set_progress_on_locked_module_fails() {
        let mut module =
            Module::new(info("module-4", 4, JugglingProp::Clubs), ModuleStatus::Locked, 0).unwrap();
        let err = module.set_progress(20).unwrap_err();
        assert_eq!(err, ModuleError::Locked(ModuleId::new("module-4")));
        assert_eq!(module.progress(), 0);
    }

    #[test]
    fn unlock_is_one_way() {
        let mut module =
            Module::new(info("module-3", 3, JugglingProp::FlowerStick), ModuleStatus::Locked, 0).unwrap();
        assert!(!module.is_unlocked());
        assert!(module.unlock());
        assert!(module.is_unlocked());
        assert_eq!(module.status(), ModuleStatus::InProgress);
        assert!(!module.unlock());
    }

    #[test]
    fn prop_and_status_parse_from_wire_names() {
        assert_eq!("devil-stick".parse::<JugglingProp>().unwrap(), JugglingProp::DevilStick);
        assert!("knives".parse::<JugglingProp>().is_err());
        assert_eq!("in-progress".parse::<ModuleStatus>().unwrap(), ModuleStatus::InProgress);
    }

    #[test]
    fn text_match_is_case_insensitive() {
        let module =
            Module::new(info("module-1", 1, JugglingProp::Balls), ModuleStatus::Completed, 100).unwrap();
        assert!(module.matches_text("cascade"));
        assert!(module.matches_text("ai foundations"));
        assert!(!module.matches_text("kubernetes"));
        assert!(module.matches_text(""));
    }
}
