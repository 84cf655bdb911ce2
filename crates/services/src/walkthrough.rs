use juggle_core::model::{Module, ModuleId};

use crate::error::{ProgressError, WalkthroughError};
use crate::progress::{ProgressStore, ProgressUpdate};

/// The five fixed stages every module walks through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalkthroughStep {
    Introduction,
    JugglingTechniques,
    TechnologyConcepts,
    HandsOnProject,
    ReflectionAssessment,
}

impl WalkthroughStep {
    pub const ALL: [WalkthroughStep; 5] = [
        WalkthroughStep::Introduction,
        WalkthroughStep::JugglingTechniques,
        WalkthroughStep::TechnologyConcepts,
        WalkthroughStep::HandsOnProject,
        WalkthroughStep::ReflectionAssessment,
    ];

    /// Progress credited per completed step.
    pub const PERCENT_PER_STEP: u8 = 20;

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            WalkthroughStep::Introduction => 0,
            WalkthroughStep::JugglingTechniques => 1,
            WalkthroughStep::TechnologyConcepts => 2,
            WalkthroughStep::HandsOnProject => 3,
            WalkthroughStep::ReflectionAssessment => 4,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            WalkthroughStep::Introduction => "Introduction",
            WalkthroughStep::JugglingTechniques => "Juggling Techniques",
            WalkthroughStep::TechnologyConcepts => "AWS Technology Concepts",
            WalkthroughStep::HandsOnProject => "Hands-on Project",
            WalkthroughStep::ReflectionAssessment => "Reflection & Assessment",
        }
    }

    #[must_use]
    pub fn description(self, module: &Module) -> String {
        match self {
            WalkthroughStep::Introduction => format!(
                "Learn about {} and {} in this module.",
                module.prop().label(),
                module.tech_theme()
            ),
            WalkthroughStep::JugglingTechniques => format!(
                "Learn the fundamental techniques for {}.",
                module.prop().label()
            ),
            WalkthroughStep::TechnologyConcepts => {
                format!("Learn about {} and related services.", module.tech_theme())
            }
            WalkthroughStep::HandsOnProject => {
                "Apply what you've learned in a practical project.".to_string()
            }
            WalkthroughStep::ReflectionAssessment => {
                "Reflect on what you've learned and assess your progress.".to_string()
            }
        }
    }

    #[must_use]
    pub fn is_final(self) -> bool {
        self == WalkthroughStep::ReflectionAssessment
    }
}

/// Result of pressing "continue".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAdvance {
    /// Moved to `step`; `progress` is the module percentage to record.
    Continue { step: WalkthroughStep, progress: u8 },
    /// The final step was completed; hand over to the reflection flow.
    Reflection,
}

impl StepAdvance {
    #[must_use]
    pub fn progress(self) -> u8 {
        match self {
            StepAdvance::Continue { progress, .. } => progress,
            StepAdvance::Reflection => 100,
        }
    }
}

/// Stepper state for one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Walkthrough {
    module: Module,
    index: usize,
    completed: [bool; 5],
}

impl Walkthrough {
    /// Open the walkthrough for a module held by the progress store.
    ///
    /// # Errors
    ///
    /// Returns `WalkthroughError::NotFound` or `WalkthroughError::Locked`.
    pub fn open(store: &ProgressStore, id: &ModuleId) -> Result<Self, WalkthroughError> {
        let module = store
            .module(id)
            .ok_or_else(|| WalkthroughError::NotFound(id.clone()))?;
        Self::for_module(module)
    }

    /// Resume at `floor(progress / 20)`; earlier steps count as completed.
    ///
    /// # Errors
    ///
    /// Returns `WalkthroughError::Locked` for a module that is not unlocked.
    pub fn for_module(module: Module) -> Result<Self, WalkthroughError> {
        if !module.is_unlocked() {
            return Err(WalkthroughError::Locked(module.id().clone()));
        }
        let last = WalkthroughStep::ALL.len() - 1;
        let index = usize::from(module.progress() / WalkthroughStep::PERCENT_PER_STEP).min(last);
        let mut completed = [false; 5];
        for slot in completed.iter_mut().take(index) {
            *slot = true;
        }
        Ok(Self {
            module,
            index,
            completed,
        })
    }

    #[must_use]
    pub fn module(&self) -> &Module {
        &self.module
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn current(&self) -> WalkthroughStep {
        WalkthroughStep::ALL[self.index]
    }

    #[must_use]
    pub fn is_completed(&self, step: WalkthroughStep) -> bool {
        self.completed[step.index()]
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    /// Mark the current step done and move on.
    pub fn advance(&mut self) -> StepAdvance {
        self.completed[self.index] = true;
        if self.current().is_final() {
            return StepAdvance::Reflection;
        }
        self.index += 1;
        let steps = u8::try_from(self.index).unwrap_or(u8::MAX);
        StepAdvance::Continue {
            step: self.current(),
            progress: steps.saturating_mul(WalkthroughStep::PERCENT_PER_STEP).min(100),
        }
    }

    /// Step back without touching recorded progress. No-op on the first step.
    pub fn back(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Advance and record the resulting progress through `store`.
    ///
    /// # Errors
    ///
    /// Returns the store's `ProgressError`; the local step still moves.
    pub async fn advance_and_persist(
        &mut self,
        store: &ProgressStore,
    ) -> Result<(StepAdvance, ProgressUpdate), ProgressError> {
        let advance = self.advance();
        let percent = i32::from(advance.progress());
        let update = store
            .update_module_progress(self.module.id(), percent)
            .await?;
        self.module = update.module.clone();
        Ok((advance, update))
    }
}
