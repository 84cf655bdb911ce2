use std::collections::BTreeMap;

use juggle_core::model::{AchievementId, Module, ModuleId};

use super::quiz::{AnswerFeedback, QuestionSet, QuizScore, question_set_for, score};
use crate::config::{SimulatedLatency, simulate};
use crate::error::ReflectionError;
use crate::progress::ProgressStore;

/// Route placeholder that resolves to the most relevant module.
pub const LATEST: &str = "latest";

pub const SUBMIT_FAILED: &str = "Failed to submit reflection";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectionStage {
    Reflection,
    KnowledgeCheck,
    Complete,
}

impl ReflectionStage {
    pub const ALL: [ReflectionStage; 3] = [
        ReflectionStage::Reflection,
        ReflectionStage::KnowledgeCheck,
        ReflectionStage::Complete,
    ];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            ReflectionStage::Reflection => "Reflection",
            ReflectionStage::KnowledgeCheck => "Knowledge Check",
            ReflectionStage::Complete => "Complete",
        }
    }

    fn next(self) -> Self {
        match self {
            ReflectionStage::Reflection => ReflectionStage::KnowledgeCheck,
            ReflectionStage::KnowledgeCheck | ReflectionStage::Complete => ReflectionStage::Complete,
        }
    }

    fn previous(self) -> Self {
        match self {
            ReflectionStage::Reflection | ReflectionStage::KnowledgeCheck => {
                ReflectionStage::Reflection
            }
            ReflectionStage::Complete => ReflectionStage::KnowledgeCheck,
        }
    }
}

/// Free-text prompts on the reflection stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReflectionField {
    JugglingChallenges,
    TechChallenges,
    Connections,
    NextSteps,
}

/// Human label for a 1-5 self-assessment.
#[must_use]
pub fn rating_label(rating: u8) -> &'static str {
    match rating {
        1 => "Just started",
        2 => "Basic understanding",
        3 => "Making progress",
        4 => "Good progress",
        _ => "Confident",
    }
}

/// Everything the learner enters during a reflection. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectionSubmission {
    pub juggling_progress: u8,
    pub tech_progress: u8,
    pub juggling_challenges: String,
    pub tech_challenges: String,
    pub connections: String,
    pub next_steps: String,
    /// Question id to selected option text.
    pub quiz_answers: BTreeMap<String, String>,
}

impl Default for ReflectionSubmission {
    fn default() -> Self {
        Self {
            juggling_progress: 3,
            tech_progress: 3,
            juggling_challenges: String::new(),
            tech_challenges: String::new(),
            connections: String::new(),
            next_steps: String::new(),
            quiz_answers: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectionOutcome {
    pub module_id: ModuleId,
    pub achievement_id: AchievementId,
    /// False when the achievement was already unlocked or does not exist.
    pub achievement_unlocked: bool,
    pub score: QuizScore,
}

/// Three-stage wizard: reflection, knowledge check, then submit.
#[derive(Debug, Clone)]
pub struct ReflectionFlow {
    module: Module,
    questions: QuestionSet,
    stage: ReflectionStage,
    submission: ReflectionSubmission,
    outcome: Option<ReflectionOutcome>,
    latency: SimulatedLatency,
}

impl ReflectionFlow {
    /// Start a reflection for `target`, a module id or [`LATEST`].
    ///
    /// # Errors
    ///
    /// Returns `ReflectionError::NoModule` when the id is unknown or the store
    /// holds no modules.
    pub fn open(
        store: &ProgressStore,
        target: &str,
        latency: SimulatedLatency,
    ) -> Result<Self, ReflectionError> {
        let module = resolve_module(store, target).ok_or(ReflectionError::NoModule)?;
        Ok(Self::for_module(module, latency))
    }

    #[must_use]
    pub fn for_module(module: Module, latency: SimulatedLatency) -> Self {
        Self {
            questions: question_set_for(module.prop()),
            module,
            stage: ReflectionStage::Reflection,
            submission: ReflectionSubmission::default(),
            outcome: None,
            latency,
        }
    }

    #[must_use]
    pub fn module(&self) -> &Module {
        &self.module
    }

    #[must_use]
    pub fn stage(&self) -> ReflectionStage {
        self.stage
    }

    #[must_use]
    pub fn question_set(&self) -> QuestionSet {
        self.questions
    }

    #[must_use]
    pub fn submission(&self) -> &ReflectionSubmission {
        &self.submission
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&ReflectionOutcome> {
        self.outcome.as_ref()
    }

    pub fn next(&mut self) {
        self.stage = self.stage.next();
    }

    pub fn back(&mut self) {
        self.stage = self.stage.previous();
    }

    /// # Errors
    ///
    /// Returns `ReflectionError::RatingOutOfRange` outside 1..=5.
    pub fn set_juggling_progress(&mut self, rating: u8) -> Result<(), ReflectionError> {
        self.submission.juggling_progress = check_rating(rating)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ReflectionError::RatingOutOfRange` outside 1..=5.
    pub fn set_tech_progress(&mut self, rating: u8) -> Result<(), ReflectionError> {
        self.submission.tech_progress = check_rating(rating)?;
        Ok(())
    }

    pub fn set_text(&mut self, field: ReflectionField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ReflectionField::JugglingChallenges => self.submission.juggling_challenges = value,
            ReflectionField::TechChallenges => self.submission.tech_challenges = value,
            ReflectionField::Connections => self.submission.connections = value,
            ReflectionField::NextSteps => self.submission.next_steps = value,
        }
    }

    /// Record the selected option for a question, replacing any earlier pick.
    ///
    /// # Errors
    ///
    /// Returns `ReflectionError::UnknownQuestion` for an id outside the set.
    pub fn answer(&mut self, question_id: &str, option: &str) -> Result<(), ReflectionError> {
        if self.questions.question(question_id).is_none() {
            return Err(ReflectionError::UnknownQuestion(question_id.to_string()));
        }
        self.submission
            .quiz_answers
            .insert(question_id.to_string(), option.to_string());
        Ok(())
    }

    #[must_use]
    pub fn feedback(&self, question_id: &str) -> Option<AnswerFeedback> {
        let question = self.questions.question(question_id)?;
        let answer = self.submission.quiz_answers.get(question_id).map(String::as_str);
        Some(AnswerFeedback::for_answer(question, answer))
    }

    #[must_use]
    pub fn score(&self) -> QuizScore {
        score(self.questions, &self.submission.quiz_answers)
    }

    /// Submit the reflection and unlock the module's completion achievement.
    ///
    /// The quiz score is reported but does not gate the unlock.
    ///
    /// # Errors
    ///
    /// Returns `AlreadySubmitted` on a second call, or the store's error if
    /// the unlock fails.
    pub async fn submit(
        &mut self,
        store: &ProgressStore,
    ) -> Result<ReflectionOutcome, ReflectionError> {
        if self.outcome.is_some() {
            return Err(ReflectionError::AlreadySubmitted);
        }
        simulate(self.latency.submit).await;

        let achievement_id = AchievementId::module_completion(self.module.id());
        let achievement_unlocked = store.unlock_achievement(&achievement_id).await?;
        let outcome = ReflectionOutcome {
            module_id: self.module.id().clone(),
            achievement_id,
            achievement_unlocked,
            score: self.score(),
        };
        tracing::info!(
            module = %outcome.module_id,
            score = outcome.score.percent,
            unlocked = achievement_unlocked,
            "reflection submitted"
        );
        self.stage = ReflectionStage::Complete;
        self.outcome = Some(outcome.clone());
        Ok(outcome)
    }
}

fn check_rating(rating: u8) -> Result<u8, ReflectionError> {
    if (1..=5).contains(&rating) {
        Ok(rating)
    } else {
        Err(ReflectionError::RatingOutOfRange(rating))
    }
}

/// `latest` picks the furthest completed module, else the first one.
fn resolve_module(store: &ProgressStore, target: &str) -> Option<Module> {
    if target != LATEST {
        return store.module(&ModuleId::new(target));
    }
    let modules = store.snapshot().modules;
    modules
        .iter()
        .filter(|m| m.is_completed())
        .max_by_key(|m| m.order())
        .or_else(|| modules.iter().min_by_key(|m| m.order()))
        .cloned()
}
