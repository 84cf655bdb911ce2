use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{ModuleId, SessionId};
use crate::model::module::JugglingProp;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PracticeSessionError {
    #[error("session rating must be between 1 and 5 (got {0})")]
    InvalidRating(u8),

    #[error("session duration must be > 0 minutes")]
    EmptyDuration,

    #[error("session duration must be at most {MAX_SESSION_MINUTES} minutes (got {0})")]
    DurationTooLong(u32),

    #[error("consistency must be within [0, 1]")]
    InvalidConsistency,
}

/// One practice session cannot run longer than a day.
pub const MAX_SESSION_MINUTES: u32 = 24 * 60;

//
// ─── RATING ───────────────────────────────────────────────────────────────────
//

/// Self-assessed session quality on a 1-5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SessionRating(u8);

impl SessionRating {
    /// # Errors
    ///
    /// Returns `PracticeSessionError::InvalidRating` outside 1..=5.
    pub fn new(value: u8) -> Result<Self, PracticeSessionError> {
        if (1..=5).contains(&value) {
            Ok(Self(value))
        } else {
            Err(PracticeSessionError::InvalidRating(value))
        }
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for SessionRating {
    type Error = PracticeSessionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SessionRating> for u8 {
    fn from(rating: SessionRating) -> Self {
        rating.0
    }
}

//
// ─── SESSION ──────────────────────────────────────────────────────────────────
//

/// Optional measurements captured during a practice session.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PracticeMetrics {
    pub drops: Option<u32>,
    pub longest_streak_secs: Option<u32>,
    pub catches: Option<u32>,
    /// Fraction in [0, 1].
    pub consistency: Option<f32>,
}

/// A recorded practice session. Append-only: never edited after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct PracticeSession {
    pub id: SessionId,
    pub module_id: ModuleId,
    pub date: DateTime<Utc>,
    pub duration_minutes: u32,
    pub notes: String,
    pub rating: SessionRating,
    pub prop: Option<JugglingProp>,
    pub metrics: PracticeMetrics,
}

/// User-supplied fields of a new session; id and date are assigned on commit.
#[derive(Debug, Clone, PartialEq)]
pub struct PracticeSessionDraft {
    pub module_id: ModuleId,
    pub duration_minutes: u32,
    pub notes: String,
    pub rating: u8,
    pub prop: Option<JugglingProp>,
    pub metrics: PracticeMetrics,
}

impl PracticeSessionDraft {
    #[must_use]
    pub fn new(module_id: ModuleId, duration_minutes: u32, rating: u8) -> Self {
        Self {
            module_id,
            duration_minutes,
            notes: String::new(),
            rating,
            prop: None,
            metrics: PracticeMetrics::default(),
        }
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    #[must_use]
    pub fn with_prop(mut self, prop: JugglingProp) -> Self {
        self.prop = Some(prop);
        self
    }

    #[must_use]
    pub fn with_metrics(mut self, metrics: PracticeMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Validate the draft and stamp it with an id and date.
    ///
    /// # Errors
    ///
    /// Returns `PracticeSessionError` for an out-of-range rating, a zero
    /// duration, or a consistency outside [0, 1].
    pub fn validate(
        self,
        id: SessionId,
        date: DateTime<Utc>,
    ) -> Result<PracticeSession, PracticeSessionError> {
        let rating = SessionRating::new(self.rating)?;
        if self.duration_minutes == 0 {
            return Err(PracticeSessionError::EmptyDuration);
        }
        if self.duration_minutes > MAX_SESSION_MINUTES {
            return Err(PracticeSessionError::DurationTooLong(self.duration_minutes));
        }
        if let Some(c) = self.metrics.consistency {
            if !c.is_finite() || !(0.0..=1.0).contains(&c) {
                return Err(PracticeSessionError::InvalidConsistency);
            }
        }

        Ok(PracticeSession {
            id,
            module_id: self.module_id,
            date,
            duration_minutes: self.duration_minutes,
            notes: self.notes.trim().to_string(),
            rating,
            prop: self.prop,
            metrics: self.metrics,
        })
    }
}
