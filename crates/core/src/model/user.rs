use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::UserId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UserError {
    #[error("display name cannot be empty")]
    EmptyName,
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
    #[error("unknown learning style: {0}")]
    UnknownLearningStyle(String),
}

/// Self-reported learning style (Honey & Mumford categories).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LearningStyle {
    Activist,
    #[default]
    Reflector,
    Theorist,
    Pragmatist,
}

impl LearningStyle {
    pub const ALL: [LearningStyle; 4] = [
        LearningStyle::Activist,
        LearningStyle::Reflector,
        LearningStyle::Theorist,
        LearningStyle::Pragmatist,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LearningStyle::Activist => "Activist",
            LearningStyle::Reflector => "Reflector",
            LearningStyle::Theorist => "Theorist",
            LearningStyle::Pragmatist => "Pragmatist",
        }
    }
}

impl fmt::Display for LearningStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LearningStyle {
    type Err = UserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LearningStyle::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UserError::UnknownLearningStyle(s.to_string()))
    }
}

/// The single learner this application represents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    avatar: Option<String>,
    learning_style: LearningStyle,
    level: u32,
}

impl User {
    /// # Errors
    ///
    /// Returns `UserError` if the name is blank or the email is malformed.
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        avatar: Option<String>,
        learning_style: LearningStyle,
        level: u32,
    ) -> Result<Self, UserError> {
        let name = validate_name(name.into())?;
        let email = validate_email(email.into())?;
        Ok(Self {
            id,
            name,
            email,
            avatar: normalize_optional(avatar),
            learning_style,
            level,
        })
    }

    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }

    #[must_use]
    pub fn learning_style(&self) -> LearningStyle {
        self.learning_style
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// First letter of the display name, for avatar placeholders.
    #[must_use]
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map_or_else(|| "?".to_string(), |ch| ch.to_uppercase().to_string())
    }

    /// Merge a profile update into this user. Fields left `None` are kept.
    ///
    /// # Errors
    ///
    /// Returns `UserError` if a provided field fails validation; the user is
    /// left unchanged in that case.
    pub fn apply(&mut self, update: ProfileUpdate) -> Result<(), UserError> {
        let name = update.name.map(validate_name).transpose()?;
        let email = update.email.map(validate_email).transpose()?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(style) = update.learning_style {
            self.learning_style = style;
        }
        if let Some(avatar) = update.avatar {
            self.avatar = normalize_optional(Some(avatar));
        }
        Ok(())
    }
}

/// Partial profile edit from the profile form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub learning_style: Option<LearningStyle>,
    pub avatar: Option<String>,
}

fn validate_name(raw: String) -> Result<String, UserError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(UserError::EmptyName);
    }
    Ok(trimmed.to_string())
}

fn validate_email(raw: String) -> Result<String, UserError> {
    let trimmed = raw.trim();
    let valid = trimmed
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
    if !valid {
        return Err(UserError::InvalidEmail(raw));
    }
    Ok(trimmed.to_string())
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}
