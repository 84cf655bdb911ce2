use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error type for parsing an ID from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: &'static str,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

// Slug-style identifiers ("module-2", "achievement-module-2-complete") travel as
// plain strings on the wire; these wrappers keep them from being mixed up.
macro_rules! slug_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(ParseIdError {
                        kind: stringify!($name),
                    });
                }
                Ok(Self(trimmed.to_string()))
            }
        }
    };
}

slug_id!(
    /// Unique identifier for a learning Module
    ModuleId
);
slug_id!(
    /// Unique identifier for an Achievement
    AchievementId
);
slug_id!(
    /// Unique identifier for a recorded PracticeSession
    SessionId
);
slug_id!(
    /// Unique identifier for the User
    UserId
);

impl AchievementId {
    /// The achievement a module's reflection flow unlocks on submit.
    #[must_use]
    pub fn module_completion(module_id: &ModuleId) -> Self {
        Self(format!("achievement-{module_id}-complete"))
    }
}

impl SessionId {
    /// Session ids are synthesized from the creation time in unix milliseconds.
    #[must_use]
    pub fn from_millis(millis: i64) -> Self {
        Self(format!("session-{millis}"))
    }
}

/// Unique identifier for a News article
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewsId(u64);

impl NewsId {
    /// Creates a new `NewsId`
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying u64 value
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for NewsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NewsId({})", self.0)
    }
}

impl fmt::Display for NewsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NewsId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(NewsId::new)
            .map_err(|_| ParseIdError { kind: "NewsId" })
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
