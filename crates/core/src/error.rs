use thiserror::Error;

use crate::model::{ModuleError, PracticeSessionError, UserError};

/// Any domain validation failure.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Module(#[from] ModuleError),
    #[error(transparent)]
    PracticeSession(#[from] PracticeSessionError),
    #[error(transparent)]
    User(#[from] UserError),
}
