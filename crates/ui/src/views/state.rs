use std::sync::Arc;

use dioxus::prelude::*;
use juggle_core::model::ThemeMode;
use services::progress::LOAD_FAILED;
use services::{AuthSnapshot, LoadPhase, ProgressSnapshot, ProgressStore};

use crate::context::AppContext;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    NotFound,
    Locked,
    /// A store failure; carries the store's message.
    Failed(&'static str),
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::Unknown => "Something went wrong. Please try again.",
            ViewError::NotFound => "Module not found",
            ViewError::Locked => "This module is locked. Complete previous modules to unlock it.",
            ViewError::Failed(message) => message,
        }
    }

    #[must_use]
    pub fn load_failed() -> Self {
        ViewError::Failed(LOAD_FAILED)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

/// Shell-wide reactive copies of the auth snapshot and theme.
#[derive(Clone, Copy, PartialEq)]
pub struct ShellState {
    pub auth: Signal<AuthSnapshot>,
    pub theme: Signal<ThemeMode>,
}

impl ShellState {
    /// Re-read the auth store after a sign-in, sign-out, or profile change.
    pub fn refresh_auth(mut self, ctx: &AppContext) {
        self.auth.set(ctx.auth().snapshot());
    }
}

/// Provide `ShellState` to the subtree; call once near the root.
pub fn use_shell_provider(ctx: &AppContext) -> ShellState {
    let auth = ctx.auth();
    let theme = ctx.theme();
    use_context_provider(move || ShellState {
        auth: Signal::new(auth.snapshot()),
        theme: Signal::new(theme.current()),
    })
}

/// Load progress on first use, then return the current snapshot.
///
/// # Errors
///
/// Returns `ViewError::Failed` with the store's load message when loading fails.
pub async fn load_snapshot(progress: Arc<ProgressStore>) -> Result<ProgressSnapshot, ViewError> {
    if progress.snapshot().phase == LoadPhase::Idle {
        progress
            .load_progress()
            .await
            .map_err(|_| ViewError::load_failed())?;
    }
    Ok(progress.snapshot())
}
