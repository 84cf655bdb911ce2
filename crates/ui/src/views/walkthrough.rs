use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use juggle_core::model::{Module, ModuleId};
use services::{StepAdvance, Walkthrough, WalkthroughError, WalkthroughStep};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::components::{Alert, ProgressBar};
use crate::views::{ViewError, ViewState, load_snapshot, view_state_from_resource};
use crate::vm::map_session_rows;

#[component]
pub fn WalkthroughView(id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let progress = ctx.progress();
    let mut walk = use_signal(|| None::<Walkthrough>);
    let mut saving = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    let resource = {
        let progress = progress.clone();
        use_resource(use_reactive!(|(id,)| {
            let progress = progress.clone();
            async move {
                load_snapshot(progress.clone()).await?;
                let opened = Walkthrough::open(&progress, &ModuleId::new(id))
                    .map_err(|err| match err {
                        WalkthroughError::Locked(_) => ViewError::Locked,
                        _ => ViewError::NotFound,
                    })?;
                walk.set(Some(opened));
                Ok::<_, ViewError>(())
            }
        }))
    };

    let on_continue = move |_| {
        let Some(mut current) = walk() else {
            return;
        };
        let progress = progress.clone();
        spawn(async move {
            saving.set(true);
            error.set(None);
            match current.advance_and_persist(&progress).await {
                Ok((advance, _)) => {
                    let module_id = current.module().id().as_str().to_string();
                    walk.set(Some(current));
                    if advance == StepAdvance::Reflection {
                        let _ = navigator.push(Route::Reflection { id: module_id });
                    }
                }
                Err(_) => error.set(progress.snapshot().error),
            }
            saving.set(false);
        });
    };

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page walkthrough-page",
            match (state, walk()) {
                (ViewState::Error(err), _) => rsx! {
                    Alert { message: err.message().to_string() }
                    Link { to: Route::Modules {}, "Back to modules" }
                },
                (ViewState::Ready(()), Some(current)) => {
                    let module = current.module().clone();
                    let step = current.current();
                    let description = step.description(&module);
                    let continue_label = if step.is_final() { "Start Reflection" } else { "Continue" };
                    rsx! {
                        header { class: "view-header",
                            p { class: "muted", "Module {module.order()} · {module.prop().label()}" }
                            h2 { class: "view-title", "{module.name()}" }
                            p { class: "view-subtitle", "{module.description()}" }
                        }
                        ProgressBar { percent: module.progress() }
                        p { class: "muted", "{module.progress()}% complete" }
                        if let Some(message) = error() {
                            Alert { message }
                        }
                        ol { class: "stepper",
                            for candidate in WalkthroughStep::ALL {
                                li {
                                    key: "{candidate.index()}",
                                    class: step_class(&current, candidate),
                                    "{candidate.title()}"
                                }
                            }
                        }
                        section { class: "card step-card",
                            h3 { "{step.title()}" }
                            p { "{description}" }
                            StepDetails { step, module: module.clone() }
                        }
                        div { class: "step-actions",
                            button {
                                class: "btn btn-secondary",
                                r#type: "button",
                                disabled: !current.can_go_back() || saving(),
                                onclick: move |_| {
                                    if let Some(mut current) = walk() {
                                        current.back();
                                        walk.set(Some(current));
                                    }
                                },
                                "Back"
                            }
                            button {
                                class: "btn btn-primary",
                                r#type: "button",
                                disabled: saving(),
                                onclick: on_continue,
                                if saving() { "Saving..." } else { "{continue_label}" }
                            }
                        }
                        PracticeLog { module_id: module.id().as_str().to_string() }
                    }
                }
                _ => rsx! {
                    p { "Loading module..." }
                },
            }
        }
    }
}

fn step_class(walk: &Walkthrough, step: WalkthroughStep) -> &'static str {
    if walk.current() == step {
        "step step--current"
    } else if walk.is_completed(step) {
        "step step--done"
    } else {
        "step"
    }
}

/// Sessions logged against one module, newest first.
#[component]
fn PracticeLog(module_id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let practice = ctx.practice();
    let progress = ctx.progress();

    let resource = use_resource(use_reactive!(|(module_id,)| {
        let practice = practice.clone();
        let progress = progress.clone();
        async move {
            let sessions = practice
                .sessions_for_module(&ModuleId::new(module_id))
                .await
                .map_err(|err| {
                    tracing::warn!(error = %err, "failed to load module practice log");
                    ViewError::load_failed()
                })?;
            Ok::<_, ViewError>(map_session_rows(&sessions, &progress.snapshot().modules))
        }
    }));

    rsx! {
        section { class: "card practice-log",
            h3 { "Practice log" }
            match view_state_from_resource(resource) {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "muted", "Loading practice log..." }
                },
                ViewState::Error(err) => rsx! {
                    Alert { message: err.message().to_string() }
                },
                ViewState::Ready(rows) if rows.is_empty() => rsx! {
                    p { class: "muted", "No practice logged for this module yet." }
                },
                ViewState::Ready(rows) => rsx! {
                    p { class: "muted", "{rows.len()} sessions logged" }
                    ul { class: "session-list",
                        for row in rows {
                            li { key: "{row.id}",
                                Link { to: Route::Session { id: row.id.clone() }, "{row.date_label}" }
                                span { " · {row.duration_label} · {row.rating_label}" }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn StepDetails(step: WalkthroughStep, module: Module) -> Element {
    let info = module.info().clone();
    match step {
        WalkthroughStep::Introduction => rsx! {
            dl { class: "summary",
                dt { "Juggling practice" }
                dd { "{info.time_estimate.juggling}" }
                dt { "Technology work" }
                dd { "{info.time_estimate.tech}" }
            }
        },
        WalkthroughStep::TechnologyConcepts => rsx! {
            ul {
                for tech in info.technologies {
                    li { key: "{tech}", "{tech}" }
                }
            }
        },
        WalkthroughStep::HandsOnProject => rsx! {
            if let Some(tie_in) = info.tie_in {
                p { class: "tie-in", "{tie_in}" }
            }
        },
        WalkthroughStep::ReflectionAssessment => rsx! {
            if let Some(prompt) = info.reflection_prompt {
                blockquote { "{prompt}" }
            }
        },
        WalkthroughStep::JugglingTechniques => rsx! {},
    }
}
