use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::components::{Alert, ErrorRetry, ProgressBar};
use crate::views::{ShellState, ViewError, ViewState, load_snapshot, view_state_from_resource};
use crate::vm::{DashboardVm, map_dashboard};

#[derive(Clone, Debug, PartialEq)]
struct DashboardData {
    vm: DashboardVm,
    error: Option<String>,
}

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let shell = use_context::<ShellState>();
    let progress = ctx.progress();

    let resource = use_resource(move || {
        let progress = progress.clone();
        let user = shell.auth.read().user.clone();
        async move {
            let snapshot = load_snapshot(progress).await?;
            Ok::<_, ViewError>(DashboardData {
                vm: map_dashboard(&snapshot, user.as_ref()),
                error: snapshot.error,
            })
        }
    });

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page dashboard-page",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading your progress..." }
                },
                ViewState::Error(err) => rsx! {
                    ErrorRetry {
                        error: err,
                        on_retry: move |()| {
                            let mut resource = resource;
                            resource.restart();
                        },
                    }
                },
                ViewState::Ready(data) => rsx! {
                    DashboardBody { vm: data.vm, error: data.error }
                },
            }
        }
    }
}

#[component]
fn DashboardBody(vm: DashboardVm, error: Option<String>) -> Element {
    rsx! {
        header { class: "view-header",
            h2 { class: "view-title", "{vm.greeting}" }
            if let Some(level) = vm.level_label.as_ref() {
                p { class: "view-subtitle", "{level}" }
            }
        }
        if let Some(message) = error {
            Alert { message }
        }
        section { class: "card overall-progress",
            h3 { "Overall progress" }
            ProgressBar { percent: vm.overall_percent }
            p { "{vm.overall_percent}% complete" }
            p { class: "muted", "{vm.modules_label}" }
            p { class: "muted", "{vm.achievements_label}" }
        }
        section { class: "card",
            h3 { "Current module" }
            match vm.active_module.as_ref() {
                Some(module) => rsx! {
                    p { class: "muted", "{module.order_label} · {module.prop_label}" }
                    h4 { "{module.name}" }
                    ProgressBar { percent: module.progress }
                    Link {
                        class: "btn btn-primary",
                        to: Route::Walkthrough { id: module.id.clone() },
                        "{module.action_label}"
                    }
                },
                None => rsx! {
                    p { "No module in progress. " }
                    Link { to: Route::Modules {}, "Browse modules" }
                },
            }
        }
        div { class: "dashboard-grid",
            section { class: "card",
                h3 { "Recent achievements" }
                if vm.recent_achievements.is_empty() {
                    p { class: "muted", "No achievements unlocked yet." }
                } else {
                    ul { class: "achievement-list",
                        for achievement in vm.recent_achievements {
                            li { key: "{achievement.id}",
                                span { class: "achievement-icon", "{achievement.icon}" }
                                span { "{achievement.title}" }
                            }
                        }
                    }
                }
                Link { to: Route::Achievements {}, "View all achievements" }
            }
            section { class: "card",
                h3 { "Recent practice" }
                if vm.recent_sessions.is_empty() {
                    p { class: "muted", "No practice sessions yet." }
                } else {
                    ul { class: "session-list",
                        for session in vm.recent_sessions {
                            li { key: "{session.id}",
                                span { class: "session-date", "{session.date_label}" }
                                span { "{session.module_name}" }
                                span { class: "muted", "{session.duration_label}" }
                            }
                        }
                    }
                }
                Link { to: Route::Practice {}, "Log a session" }
            }
        }
    }
}
