use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::components::{ErrorRetry, ProgressBar};
use crate::views::{ViewError, ViewState, load_snapshot, view_state_from_resource};
use crate::vm::{AchievementGroupVm, AchievementVm, map_achievement_groups};

#[component]
pub fn AchievementsView() -> Element {
    let ctx = use_context::<AppContext>();
    let progress = ctx.progress();

    let resource = use_resource(move || {
        let progress = progress.clone();
        async move {
            let snapshot = load_snapshot(progress).await?;
            Ok::<_, ViewError>(map_achievement_groups(&snapshot.achievements))
        }
    });

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page achievements-page",
            header { class: "view-header",
                h2 { class: "view-title", "Achievements" }
                p { class: "view-subtitle", "Milestones from the practice floor and the keyboard." }
            }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading achievements..." }
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
                ViewState::Ready(groups) => rsx! {
                    for group in groups {
                        AchievementGroup { key: "{group.title}", group }
                    }
                },
            }
        }
    }
}

#[component]
fn AchievementGroup(group: AchievementGroupVm) -> Element {
    rsx! {
        section { class: "card achievement-group",
            header { class: "group-header",
                h3 { "{group.title}" }
                span { class: "muted", "{group.count_label}" }
            }
            ProgressBar { percent: group.percent }
            ul { class: "achievement-list",
                for item in group.items {
                    AchievementItem { key: "{item.id}", item }
                }
            }
        }
    }
}

#[component]
fn AchievementItem(item: AchievementVm) -> Element {
    let class = if item.unlocked { "achievement unlocked" } else { "achievement locked" };
    rsx! {
        li { class: "{class}",
            span { class: "achievement-icon", "{item.icon}" }
            div {
                p { class: "achievement-title", "{item.title}" }
                p { class: "muted", "{item.description}" }
                match item.unlocked_label.as_ref() {
                    Some(label) => rsx! {
                        p { class: "achievement-date", "Unlocked {label}" }
                    },
                    None => rsx! {
                        p { class: "achievement-date", "Locked" }
                    },
                }
            }
        }
    }
}
