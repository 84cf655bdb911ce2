use dioxus::prelude::*;
use dioxus_router::Link;
use juggle_core::model::SessionId;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::components::Alert;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{SessionDetailVm, map_session_detail};

const SESSION_NOT_FOUND: &str = "Practice session not found";

#[component]
pub fn SessionDetailView(id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let practice = ctx.practice();
    let catalog = ctx.modules();

    let resource = use_resource(use_reactive!(|(id,)| {
        let practice = practice.clone();
        let catalog = catalog.clone();
        async move {
            let session = practice
                .session_by_id(&SessionId::new(id))
                .await
                .map_err(|_| ViewError::Unknown)?
                .ok_or(ViewError::Failed(SESSION_NOT_FOUND))?;
            let module = catalog
                .module_by_id(&session.module_id)
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok::<_, ViewError>(map_session_detail(&session, module.as_ref()))
        }
    }));

    rsx! {
        div { class: "page session-page",
            Link { to: Route::Practice {}, "← Back to Practice" }
            match view_state_from_resource(resource) {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading session..." }
                },
                ViewState::Error(err) => rsx! {
                    Alert { message: err.message().to_string() }
                },
                ViewState::Ready(vm) => rsx! {
                    SessionDetail { vm }
                },
            }
        }
    }
}

#[component]
fn SessionDetail(vm: SessionDetailVm) -> Element {
    let row = vm.row;
    rsx! {
        section { class: "card session-detail",
            header { class: "view-header",
                p { class: "muted", "{row.date_label}" }
                h2 { class: "view-title", "{row.module_name}" }
                p { class: "rating-stars", "{row.rating_label}" }
            }
            dl { class: "summary",
                dt { "Duration" }
                dd { "{row.duration_label}" }
                if let Some(prop) = row.prop_label {
                    dt { "Prop" }
                    dd { "{prop}" }
                }
                for (label, value) in vm.metrics {
                    dt { key: "{label}", "{label}" }
                    dd { "{value}" }
                }
            }
            if !row.notes.is_empty() {
                p { "{row.notes}" }
            }
            Link { to: Route::Walkthrough { id: vm.module_id.clone() }, "Open module" }
        }
    }
}
