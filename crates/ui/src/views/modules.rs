use dioxus::prelude::*;
use dioxus_router::Link;
use juggle_core::model::{JugglingProp, ModuleStatus};
use services::ModuleFilter;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::components::{ErrorRetry, ProgressBar};
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ModuleCardVm, map_module_cards};

const STATUSES: [ModuleStatus; 3] = [
    ModuleStatus::Locked,
    ModuleStatus::InProgress,
    ModuleStatus::Completed,
];

#[component]
pub fn ModulesView() -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.modules();
    let mut filter = use_signal(ModuleFilter::default);

    let resource = use_resource(move || {
        let catalog = catalog.clone();
        let filter = filter.read().clone();
        async move {
            catalog
                .filter(&filter)
                .await
                .map_err(|_| ViewError::load_failed())
        }
    });

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page modules-page",
            header { class: "view-header",
                h2 { class: "view-title", "Learning Modules" }
                p { class: "view-subtitle", "Each module pairs a juggling prop with a cloud technology theme." }
            }
            div { class: "filters",
                input {
                    class: "input",
                    r#type: "search",
                    placeholder: "Search modules",
                    value: "{filter.read().query}",
                    oninput: move |evt| filter.write().query = evt.value(),
                }
                select {
                    class: "input",
                    onchange: move |evt| filter.write().prop = evt.value().parse::<JugglingProp>().ok(),
                    option { value: "", "All props" }
                    for prop in JugglingProp::ALL {
                        option { value: "{prop.as_str()}", "{prop.label()}" }
                    }
                }
                select {
                    class: "input",
                    onchange: move |evt| filter.write().status = evt.value().parse::<ModuleStatus>().ok(),
                    option { value: "", "All statuses" }
                    for status in STATUSES {
                        option { value: "{status.as_str()}", "{status.label()}" }
                    }
                }
            }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading modules..." }
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
                ViewState::Ready(modules) => {
                    let cards = map_module_cards(&modules);
                    rsx! {
                        if cards.is_empty() {
                            p { class: "muted", "No modules match those filters." }
                        } else {
                            div { class: "module-grid",
                                for card in cards {
                                    ModuleCard { key: "{card.id}", card }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ModuleCard(card: ModuleCardVm) -> Element {
    rsx! {
        article { class: if card.locked { "card module-card module-card--locked" } else { "card module-card" },
            div { class: "module-card-header",
                span { class: "muted", "{card.order_label}" }
                span { class: "{card.status_class}", "{card.status_label}" }
            }
            h3 { "{card.name}" }
            p { "{card.description}" }
            p { class: "muted", "{card.prop_label} · {card.tech_theme}" }
            ProgressBar { percent: card.progress }
            span { class: "muted", "{card.progress_label}" }
            if card.locked {
                button { class: "btn btn-secondary", r#type: "button", disabled: true, "Locked" }
            } else {
                Link {
                    class: "btn btn-primary",
                    to: Route::Walkthrough { id: card.id.clone() },
                    "{card.action_label}"
                }
            }
        }
    }
}
