use dioxus::prelude::*;
use dioxus_router::Link;
use juggle_core::model::{JugglingProp, Module};
use services::{PracticeStats, ProgressSnapshot};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::components::{Alert, ErrorRetry};
use crate::views::{ViewState, load_snapshot, view_state_from_resource};
use crate::vm::{
    PracticeForm, PracticeFormErrors, PracticeStatsVm, SessionRowVm, map_session_rows,
    validate_practice_form,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SaveState {
    Idle,
    Saving,
    Saved,
    /// Recorded locally, but the backend rejected it.
    SavedUnsynced,
}

#[component]
pub fn PracticeView() -> Element {
    let ctx = use_context::<AppContext>();
    let progress = ctx.progress();
    let prop_filter = use_signal(|| None::<JugglingProp>);

    let resource = {
        let progress = progress.clone();
        use_resource(move || {
            let progress = progress.clone();
            async move { load_snapshot(progress).await }
        })
    };

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page practice-page",
            header { class: "view-header",
                h2 { class: "view-title", "Practice" }
                p { class: "view-subtitle", "Log your juggling sessions and watch your streaks grow." }
            }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading practice sessions..." }
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
                ViewState::Ready(snapshot) => rsx! {
                    PracticeBody {
                        snapshot,
                        prop_filter,
                        on_recorded: move |()| {
                            let mut resource = resource;
                            resource.restart();
                        },
                    }
                },
            }
        }
    }
}

#[component]
fn PracticeBody(
    snapshot: ProgressSnapshot,
    prop_filter: Signal<Option<JugglingProp>>,
    on_recorded: EventHandler<()>,
) -> Element {
    let mut prop_filter = prop_filter;
    let stats = PracticeStatsVm::from(&PracticeStats::compute(&snapshot.sessions, prop_filter()));
    let rows = map_session_rows(&snapshot.sessions, &snapshot.modules);
    let unlocked: Vec<Module> = snapshot
        .modules
        .iter()
        .filter(|m| m.is_unlocked())
        .cloned()
        .collect();

    rsx! {
        if let Some(message) = snapshot.error.clone() {
            Alert { message }
        }
        section { class: "card practice-stats",
            div { class: "card-header",
                h3 { "Your stats" }
                select {
                    class: "input",
                    onchange: move |evt| prop_filter.set(evt.value().parse::<JugglingProp>().ok()),
                    option { value: "", "All props" }
                    for prop in JugglingProp::ALL {
                        option { value: "{prop.as_str()}", "{prop.label()}" }
                    }
                }
            }
            dl { class: "summary",
                dt { "Sessions" }
                dd { "{stats.sessions_label}" }
                dt { "Total time" }
                dd { "{stats.total_minutes_label}" }
                dt { "Average session" }
                dd { "{stats.average_label}" }
                dt { "Longest streak" }
                dd { "{stats.streak_label}" }
                dt { "Total catches" }
                dd { "{stats.catches_label}" }
                dt { "Average rating" }
                dd { "{stats.rating_label}" }
            }
        }
        RecordSessionForm { modules: unlocked, on_recorded }
        section { class: "card",
            h3 { "Session history" }
            if rows.is_empty() {
                p { class: "muted", "No practice sessions yet." }
            } else {
                ul { class: "session-list",
                    for row in rows {
                        SessionRow { key: "{row.id}", row }
                    }
                }
            }
        }
    }
}

#[component]
fn SessionRow(row: SessionRowVm) -> Element {
    rsx! {
        li { class: "session-row",
            div { class: "session-row-header",
                Link { class: "session-date", to: Route::Session { id: row.id.clone() }, "{row.date_label}" }
                span { "{row.module_name}" }
                span { class: "rating-stars", "{row.rating_label}" }
            }
            p { class: "muted",
                "{row.duration_label}"
                if let Some(prop) = row.prop_label {
                    " · {prop}"
                }
                if let Some(streak) = row.streak_label.as_ref() {
                    " · {streak}"
                }
            }
            if !row.notes.is_empty() {
                p { "{row.notes}" }
            }
        }
    }
}

#[component]
fn RecordSessionForm(modules: Vec<Module>, on_recorded: EventHandler<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let default_module = modules
        .iter()
        .find(|m| !m.is_completed())
        .or(modules.first())
        .map(|m| m.id().as_str().to_string())
        .unwrap_or_default();
    let mut form = use_signal(|| PracticeForm::for_module(&default_module));
    let mut errors = use_signal(PracticeFormErrors::default);
    let mut save_state = use_signal(|| SaveState::Idle);

    let on_save = move |_| {
        let draft = match validate_practice_form(&form()) {
            Ok(draft) => draft,
            Err(next) => {
                errors.set(next);
                return;
            }
        };
        errors.set(PracticeFormErrors::default());
        let progress = ctx.progress();
        let practice = ctx.practice();
        spawn(async move {
            save_state.set(SaveState::Saving);
            match progress.add_practice_session(draft).await {
                Ok(session) => {
                    let synced = !practice.can_publish() || practice.publish(&session).await.is_ok();
                    save_state.set(if synced { SaveState::Saved } else { SaveState::SavedUnsynced });
                    let module_id = form.read().module_id.clone();
                    form.set(PracticeForm::for_module(&module_id));
                    on_recorded.call(());
                }
                // The store keeps the failure message; the list re-renders it.
                Err(_) => {
                    save_state.set(SaveState::Idle);
                    on_recorded.call(());
                }
            }
        });
    };

    let current = form();
    let field_errors = errors();

    rsx! {
        section { class: "card record-session",
            h3 { "Record a session" }
            match save_state() {
                SaveState::Saved => rsx! {
                    p { class: "notice", "Session saved." }
                },
                SaveState::SavedUnsynced => rsx! {
                    p { class: "notice", "Session saved locally; it could not be sent to the server." }
                },
                _ => rsx! {},
            }
            label { class: "field",
                span { "Module" }
                select {
                    class: "input",
                    value: "{current.module_id}",
                    onchange: move |evt| form.write().module_id = evt.value(),
                    for module in modules {
                        option { key: "{module.id()}", value: "{module.id()}", "{module.name()}" }
                    }
                }
                if let Some(message) = field_errors.module {
                    span { class: "field-error", "{message}" }
                }
            }
            label { class: "field",
                span { "Duration (minutes)" }
                input {
                    class: "input",
                    r#type: "number",
                    min: "1",
                    value: "{current.duration}",
                    oninput: move |evt| form.write().duration = evt.value(),
                }
                if let Some(message) = field_errors.duration {
                    span { class: "field-error", "{message}" }
                }
            }
            label { class: "field",
                span { "Rating (1-5)" }
                input {
                    class: "input",
                    r#type: "number",
                    min: "1",
                    max: "5",
                    value: "{current.rating}",
                    oninput: move |evt| form.write().rating = evt.value(),
                }
                if let Some(message) = field_errors.rating {
                    span { class: "field-error", "{message}" }
                }
            }
            label { class: "field",
                span { "Prop" }
                select {
                    class: "input",
                    value: "{current.prop}",
                    onchange: move |evt| form.write().prop = evt.value(),
                    option { value: "", "Not specified" }
                    for prop in JugglingProp::ALL {
                        option { value: "{prop.as_str()}", "{prop.label()}" }
                    }
                }
            }
            div { class: "field-row",
                label { class: "field",
                    span { "Catches" }
                    input {
                        class: "input",
                        r#type: "number",
                        value: "{current.catches}",
                        oninput: move |evt| form.write().catches = evt.value(),
                    }
                }
                label { class: "field",
                    span { "Drops" }
                    input {
                        class: "input",
                        r#type: "number",
                        value: "{current.drops}",
                        oninput: move |evt| form.write().drops = evt.value(),
                    }
                }
                label { class: "field",
                    span { "Longest streak (s)" }
                    input {
                        class: "input",
                        r#type: "number",
                        value: "{current.longest_streak}",
                        oninput: move |evt| form.write().longest_streak = evt.value(),
                    }
                }
            }
            if let Some(message) = field_errors.metrics {
                span { class: "field-error", "{message}" }
            }
            label { class: "field",
                span { "Notes" }
                textarea {
                    class: "input",
                    value: "{current.notes}",
                    oninput: move |evt| form.write().notes = evt.value(),
                }
            }
            button {
                class: "btn btn-primary",
                r#type: "button",
                disabled: save_state() == SaveState::Saving,
                onclick: on_save,
                if save_state() == SaveState::Saving { "Saving..." } else { "Save Session" }
            }
        }
    }
}
