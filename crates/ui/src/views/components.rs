use dioxus::prelude::*;

use crate::views::ViewError;

#[component]
pub fn Alert(message: String) -> Element {
    rsx! {
        div { class: "alert alert-error", role: "alert", "{message}" }
    }
}

#[component]
pub fn ProgressBar(percent: u8) -> Element {
    rsx! {
        div { class: "progress-bar",
            div { class: "progress-bar-fill", style: "width: {percent}%;" }
        }
    }
}

#[component]
pub fn ErrorRetry(error: ViewError, on_retry: EventHandler<()>) -> Element {
    rsx! {
        Alert { message: error.message().to_string() }
        button {
            class: "btn btn-secondary",
            r#type: "button",
            onclick: move |_| on_retry.call(()),
            "Retry"
        }
    }
}
