use dioxus::prelude::*;
use juggle_core::model::LearningStyle;

use crate::context::AppContext;
use crate::views::components::Alert;
use crate::views::{ShellState, ViewError, ViewState, view_state_from_resource};
use crate::vm::ProfileForm;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SaveState {
    Idle,
    Saving,
    Saved,
}

/// Prefills from the user service, so a configured API's profile wins.
#[component]
pub fn ProfileView() -> Element {
    let ctx = use_context::<AppContext>();
    let shell = use_context::<ShellState>();
    let users = ctx.users();

    let resource = use_resource(move || {
        let users = users.clone();
        let signed_in = shell.auth.read().user.clone();
        async move {
            let Some(signed_in) = signed_in else {
                return Ok::<_, ViewError>(None);
            };
            let profile = match users.current_user().await {
                Ok(Some(user)) if user.id() == signed_in.id() => user,
                Ok(_) => signed_in,
                Err(err) => {
                    tracing::warn!(error = %err, "profile lookup failed, using session user");
                    signed_in
                }
            };
            Ok(Some(profile))
        }
    });

    match view_state_from_resource(resource) {
        ViewState::Ready(Some(user)) => rsx! {
            ProfileEditor { key: "{user.id()}", form: ProfileForm::from_user(&user) }
        },
        ViewState::Ready(None) => rsx! {
            div { class: "page profile-page",
                Alert { message: "Sign in to edit your profile.".to_string() }
            }
        },
        ViewState::Error(err) => rsx! {
            div { class: "page profile-page",
                Alert { message: err.message().to_string() }
            }
        },
        ViewState::Idle | ViewState::Loading => rsx! {
            div { class: "page profile-page",
                p { "Loading profile..." }
            }
        },
    }
}

#[component]
fn ProfileEditor(form: ProfileForm) -> Element {
    let ctx = use_context::<AppContext>();
    let shell = use_context::<ShellState>();
    let mut form = use_signal(move || form);
    let mut save_state = use_signal(|| SaveState::Idle);
    let mut error = use_signal(|| None::<String>);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let ctx = ctx.clone();
        let Some(user) = shell.auth.read().user.clone() else {
            return;
        };
        let update = form.read().changes_from(&user);
        save_state.set(SaveState::Saving);
        error.set(None);
        spawn(async move {
            let auth = ctx.auth();
            match auth.update_profile(update).await {
                Ok(_) => save_state.set(SaveState::Saved),
                Err(err) => {
                    tracing::warn!(error = %err, "profile update failed");
                    error.set(auth.snapshot().error);
                    save_state.set(SaveState::Idle);
                }
            }
            shell.refresh_auth(&ctx);
        });
    };

    let current = form.read().clone();
    let saving = *save_state.read() == SaveState::Saving;

    rsx! {
        div { class: "page profile-page",
            header { class: "view-header",
                h2 { class: "view-title", "Profile" }
                p { class: "view-subtitle", "How you learn shapes how the modules are presented." }
            }
            if let Some(message) = error.read().as_ref() {
                Alert { message: message.clone() }
            }
            if *save_state.read() == SaveState::Saved {
                p { class: "notice", "Profile saved." }
            }
            form { class: "card form", onsubmit: on_submit,
                label { class: "field",
                    span { "Name" }
                    input {
                        class: "input",
                        value: "{current.name}",
                        oninput: move |evt| form.write().name = evt.value(),
                    }
                }
                label { class: "field",
                    span { "Email" }
                    input {
                        class: "input",
                        r#type: "email",
                        value: "{current.email}",
                        oninput: move |evt| form.write().email = evt.value(),
                    }
                }
                label { class: "field",
                    span { "Learning style" }
                    select {
                        class: "input",
                        value: "{current.learning_style}",
                        onchange: move |evt| form.write().learning_style = evt.value(),
                        for style in LearningStyle::ALL {
                            option {
                                value: "{style.as_str()}",
                                selected: style.as_str() == current.learning_style,
                                "{style}"
                            }
                        }
                    }
                }
                label { class: "field",
                    span { "Avatar URL" }
                    input {
                        class: "input",
                        value: "{current.avatar}",
                        oninput: move |evt| form.write().avatar = evt.value(),
                    }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: saving,
                    if saving { "Saving..." } else { "Save profile" }
                }
            }
        }
    }
}
