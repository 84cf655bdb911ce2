use dioxus::prelude::*;
use dioxus_router::use_navigator;
use juggle_core::model::LearningStyle;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ShellState;
use crate::views::components::Alert;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    SignIn,
    Register,
}

#[derive(Clone, Debug, Default, PartialEq)]
struct Credentials {
    name: String,
    email: String,
    password: String,
    learning_style: LearningStyle,
}

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let shell = use_context::<ShellState>();
    let navigator = use_navigator();
    let mut mode = use_signal(|| Mode::SignIn);
    let mut creds = use_signal(Credentials::default);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let ctx = ctx.clone();
        let creds = creds.read().clone();
        let mode = *mode.read();
        let mut auth_signal = shell.auth;
        auth_signal.write().loading = true;
        spawn(async move {
            let auth = ctx.auth();
            let result = match mode {
                Mode::SignIn => auth.login(&creds.email, &creds.password).await,
                Mode::Register => {
                    auth.register(&creds.name, &creds.email, &creds.password, creds.learning_style)
                        .await
                }
            };
            if result.is_ok() {
                if let Err(err) = ctx.progress().load_progress().await {
                    tracing::warn!(error = %err, "progress load after sign-in failed");
                }
                shell.refresh_auth(&ctx);
                let _ = navigator.replace(Route::Dashboard {});
            } else {
                shell.refresh_auth(&ctx);
            }
        });
    };

    let auth = shell.auth.read().clone();
    let current = creds.read().clone();
    let registering = *mode.read() == Mode::Register;
    let (title, submit_label, switch_label) = if registering {
        ("Create your account", "Register", "Already have an account? Sign in")
    } else {
        ("Welcome back", "Sign in", "New here? Create an account")
    };

    rsx! {
        div { class: "page login-page",
            form { class: "card form login-form", onsubmit: on_submit,
                h2 { class: "view-title", "{title}" }
                if let Some(message) = auth.error.as_ref() {
                    Alert { message: message.clone() }
                }
                if registering {
                    label { class: "field",
                        span { "Name" }
                        input {
                            class: "input",
                            value: "{current.name}",
                            oninput: move |evt| creds.write().name = evt.value(),
                        }
                    }
                }
                label { class: "field",
                    span { "Email" }
                    input {
                        class: "input",
                        r#type: "email",
                        value: "{current.email}",
                        oninput: move |evt| creds.write().email = evt.value(),
                    }
                }
                label { class: "field",
                    span { "Password" }
                    input {
                        class: "input",
                        r#type: "password",
                        value: "{current.password}",
                        oninput: move |evt| creds.write().password = evt.value(),
                    }
                }
                if registering {
                    label { class: "field",
                        span { "Learning style" }
                        select {
                            class: "input",
                            onchange: move |evt| {
                                if let Ok(style) = evt.value().parse::<LearningStyle>() {
                                    creds.write().learning_style = style;
                                }
                            },
                            for style in LearningStyle::ALL {
                                option {
                                    value: "{style.as_str()}",
                                    selected: style == current.learning_style,
                                    "{style}"
                                }
                            }
                        }
                    }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: auth.loading,
                    if auth.loading { "Please wait..." } else { "{submit_label}" }
                }
                button {
                    class: "btn btn-link",
                    r#type: "button",
                    onclick: move |_| {
                        let next = if registering { Mode::SignIn } else { Mode::Register };
                        mode.set(next);
                    },
                    "{switch_label}"
                }
            }
        }
    }
}
