use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, Router, use_navigator};
use juggle_core::model::ThemeMode;

use crate::context::AppContext;
use crate::views::{
    AchievementsView, ArticleView, DashboardView, LoginView, ModulesView, NewsView, NotFoundView,
    PracticeView, ProfileView, ReflectionView, SessionDetailView, ShellState, WalkthroughView,
    use_shell_provider,
};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", DashboardView)] Dashboard {},
        #[route("/modules", ModulesView)] Modules {},
        #[route("/modules/:id", WalkthroughView)] Walkthrough { id: String },
        #[route("/reflection/:id", ReflectionView)] Reflection { id: String },
        #[route("/practice", PracticeView)] Practice {},
        #[route("/practice/:id", SessionDetailView)] Session { id: String },
        #[route("/news", NewsView)] News {},
        #[route("/news/:id", ArticleView)] Article { id: u64 },
        #[route("/achievements", AchievementsView)] Achievements {},
        #[route("/profile", ProfileView)] Profile {},
    #[end_layout]
    #[route("/login", LoginView)] Login {},
    #[route("/:..segments", NotFoundView)] NotFound { segments: Vec<String> },
}

#[component]
fn Layout() -> Element {
    let shell = use_context::<ShellState>();
    let authenticated = shell.auth.read().authenticated;

    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                if authenticated {
                    Outlet::<Route> {}
                } else {
                    LoginView {}
                }
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let ctx = use_context::<AppContext>();
    let shell = use_context::<ShellState>();
    let navigator = use_navigator();
    let app_name = ctx.app_name().to_string();
    let auth = shell.auth.read().clone();
    let theme = *shell.theme.read();
    let toggle_label = if theme == ThemeMode::Dark { "Light mode" } else { "Dark mode" };

    let on_toggle_theme = {
        let ctx = ctx.clone();
        move |_| {
            let service = ctx.theme();
            let mut theme_signal = shell.theme;
            spawn(async move {
                // The in-memory value flips even when saving fails.
                if let Err(err) = service.toggle().await {
                    tracing::warn!(error = %err, "theme preference not saved");
                }
                theme_signal.set(service.current());
            });
        }
    };

    let on_logout = move |_| {
        let ctx = ctx.clone();
        spawn(async move {
            let auth = ctx.auth();
            let progress = ctx.progress();
            if auth.logout().await.is_ok() {
                if let Err(err) = progress.load_progress().await {
                    tracing::warn!(error = %err, "progress reset after logout failed");
                }
                let _ = navigator.replace(Route::Login {});
            }
            shell.refresh_auth(&ctx);
        });
    };

    rsx! {
        nav { class: "sidebar",
            h1 { class: "sidebar-title", "{app_name}" }
            if let Some(user) = auth.user.as_ref() {
                div { class: "sidebar-user",
                    span { class: "avatar", "{user.initial()}" }
                    div {
                        p { class: "sidebar-user-name", "{user.name()}" }
                        p { class: "sidebar-user-level", "Level {user.level()}" }
                    }
                }
            }
            ul {
                li { Link { to: Route::Dashboard {}, "Dashboard" } }
                li { Link { to: Route::Modules {}, "Modules" } }
                li { Link { to: Route::Practice {}, "Practice" } }
                li { Link { to: Route::Achievements {}, "Achievements" } }
                li { Link { to: Route::News {}, "News" } }
                li { Link { to: Route::Profile {}, "Profile" } }
            }
            div { class: "sidebar-footer",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: on_toggle_theme,
                    "{toggle_label}"
                }
                if auth.authenticated {
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        disabled: auth.loading,
                        onclick: on_logout,
                        "Sign out"
                    }
                }
            }
        }
    }
}

/// Root-level wrapper that provides shell state and applies the theme class.
#[component]
pub fn Shell() -> Element {
    let ctx = use_context::<AppContext>();
    let shell = use_shell_provider(&ctx);
    let theme_class = shell.theme.read().css_class();

    rsx! {
        div { class: "app-root {theme_class}",
            Router::<Route> {}
        }
    }
}
