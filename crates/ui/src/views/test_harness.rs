use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use juggle_core::time::fixed_clock;
use services::{AppConfig, AppServices, SimulatedLatency};
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};
use crate::views::{
    AchievementsView, ArticleView, DashboardView, LoginView, ModulesView, NewsView, PracticeView,
    ProfileView, ReflectionView, SessionDetailView, WalkthroughView, use_shell_provider,
};

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Dashboard,
    Modules,
    Walkthrough(&'static str),
    Reflection(&'static str),
    Practice,
    Session(&'static str),
    News,
    Article(u64),
    Achievements,
    Profile,
    Login,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<AppServices>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    let ctx = use_context_provider(|| build_app_context(&app));
    use_shell_provider(&ctx);
    use_context_provider(|| props.view.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::Modules => rsx! { ModulesView {} },
        ViewKind::Walkthrough(id) => rsx! { WalkthroughView { id: id.to_string() } },
        ViewKind::Reflection(id) => rsx! { ReflectionView { id: id.to_string() } },
        ViewKind::Practice => rsx! { PracticeView {} },
        ViewKind::Session(id) => rsx! { SessionDetailView { id: id.to_string() } },
        ViewKind::News => rsx! { NewsView {} },
        ViewKind::Article(id) => rsx! { ArticleView { id } },
        ViewKind::Achievements => rsx! { AchievementsView {} },
        ViewKind::Profile => rsx! { ProfileView {} },
        ViewKind::Login => rsx! { LoginView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub services: Arc<AppServices>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild, then let pending resources settle.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub async fn setup_view_harness(view: ViewKind) -> ViewHarness {
    let storage = Storage::with_fixtures().expect("fixtures");
    setup_view_harness_with_storage(view, storage).await
}

pub async fn setup_view_harness_with_storage(view: ViewKind, storage: Storage) -> ViewHarness {
    let config = AppConfig {
        latency: SimulatedLatency::none(),
        ..AppConfig::default()
    };
    let services = Arc::new(
        AppServices::bootstrap(config, fixed_clock(), &storage)
            .await
            .expect("bootstrap services"),
    );
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::clone(&services),
            view,
        },
    );
    ViewHarness { dom, services }
}
