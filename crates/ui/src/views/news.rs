use dioxus::prelude::*;
use dioxus_router::Link;
use juggle_core::model::NewsCategory;
use services::NewsFilter;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::components::ErrorRetry;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{NewsCardVm, map_news_cards};

#[component]
pub fn NewsView() -> Element {
    let ctx = use_context::<AppContext>();
    let news = ctx.news();
    let mut filter = use_signal(NewsFilter::default);

    let resource = use_resource(move || {
        let news = news.clone();
        async move { news.all_news().await.map_err(|_| ViewError::Unknown) }
    });

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page news-page",
            header { class: "view-header",
                h2 { class: "view-title", "News & Insights" }
                p { class: "view-subtitle", "Stories connecting juggling, the brain, and technology." }
            }
            div { class: "filters",
                input {
                    class: "input",
                    r#type: "search",
                    placeholder: "Search articles",
                    value: "{filter.read().query}",
                    oninput: move |evt| filter.write().query = evt.value(),
                }
                select {
                    class: "input",
                    onchange: move |evt| filter.write().category = NewsCategory::from_key(&evt.value()),
                    option { value: "", "All categories" }
                    for category in NewsCategory::ALL {
                        option { value: "{category.key()}", "{category.label()}" }
                    }
                }
            }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading news..." }
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
                ViewState::Ready(articles) => {
                    let cards = map_news_cards(&filter.read().apply(&articles));
                    rsx! {
                        if cards.is_empty() {
                            p { class: "muted", "No articles match your search." }
                        } else {
                            div { class: "news-grid",
                                for card in cards {
                                    NewsCard { key: "{card.id}", card }
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
pub fn NewsCard(card: NewsCardVm) -> Element {
    rsx! {
        article { class: "card news-card",
            if let Some(image) = card.image_url.as_ref() {
                img { class: "news-image", src: "{image}", alt: "" }
            }
            span { class: "badge", "{card.category_label}" }
            h3 {
                Link { to: Route::Article { id: card.id }, "{card.title}" }
            }
            p { class: "muted", "{card.author} · {card.date_label}" }
            p { "{card.summary}" }
        }
    }
}
