use dioxus::prelude::*;
use dioxus_router::Link;
use juggle_core::model::NewsId;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::components::Alert;
use crate::views::news::NewsCard;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ArticleVm, map_article};

#[component]
pub fn ArticleView(id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let news = ctx.news();

    let resource = use_resource(use_reactive!(|(id,)| {
        let news = news.clone();
        async move {
            let article = news
                .news_by_id(NewsId::new(id))
                .await
                .map_err(|_| ViewError::Unknown)?
                .ok_or(ViewError::Failed("Article not found"))?;
            let articles = news.all_news().await.map_err(|_| ViewError::Unknown)?;
            Ok::<_, ViewError>(map_article(&article, &articles))
        }
    }));

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page article-page",
            Link { to: Route::News {}, "← Back to News" }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading article..." }
                },
                ViewState::Error(err) => rsx! {
                    Alert { message: err.message().to_string() }
                },
                ViewState::Ready(vm) => rsx! {
                    ArticleBody { vm }
                },
            }
        }
    }
}

#[component]
fn ArticleBody(vm: ArticleVm) -> Element {
    let card = vm.card;
    rsx! {
        article { class: "article",
            span { class: "badge", "{card.category_label}" }
            h2 { class: "view-title", "{card.title}" }
            p { class: "muted", "{card.author} · {card.date_label} · {vm.reading_label}" }
            if let Some(image) = card.image_url.as_ref() {
                img { class: "article-image", src: "{image}", alt: "" }
            }
            div { class: "article-body", dangerous_inner_html: "{vm.body_html}" }
        }
        if !vm.related.is_empty() {
            section { class: "related",
                h3 { "Related articles" }
                div { class: "news-grid",
                    for card in vm.related {
                        NewsCard { key: "{card.id}", card }
                    }
                }
            }
        }
    }
}
