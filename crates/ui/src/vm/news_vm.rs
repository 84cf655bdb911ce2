use juggle_core::model::NewsArticle;

use crate::vm::markdown_vm::{markdown_to_html, reading_minutes};
use crate::vm::time_fmt::format_day;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewsCardVm {
    pub id: u64,
    pub title: String,
    pub category_label: &'static str,
    pub author: String,
    pub date_label: String,
    pub summary: String,
    pub image_url: Option<String>,
}

impl From<&NewsArticle> for NewsCardVm {
    fn from(article: &NewsArticle) -> Self {
        Self {
            id: article.id.value(),
            title: article.title.clone(),
            category_label: article.category.label(),
            author: article.author.clone(),
            date_label: format_day(article.published_on),
            summary: article.summary.clone(),
            image_url: article.image_url.clone(),
        }
    }
}

#[must_use]
pub fn map_news_cards(articles: &[NewsArticle]) -> Vec<NewsCardVm> {
    articles.iter().map(NewsCardVm::from).collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArticleVm {
    pub card: NewsCardVm,
    pub reading_label: String,
    pub body_html: String,
    pub related: Vec<NewsCardVm>,
}

/// Detail view plus up to two other articles from the same category.
#[must_use]
pub fn map_article(article: &NewsArticle, all: &[NewsArticle]) -> ArticleVm {
    ArticleVm {
        card: NewsCardVm::from(article),
        reading_label: format!("{} min read", reading_minutes(&article.content)),
        body_html: markdown_to_html(&article.content),
        related: all
            .iter()
            .filter(|other| other.id != article.id && other.category == article.category)
            .take(2)
            .map(NewsCardVm::from)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::Fixtures;

    #[test]
    fn article_renders_markdown_and_related() {
        let news = Fixtures::load().unwrap().news;
        let first = news.iter().find(|a| a.id.value() == 1).unwrap();
        let vm = map_article(first, &news);
        assert_eq!(vm.card.date_label, "April 20, 2025");
        assert!(vm.body_html.contains("<strong>predictable</strong>"));
        assert!(vm.related.iter().all(|r| r.category_label == first.category.label()));
        assert!(vm.related.iter().all(|r| r.id != 1));
    }
}
