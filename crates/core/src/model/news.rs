use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::ids::NewsId;

/// Editorial section a news article belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NewsCategory {
    #[serde(rename = "Juggling & Technology")]
    Technology,
    #[serde(rename = "Juggling & Change")]
    Change,
    #[serde(rename = "Juggling & Your Brain")]
    Brain,
}

impl NewsCategory {
    pub const ALL: [NewsCategory; 3] = [
        NewsCategory::Technology,
        NewsCategory::Change,
        NewsCategory::Brain,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            NewsCategory::Technology => "Juggling & Technology",
            NewsCategory::Change => "Juggling & Change",
            NewsCategory::Brain => "Juggling & Your Brain",
        }
    }

    /// Stable key for routes and filter controls.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            NewsCategory::Technology => "technology",
            NewsCategory::Change => "change",
            NewsCategory::Brain => "brain",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        NewsCategory::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A published news article. Content is markdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsArticle {
    pub id: NewsId,
    pub title: String,
    pub slug: String,
    pub category: NewsCategory,
    pub author: String,
    pub published_on: NaiveDate,
    pub summary: String,
    pub content: String,
    pub image_url: Option<String>,
}

impl NewsArticle {
    /// Case-insensitive match against title and summary.
    #[must_use]
    pub fn matches_text(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty()
            || self.title.to_lowercase().contains(needle_lower)
            || self.summary.to_lowercase().contains(needle_lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_keys_round_trip() {
        for category in NewsCategory::ALL {
            assert_eq!(NewsCategory::from_key(category.key()), Some(category));
        }
        assert_eq!(NewsCategory::from_key("sports"), None);
    }

    #[test]
    fn text_match_covers_title_and_summary() {
        let article = NewsArticle {
            id: NewsId::new(1),
            title: "How Juggling Improves Your AWS Architecture Skills".into(),
            slug: "juggling-improves-aws-architecture".into(),
            category: NewsCategory::Technology,
            author: "Sarah Johnson".into(),
            published_on: NaiveDate::from_ymd_opt(2025, 4, 20).unwrap(),
            summary: "Connections between juggling patterns and resilient clouds.".into(),
            content: String::new(),
            image_url: None,
        };
        assert!(article.matches_text("aws"));
        assert!(article.matches_text("resilient"));
        assert!(!article.matches_text("devops"));
    }
}
