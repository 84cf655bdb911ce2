use std::sync::Arc;

use juggle_core::model::{NewsArticle, NewsId};
use storage::repository::{NewsRepository, Storage, StorageError};

use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_storage};

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_renders_greeting() {
    let mut harness = setup_view_harness(ViewKind::Dashboard).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Welcome back, Test User!"), "missing greeting in {html}");
    assert!(html.contains("Rings - MLOps Feedback Loops"), "missing current module in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn modules_view_smoke_lists_every_module() {
    let mut harness = setup_view_harness(ViewKind::Modules).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Balls - AI Foundations"), "missing module 1 in {html}");
    assert!(html.contains("Flower Stick - Managed Services"), "missing module 3 in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn walkthrough_view_smoke_resumes_at_current_step() {
    let mut harness = setup_view_harness(ViewKind::Walkthrough("module-2")).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("AWS Technology Concepts"), "missing step title in {html}");
    assert!(html.contains("45% complete"), "missing progress in {html}");
    assert!(html.contains("Continue"), "missing continue in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn walkthrough_view_smoke_lists_module_practice_log() {
    let mut harness = setup_view_harness(ViewKind::Walkthrough("module-2")).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Practice log"), "missing log heading in {html}");
    assert!(html.contains("1 sessions logged"), "missing session count in {html}");
    assert!(html.contains("15 min"), "missing session duration in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn walkthrough_view_smoke_rejects_locked_module() {
    let mut harness = setup_view_harness(ViewKind::Walkthrough("module-3")).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("This module is locked"), "missing locked message in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn walkthrough_view_smoke_reports_unknown_module() {
    let mut harness = setup_view_harness(ViewKind::Walkthrough("module-99")).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Module not found"), "missing not found in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn reflection_view_smoke_renders_prompts() {
    let mut harness = setup_view_harness(ViewKind::Reflection("module-2")).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Juggling progress"), "missing rating in {html}");
    assert!(html.contains("What are your next steps?"), "missing prompt in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn news_view_smoke_renders_articles() {
    let mut harness = setup_view_harness(ViewKind::News).await;
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("How Juggling Improves Your AWS Architecture Skills"),
        "missing article in {html}"
    );
    assert!(html.contains("Sarah Johnson"), "missing author in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn article_view_smoke_renders_markdown_body() {
    let mut harness = setup_view_harness(ViewKind::Article(1)).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("<strong>predictable</strong>"), "missing emphasis in {html}");
    assert!(html.contains("<li>decouple producers"), "missing list in {html}");
    assert!(html.contains("Related articles"), "missing related in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn article_view_smoke_reports_missing_article() {
    let mut harness = setup_view_harness(ViewKind::Article(404)).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Article not found"), "missing not found in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn achievements_view_smoke_renders_groups() {
    let mut harness = setup_view_harness(ViewKind::Achievements).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("3-Ball Master"), "missing achievement in {html}");
    assert!(html.contains("Pipeline Pioneer"), "missing tech achievement in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_smoke_renders_stats_and_form() {
    let mut harness = setup_view_harness(ViewKind::Practice).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Your stats"), "missing stats in {html}");
    assert!(html.contains("Session history"), "missing history in {html}");
    assert!(html.contains("Record a session"), "missing form in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn session_detail_view_smoke_renders_metrics() {
    let mut harness = setup_view_harness(ViewKind::Session("session-3")).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Rings"), "missing module name in {html}");
    assert!(html.contains("Started on rings"), "missing notes in {html}");
    assert!(html.contains("Drops"), "missing drops metric in {html}");
    assert!(html.contains("50%"), "missing consistency in {html}");
    assert!(html.contains("Open module"), "missing module link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn session_detail_view_smoke_reports_missing_session() {
    let mut harness = setup_view_harness(ViewKind::Session("session-404")).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Practice session not found"), "missing not found in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn profile_view_smoke_prefills_form() {
    let mut harness = setup_view_harness(ViewKind::Profile).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Test User"), "missing name in {html}");
    assert!(html.contains("Save profile"), "missing submit in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn login_view_smoke_renders_sign_in() {
    let mut harness = setup_view_harness(ViewKind::Login).await;
    harness.services.auth().logout().await.expect("logout");
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Welcome back"), "missing title in {html}");
    assert!(html.contains("New here? Create an account"), "missing switch in {html}");
}

struct FailingNewsRepo;

#[async_trait::async_trait]
impl NewsRepository for FailingNewsRepo {
    async fn list_news(&self) -> Result<Vec<NewsArticle>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn get_news(&self, _id: NewsId) -> Result<NewsArticle, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn news_view_smoke_renders_error_state() {
    let mut storage = Storage::with_fixtures().expect("fixtures");
    storage.news = Arc::new(FailingNewsRepo);
    let mut harness = setup_view_harness_with_storage(ViewKind::News, storage).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Something went wrong"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}
