//! Router tests over the in-memory store

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use rekayasa_common::{
    config::AppConfig,
    db::{Collection, ContentRepository, MemoryStore},
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::{create_router, AppState};

fn seeded_store() -> MemoryStore {
    MemoryStore::new()
        .with_rows(
            Collection::Papers,
            vec![
                json!({
                    "id": "attention",
                    "title": "Attention Is All You Need",
                    "alt_title": "Transformer",
                    "authors": "Vaswani, Shazeer",
                    "year": 2017,
                    "summary": "Self-attention replaces recurrence.",
                    "category": "LLM",
                    "status": "published",
                    "created_at": "2024-01-01T00:00:00Z"
                }),
                json!({
                    "id": "react",
                    "title": "ReAct",
                    "authors": ["Yao"],
                    "year": 2022,
                    "summary": "Reasoning and acting.",
                    "category": "Agents",
                    "status": "draft",
                    "created_at": "2024-02-01T00:00:00Z"
                }),
            ],
        )
        .with_rows(
            Collection::Ebooks,
            vec![json!({
                "id": "e1",
                "title": "Prompt 101",
                "author": "Tim Rekayasa",
                "lynkUrl": "https://lynk.id/rekayasa-ai/prompt?ref=site",
                "tags": ["prompting"]
            })],
        )
        .with_rows(
            Collection::NewsArticles,
            vec![
                json!({
                    "id": "n1",
                    "title": "Model baru",
                    "excerpt": "Rilis minggu ini.",
                    "source_url": "https://news.example.com/n1",
                    "published_at": "2024-05-01",
                    "is_featured": false
                }),
                json!({
                    "id": "n2",
                    "title": "Laporan riset",
                    "excerpt": "Ringkasan.",
                    "source_url": "https://news.example.com/n2",
                    "published_at": "2024-03-01",
                    "is_featured": true
                }),
            ],
        )
        .with_rows(
            Collection::SiteConfig,
            vec![json!({"key": "discord_url", "value": "https://discord.gg/rekayasa"})],
        )
}

fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.rate_limit.enabled = false;
    config.content.environment = "production".to_string();
    config
}

fn router_with(repo: ContentRepository) -> Router {
    create_router(AppState::new(test_config(), repo, None))
}

fn seeded_router() -> Router {
    let config = test_config();
    let repo = ContentRepository::new(
        Some(Arc::new(seeded_store())),
        config.content.include_drafts(),
    );
    create_router(AppState::new(config, repo, None))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn ids(items: &Value) -> Vec<&str> {
    items
        .as_array()
        .map(|items| items.iter().filter_map(|i| i["id"].as_str()).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(seeded_router(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_papers_search_and_category() {
    let (status, body) = get(seeded_router(), "/api/papers?q=attention").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["items"]), vec!["attention"]);
    assert_eq!(body["total"], 2);
    assert_eq!(body["matched"], 1);

    let (_, body) = get(seeded_router(), "/api/papers?categories=Agents").await;
    assert_eq!(ids(&body["items"]), vec!["react"]);

    let (_, body) = get(seeded_router(), "/api/papers?q=react&categories=LLM").await;
    assert!(ids(&body["items"]).is_empty());
    assert_eq!(body["is_empty"], true);
    assert_eq!(body["empty_state"], "no_matches");
}

#[tokio::test]
async fn test_level_filter_ignored_for_unlevelled_kinds() {
    let (status, body) = get(seeded_router(), "/api/papers?levels=Beginner").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["items"]), vec!["react", "attention"]);
    assert!(body["empty_state"].is_null());

    let (status, body) = get(seeded_router(), "/api/ebooks?levels=Beginner").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["items"]), vec!["e1"]);
}

#[tokio::test]
async fn test_summaries_hide_drafts_in_production() {
    let (status, body) = get(seeded_router(), "/api/papers/summaries").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["items"]), vec!["attention"]);
}

#[tokio::test]
async fn test_paper_detail() {
    let (status, body) = get(seeded_router(), "/api/papers/attention").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["authors"], json!(["Vaswani", "Shazeer"]));

    let (status, body) = get(seeded_router(), "/api/papers/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "PAPER_NOT_FOUND");
}

#[tokio::test]
async fn test_invalid_listing_params() {
    let (status, body) = get(seeded_router(), "/api/konsep?sort=populer").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "UNSUPPORTED_SORT");

    let (status, body) = get(seeded_router(), "/api/ebooks?limit=500").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_news_feed() {
    let (status, body) = get(seeded_router(), "/api/news").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["featured"]["id"], "n2");
    assert_eq!(ids(&body["listing"]["items"]), vec!["n1", "n2"]);

    let (status, body) = get(seeded_router(), "/api/news/featured").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "n2");

    let (status, _) = get(seeded_router(), "/api/news/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_site_config() {
    let (status, body) = get(seeded_router(), "/api/config/discord_url").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["value"], "https://discord.gg/rekayasa");

    let (status, body) = get(seeded_router(), "/api/config/banner").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["value"].is_null());
}

#[tokio::test]
async fn test_outbound_redirect_passes_link_through() {
    let response = seeded_router()
        .oneshot(
            Request::builder()
                .uri("/go/ebook/e1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers()[header::LOCATION],
        "https://lynk.id/rekayasa-ai/prompt?ref=site"
    );

    let (status, _) = get(seeded_router(), "/go/paper/attention").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unconfigured_store_renders_empty_states() {
    let app = router_with(ContentRepository::unconfigured());

    let (status, body) = get(app.clone(), "/api/konsep").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
    assert_eq!(body["empty_state"], "no_content");

    let (status, body) = get(app.clone(), "/api/news").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["featured"].is_null());

    let (status, body) = get(app, "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"]["store"]["status"], "unconfigured");
}

#[tokio::test]
async fn test_rate_limit_rejects_excess() {
    let mut config = test_config();
    config.rate_limit.enabled = true;
    config.rate_limit.requests_per_second = 1;
    config.rate_limit.burst = 1;
    let app = create_router(AppState::new(config, ContentRepository::unconfigured(), None));

    let (first, _) = get(app.clone(), "/health").await;
    assert_eq!(first, StatusCode::OK);

    let (second, body) = get(app, "/health").await;
    assert_eq!(second, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"]["code"], "RATE_LIMITED");
}

#[tokio::test]
async fn test_metrics_disabled_is_not_found() {
    let response = seeded_router()
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await;
    let response = tokio_test::assert_ok!(response);
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
