//! Thin HTTP API over the scraping pipeline.
//!
//! Exposes one search endpoint and a health probe. The interesting behavior
//! lives in the pipeline; this layer only validates the keyword, maps the
//! empty-vs-error distinction onto HTTP status codes, and serializes the
//! response.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::pipeline::SearchPipeline;
use crate::{SearchQuery, SearchResult};

/// Query parameters for the search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Keyword to scrape results for.
    #[serde(default)]
    pub keyword: String,
}

/// Wire response for the search endpoint.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// The keyword that was searched.
    pub keyword: String,
    /// Extracted results; `None` on failure.
    pub results: Option<Vec<SearchResult>>,
    /// Whether the request succeeded. Zero results is still a success.
    pub success: bool,
    /// Human-readable status message.
    pub message: String,
    /// Unix timestamp in milliseconds.
    pub timestamp: u64,
}

impl SearchResponse {
    fn ok(keyword: String, results: Vec<SearchResult>) -> Self {
        let message = format!("Found {} results", results.len());
        Self {
            keyword,
            results: Some(results),
            success: true,
            message,
            timestamp: now_millis(),
        }
    }

    fn failure(keyword: String, message: impl Into<String>) -> Self {
        Self {
            keyword,
            results: None,
            success: false,
            message: message.into(),
            timestamp: now_millis(),
        }
    }
}

fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Builds the API router.
pub fn router(pipeline: Arc<SearchPipeline>) -> Router {
    Router::new()
        .route("/api/search", get(search_route))
        .route("/api/health", get(health_route))
        .with_state(pipeline)
}

/// Binds the listener and serves the API until the process exits.
pub async fn run(addr: &str, pipeline: Arc<SearchPipeline>) -> anyhow::Result<()> {
    let app = router(pipeline);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn search_route(
    State(pipeline): State<Arc<SearchPipeline>>,
    Query(params): Query<SearchParams>,
) -> (StatusCode, Json<SearchResponse>) {
    let query = match SearchQuery::parse(&params.keyword) {
        Ok(query) => query,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(SearchResponse::failure(params.keyword, e.to_string())),
            );
        }
    };

    match pipeline.run(&query).await {
        Ok(results) => {
            info!("Request for '{}' yielded {} results", query, results.len());
            (
                StatusCode::OK,
                Json(SearchResponse::ok(query.as_str().to_string(), results)),
            )
        }
        Err(e) => {
            error!("Scraping failed for '{}': {}", query, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SearchResponse::failure(
                    query.as_str().to_string(),
                    format!("Failed to fetch results: {}", e),
                )),
            )
        }
    }
}

async fn health_route() -> &'static str {
    "serp-scrape is up"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquirer::PageAcquirer;
    use crate::extract::ResultExtractor;
    use crate::page::{Acquisition, BlockSignal, PageSnapshot};
    use crate::{Result, ScrapeError};
    use async_trait::async_trait;

    struct CannedAcquirer(Acquisition);

    #[async_trait]
    impl PageAcquirer for CannedAcquirer {
        async fn acquire(&self, _query: &SearchQuery) -> Result<Acquisition> {
            Ok(self.0.clone())
        }
    }

    struct FailingAcquirer;

    #[async_trait]
    impl PageAcquirer for FailingAcquirer {
        async fn acquire(&self, _query: &SearchQuery) -> Result<Acquisition> {
            Err(ScrapeError::Browser("no chrome".to_string()))
        }
    }

    fn state_with(acquirer: impl PageAcquirer + 'static) -> Arc<SearchPipeline> {
        Arc::new(SearchPipeline::new(
            Arc::new(acquirer),
            ResultExtractor::new().unwrap(),
        ))
    }

    #[tokio::test]
    async fn test_search_route_success() {
        let html = r#"
            <div class="g"><a href="https://example.com"><h3>Hit</h3></a></div>
        "#;
        let state = state_with(CannedAcquirer(Acquisition::Rendered(PageSnapshot::new(html))));
        let (status, Json(body)) = search_route(
            State(state),
            Query(SearchParams {
                keyword: "rust".to_string(),
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.success);
        assert_eq!(body.keyword, "rust");
        assert_eq!(body.results.unwrap().len(), 1);
        assert_eq!(body.message, "Found 1 results");
    }

    #[tokio::test]
    async fn test_search_route_blocked_is_success_with_empty_results() {
        let state = state_with(CannedAcquirer(Acquisition::Blocked(
            BlockSignal::CaptchaChallenge,
        )));
        let (status, Json(body)) = search_route(
            State(state),
            Query(SearchParams {
                keyword: "rust".to_string(),
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.success);
        assert_eq!(body.results.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_search_route_empty_keyword_is_bad_request() {
        let state = state_with(CannedAcquirer(Acquisition::Blocked(
            BlockSignal::UnknownBlock,
        )));
        let (status, Json(body)) = search_route(
            State(state),
            Query(SearchParams {
                keyword: "   ".to_string(),
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.success);
        assert!(body.results.is_none());
    }

    #[tokio::test]
    async fn test_search_route_infrastructure_failure_is_500() {
        let state = state_with(FailingAcquirer);
        let (status, Json(body)) = search_route(
            State(state),
            Query(SearchParams {
                keyword: "rust".to_string(),
            }),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.success);
        assert!(body.message.contains("Failed to fetch results"));
    }

    #[tokio::test]
    async fn test_search_route_trims_keyword() {
        let state = state_with(CannedAcquirer(Acquisition::Blocked(
            BlockSignal::NoResultsPage,
        )));
        let (_, Json(body)) = search_route(
            State(state),
            Query(SearchParams {
                keyword: "  rust  ".to_string(),
            }),
        )
        .await;
        assert_eq!(body.keyword, "rust");
    }

    #[tokio::test]
    async fn test_health_route() {
        assert_eq!(health_route().await, "serp-scrape is up");
    }

    #[test]
    fn test_response_serialization() {
        let response = SearchResponse::ok("rust".to_string(), vec![]);
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"success\":true"));
        assert!(json.contains("\"keyword\":\"rust\""));
        assert!(json.contains("\"timestamp\""));
    }
}
