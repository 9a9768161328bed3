//! JSON endpoints: `GET /search/:word` and `GET /page/:id`.

use std::sync::Arc;

use anyhow::Context;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{error, info, warn};

use crate::entry::LexicalEntry;
use crate::error::Error;
use crate::lookup::Lookup;
use crate::upstream::{PageRef, PageSource};

pub const SEARCH_FAILED: &str = "Failed to load German Wiki search results";
pub const PAGE_FAILED: &str = "Failed to load German Wiki page data";

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<Value>)>;

#[derive(Debug, Serialize)]
pub struct SearchBody {
    pub pages: Vec<PageRef>,
}

pub fn router<S: PageSource + 'static>(lookup: Arc<Lookup<S>>) -> Router {
    Router::new()
        .route("/search", get(missing_word))
        .route("/search/", get(missing_word))
        .route("/search/:word", get(search_handler::<S>))
        .route("/page", get(missing_page))
        .route("/page/", get(missing_page))
        .route("/page/:id", get(page_handler::<S>))
        .with_state(lookup)
}

pub async fn serve<S: PageSource + 'static>(bind: &str, lookup: Arc<Lookup<S>>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {}", bind))?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router(lookup))
        .await
        .context("server shutdown")?;
    Ok(())
}

async fn search_handler<S: PageSource>(
    State(lookup): State<Arc<Lookup<S>>>,
    Path(word): Path<String>,
) -> ApiResult<SearchBody> {
    match lookup.search(&word).await {
        Ok(pages) => Ok(Json(SearchBody { pages })),
        Err(e) => Err(error_response(e, SEARCH_FAILED, json!({ "pages": [] }))),
    }
}

async fn page_handler<S: PageSource>(
    State(lookup): State<Arc<Lookup<S>>>,
    Path(id): Path<String>,
) -> ApiResult<LexicalEntry> {
    let Ok(page_id) = id.trim().parse::<u64>() else {
        warn!("Rejected page id {:?}", id);
        return Err(missing_page().await);
    };
    match lookup.page(page_id).await {
        Ok(assembly) => Ok(Json(assembly.entry)),
        Err(e) => Err(error_response(e, PAGE_FAILED, json!({}))),
    }
}

async fn missing_word() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "pages": [] })))
}

async fn missing_page() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({})))
}

/// Map a failure to its status and body. Upstream failures keep the upstream
/// status (502 when there was no response at all).
fn error_response(err: Error, fallback: &str, missing: Value) -> (StatusCode, Json<Value>) {
    match err {
        Error::MissingInput(_) => (StatusCode::NOT_FOUND, Json(missing)),
        Error::Upstream {
            message,
            status,
            status_text,
            ..
        } => {
            warn!("Upstream failure: {}", message);
            let code = status
                .and_then(|s| StatusCode::from_u16(s).ok())
                .unwrap_or(StatusCode::BAD_GATEWAY);
            (
                code,
                Json(json!({
                    "message": fallback,
                    "upstreamStatus": status,
                    "upstreamStatusText": status_text,
                })),
            )
        }
        other => {
            error!("Request failed: {}", other);
            let message = other.to_string();
            let message = if message.is_empty() { fallback.to_string() } else { message };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "message": message })))
        }
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::tests::{lookup, StubSource};
    use axum::response::{IntoResponse, Response};

    async fn body_of(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
    }

    #[tokio::test]
    async fn search_returns_pages() {
        let source = StubSource::default().with_page(12345, "Haus", "<p/>");
        let r = search_handler(State(Arc::new(lookup(source))), Path("Haus".into()))
            .await
            .into_response();
        assert_eq!(r.status(), StatusCode::OK);
        assert_eq!(
            body_of(r).await,
            json!({ "pages": [{ "pageid": 12345, "ns": 0, "title": "Haus", "index": 1 }] })
        );
    }

    #[tokio::test]
    async fn search_preserves_source_order() {
        let mut source = StubSource::default();
        let pages: Vec<PageRef> = [(12345, "Haus"), (9001, "Hausaufgabe"), (777, "Hausarzt")]
            .into_iter()
            .enumerate()
            .map(|(i, (pageid, title))| PageRef {
                pageid,
                ns: 0,
                title: title.into(),
                index: Some(i as u32 + 1),
            })
            .collect();
        source.candidates.insert("Haus".into(), pages);
        let r = search_handler(State(Arc::new(lookup(source))), Path("Haus".into()))
            .await
            .into_response();
        let body = body_of(r).await;
        let ids: Vec<u64> = body["pages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["pageid"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![12345, 9001, 777]);
    }

    #[tokio::test]
    async fn blank_word_is_404_with_empty_pages() {
        let r = search_handler(State(Arc::new(lookup(StubSource::default()))), Path(" ".into()))
            .await
            .into_response();
        assert_eq!(r.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_of(r).await, json!({ "pages": [] }));

        let r = missing_word().await.into_response();
        assert_eq!(r.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn page_returns_entry_without_absent_sections() {
        let source = StubSource::default().with_page(12345, "Haus", &fixture("haus.html"));
        let r = page_handler(State(Arc::new(lookup(source))), Path("12345".into()))
            .await
            .into_response();
        assert_eq!(r.status(), StatusCode::OK);
        let body = body_of(r).await;
        assert_eq!(body["pageid"], 12345);
        assert_eq!(body["title"], "Haus");
        assert_eq!(body["synonyms"], json!(["Gebäude", "Bau", "Familie", "Haushalt"]));
        assert!(body.get("antonyms").is_none());
    }

    #[tokio::test]
    async fn bad_page_id_is_404_with_empty_object() {
        let r = page_handler(State(Arc::new(lookup(StubSource::default()))), Path("abc".into()))
            .await
            .into_response();
        assert_eq!(r.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_of(r).await, json!({}));
    }

    #[tokio::test]
    async fn upstream_status_is_passed_through() {
        let source = StubSource {
            fail_status: Some(503),
            ..StubSource::default()
        };
        let r = search_handler(State(Arc::new(lookup(source))), Path("Haus".into()))
            .await
            .into_response();
        assert_eq!(r.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            body_of(r).await,
            json!({
                "message": SEARCH_FAILED,
                "upstreamStatus": 503,
                "upstreamStatusText": null,
            })
        );
    }

    #[tokio::test]
    async fn unreachable_upstream_is_502() {
        let source = StubSource {
            fail_status: Some(0),
            ..StubSource::default()
        };
        let r = page_handler(State(Arc::new(lookup(source))), Path("1".into()))
            .await
            .into_response();
        assert_eq!(r.status(), StatusCode::BAD_GATEWAY);
        let body = body_of(r).await;
        assert_eq!(body["message"], PAGE_FAILED);
        assert_eq!(body["upstreamStatus"], Value::Null);
    }

    #[test]
    fn internal_failure_is_500() {
        let (code, Json(body)) = error_response(
            Error::Extraction("labels unreadable".into()),
            PAGE_FAILED,
            json!({}),
        );
        assert_eq!(code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "message": "extraction failed: labels unreadable" }));
    }
}
