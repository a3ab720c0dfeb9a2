//! HTTP-to-event adapter
//!
//! axum performs no path matching here: everything lands on the fallback,
//! which builds an `ApiRequest`, lets the core classify and dispatch it, and
//! writes the envelope back verbatim. The core's route table is the single
//! source of routing truth.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::header::{HeaderName, HeaderValue};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use fixtured_core::{ApiRequest, ApiResponse, Handler};

/// Collected-body cap; fixture payloads are small.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Build the application router around a core handler.
pub fn build_router(handler: Handler) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .fallback(dispatch)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(handler))
}

async fn dispatch(State(handler): State<Arc<Handler>>, req: Request) -> Response {
    let (parts, body) = req.into_parts();

    let bytes = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(error = %err, "failed to read request body");
            return (
                StatusCode::BAD_REQUEST,
                axum::Json(serde_json::json!({ "error": "Unreadable request body" })),
            )
                .into_response();
        }
    };

    let mut event = ApiRequest::new(parts.method.as_str(), parts.uri.path());
    if !bytes.is_empty() {
        event.body = Some(String::from_utf8_lossy(&bytes).into_owned());
    }

    render(handler.handle(&event).await)
}

fn render(resp: ApiResponse) -> Response {
    let status =
        StatusCode::from_u16(resp.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut response = Response::new(Body::from(resp.body));
    *response.status_mut() = status;
    for (name, value) in &resp.headers {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_str()),
            HeaderValue::try_from(value.as_str()),
        ) {
            response.headers_mut().insert(name, value);
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::CONTENT_TYPE;
    use fixtured_core::{DbConfig, PoolManager};
    use serde_json::Value;
    use tower::ServiceExt;

    /// Router over a handler whose pool can never connect: exercises every
    /// path that short-circuits before storage.
    fn test_router() -> Router {
        build_router(Handler::new(PoolManager::new(DbConfig::default())))
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), MAX_BODY_BYTES).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn unknown_path_maps_to_core_404() {
        let response = test_router()
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(json_body(response).await["error"], "Endpoint not found");
    }

    #[tokio::test]
    async fn method_and_path_reach_the_core() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/users")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(json_body(response).await["error"], "Method not allowed");
    }

    #[tokio::test]
    async fn empty_body_becomes_missing_body() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/users")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "Missing request body");
    }

    #[tokio::test]
    async fn request_body_is_forwarded() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/users")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        // "{}" reaches the core and fails field extraction, not body presence
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error = json_body(response).await["error"]
            .as_str()
            .unwrap()
            .to_owned();
        assert!(error.contains("name"), "got: {error}");
    }
}
