//! HTTP transport for the block endpoints.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /health` returns `{ "ok": true, "blocks": <count> }`.
//! - `GET /api/blocks`, `POST /api/blocks`
//! - `GET /api/blocks/stats`
//! - `GET|PUT|DELETE /api/blocks/:id`
//!
//! Anything else answers 404 with the standard envelope, and an unsupported
//! method on a known route answers 405 with it.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, QueryRejection};
use axum::extract::{Path, Query, Request, State};
use axum::http::{Method, StatusCode, Uri};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

use super::envelope::ApiResponse;
use super::error::ApiError;
use super::service::{BlockRequest, BlockResponse, BlockService};
use crate::store::BlockStore;
use crate::validation::{ListQueryParams, ValidationErrors};

type Shared<S> = State<Arc<BlockService<S>>>;

/// Build an axum `Router` serving the block endpoints.
pub fn router<S: BlockStore + 'static>(service: Arc<BlockService<S>>) -> Router {
    Router::new()
        .route("/health", get(health_handler::<S>))
        .route(
            "/api/blocks",
            get(list_handler::<S>).post(create_handler::<S>),
        )
        .route("/api/blocks/stats", get(stats_handler::<S>))
        .route(
            "/api/blocks/:id",
            get(get_handler::<S>)
                .put(update_handler::<S>)
                .delete(delete_handler::<S>),
        )
        .method_not_allowed_fallback(method_not_allowed_handler)
        .fallback(fallback_handler)
        .layer(middleware::from_fn(log_request))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(service)
}

/// Serve the endpoints at `addr` until ctrl-c.
pub async fn serve<S: BlockStore + 'static>(
    service: Arc<BlockService<S>>,
    addr: SocketAddr,
) -> Result<(), std::io::Error> {
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

impl IntoResponse for BlockResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.body)).into_response()
    }
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        %method,
        %path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request"
    );
    response
}

/// `GET /health`
async fn health_handler<S: BlockStore + 'static>(State(service): Shared<S>) -> Response {
    match service.count() {
        Ok(blocks) => Json(json!({ "ok": true, "blocks": blocks })).into_response(),
        Err(e) => BlockResponse::from(e).into_response(),
    }
}

/// `GET /api/blocks`
async fn list_handler<S: BlockStore + 'static>(
    State(service): Shared<S>,
    query: Result<Query<ListQueryParams>, QueryRejection>,
) -> BlockResponse {
    match query {
        Ok(Query(params)) => service.respond(BlockRequest::List(params)),
        Err(rejection) => {
            let err = ApiError::InvalidQuery(ValidationErrors::single(
                "query",
                rejection.body_text(),
            ));
            tracing::warn!(error = %err, "block request rejected");
            BlockResponse::from(err)
        }
    }
}

/// `POST /api/blocks`
async fn create_handler<S: BlockStore + 'static>(
    State(service): Shared<S>,
    body: Result<Bytes, BytesRejection>,
) -> BlockResponse {
    match body {
        Ok(body) => service.respond(BlockRequest::Create {
            body: body.to_vec(),
        }),
        Err(rejection) => body_rejected(rejection),
    }
}

/// `GET /api/blocks/stats`
async fn stats_handler<S: BlockStore + 'static>(State(service): Shared<S>) -> BlockResponse {
    service.respond(BlockRequest::Stats)
}

/// `GET /api/blocks/:id`
async fn get_handler<S: BlockStore + 'static>(
    State(service): Shared<S>,
    Path(id): Path<String>,
) -> BlockResponse {
    service.respond(BlockRequest::Get { id })
}

/// `PUT /api/blocks/:id`
async fn update_handler<S: BlockStore + 'static>(
    State(service): Shared<S>,
    Path(id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> BlockResponse {
    match body {
        Ok(body) => service.respond(BlockRequest::Update {
            id,
            body: body.to_vec(),
        }),
        Err(rejection) => body_rejected(rejection),
    }
}

/// `DELETE /api/blocks/:id`
async fn delete_handler<S: BlockStore + 'static>(
    State(service): Shared<S>,
    Path(id): Path<String>,
) -> BlockResponse {
    service.respond(BlockRequest::Delete { id })
}

async fn fallback_handler(method: Method, uri: Uri) -> Response {
    let body = ApiResponse::<()>::failure(
        "Not found",
        format!("Route {method} {} does not exist", uri.path()),
    );
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}

async fn method_not_allowed_handler(method: Method, uri: Uri) -> Response {
    let body = ApiResponse::<()>::failure(
        "Method not allowed",
        format!("Method {method} is not supported on {}", uri.path()),
    );
    (StatusCode::METHOD_NOT_ALLOWED, Json(body)).into_response()
}

/// Body extraction failures (oversized or unreadable) in the envelope.
fn body_rejected(rejection: BytesRejection) -> BlockResponse {
    let err = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::BodyTooLarge(rejection.body_text())
    } else {
        ApiError::MalformedBody(rejection.body_text())
    };
    tracing::warn!(status = err.status_code(), error = %err, "block request rejected");
    BlockResponse::from(err)
}
