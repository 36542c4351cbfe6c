//! Accounts is a small HTTP API to create and read bank-style accounts.

#![forbid(unsafe_code)]
pub mod account;
pub mod config;
mod database;
pub mod error;
mod router;
pub mod storage;
pub mod telemetry;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::FromRef;
use axum::http::Method;
use axum::routing::{get, post};
use axum::{Router, middleware as AxumMiddleware};
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceBuilder;
use tower_http::LatencyUnit;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};

pub use error::ServerError;

use config::{Configuration, StorageKind};
use storage::{MemoryStorage, PgStorage, Storage};

/// MUST NEVER be used in production.
#[cfg(test)]
pub async fn make_request(
    app: Router,
    method: Method,
    path: &str,
    body: String,
) -> axum::http::Response<axum::body::Body> {
    use axum::extract::Request;
    use axum::http::header;
    use tower::util::ServiceExt;

    app.oneshot(
        Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(axum::body::Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// State sharing between routes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Configuration>,
    pub storage: Arc<dyn Storage>,
    pub metrics: Option<PrometheusHandle>,
}

impl FromRef<AppState> for Arc<dyn Storage> {
    fn from_ref(state: &AppState) -> Arc<dyn Storage> {
        Arc::clone(&state.storage)
    }
}

/// Create router.
pub fn app(state: AppState) -> Router {
    let middleware = ServiceBuilder::new()
        // Add high level tracing/logging to all requests.
        .layer(
            TraceLayer::new_for_http()
                .on_body_chunk(|chunk: &Bytes, latency: Duration, _span: &tracing::Span| {
                    tracing::trace!(size_bytes = chunk.len(), latency = ?latency, "sending body chunk")
                })
                .make_span_with(DefaultMakeSpan::new().level(tracing::Level::INFO))
                .on_request(DefaultOnRequest::new())
                .on_response(DefaultOnResponse::new().latency_unit(LatencyUnit::Micros)),
        )
        // Add CORS preflight support.
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
                .allow_headers(Any),
        );

    Router::new()
        // `GET /status.json` goes to `status`.
        .route("/status.json", get(router::status::status))
        .route("/metrics", get(telemetry::render))
        // `POST /account` creates, `DELETE /account` is a no-op.
        .route(
            "/account",
            post(router::account::create)
                .delete(router::account::delete)
                .fallback(router::method_not_allowed),
        )
        .route(
            "/account/",
            get(router::account::missing_id).fallback(router::method_not_allowed),
        )
        // `GET /account/{id}` goes to `get`.
        .route(
            "/account/{id}",
            get(router::account::get).fallback(router::method_not_allowed),
        )
        .with_state(state)
        .route_layer(AxumMiddleware::from_fn(telemetry::track))
        .layer(middleware)
}

/// Initialize the application state.
pub async fn initialize_state(
    config: Arc<Configuration>,
    metrics: Option<PrometheusHandle>,
) -> Result<AppState, Box<dyn std::error::Error>> {
    let storage: Arc<dyn Storage> = match config.storage {
        StorageKind::Postgres => {
            let Some(url) = config.database_url() else {
                return Err("missing `postgres` entry on configuration file".into());
            };

            let storage = PgStorage::new(database::connect(&url, config.pool_size()).await?);
            storage.init().await?;
            Arc::new(storage)
        },
        StorageKind::Memory => {
            tracing::warn!("accounts are kept in memory and lost on shutdown");
            Arc::new(MemoryStorage::new())
        },
    };

    Ok(AppState {
        config,
        storage,
        metrics,
    })
}
