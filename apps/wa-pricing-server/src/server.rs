use anyhow::{Context, Result};
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, StatusCode};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::field::Empty;
use wa_pricing::WaPricingModule;

use crate::config::{AppConfig, DatabaseConfig, ServerConfig, redact_dsn};
use crate::cors;
use crate::shutdown;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Connect, initialize the module and serve until a shutdown signal.
///
/// # Errors
/// Any startup failure; serving errors after bind.
pub async fn run(config: AppConfig) -> Result<()> {
    let addr = config.bind_addr()?;
    let db = connect(&config.database).await?;
    let module = WaPricingModule::init(db, config.modules.wa_pricing.clone()).await?;
    let router = apply_middleware(module.router(), &config.server)?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("HTTP server bound on {}", addr);

    let shutdown = async {
        if let Err(e) = shutdown::wait_for_shutdown().await {
            tracing::error!(error = %e, "signal handling failed, shutting down");
        }
        tracing::info!("HTTP server shutting down gracefully");
    };

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")
}

async fn connect(cfg: &DatabaseConfig) -> Result<DatabaseConnection> {
    // Every pooled connection to an in-memory SQLite database is a separate database.
    let max_conns = if cfg.is_in_memory() { 1 } else { cfg.max_conns };

    let mut opts = ConnectOptions::new(cfg.dsn.clone());
    opts.max_connections(max_conns)
        .acquire_timeout(cfg.acquire_timeout)
        .sqlx_logging(false);

    tracing::info!(dsn = %redact_dsn(&cfg.dsn), max_conns, "connecting to database");
    Database::connect(opts)
        .await
        .with_context(|| format!("failed to connect to {}", redact_dsn(&cfg.dsn)))
}

/// Wrap `router` in the HTTP middleware stack.
///
/// Layers are registered innermost first. At runtime a request passes
/// `SetRequestId` → `PropagateRequestId` → Trace → Timeout → `BodyLimit` → CORS.
///
/// # Errors
/// Invalid CORS settings.
pub fn apply_middleware(router: Router, cfg: &ServerConfig) -> Result<Router> {
    let mut router = router;

    if let Some(cors_layer) = cors::build_cors_layer(&cfg.cors)? {
        cors::warn_if_wildcard(&cfg.cors);
        router = router.layer(cors_layer);
    }

    router = router
        .layer(RequestBodyLimitLayer::new(cfg.body_limit_bytes))
        .layer(DefaultBodyLimit::max(cfg.body_limit_bytes));

    router = router.layer(TimeoutLayer::with_status_code(
        StatusCode::GATEWAY_TIMEOUT,
        cfg.request_timeout,
    ));

    router = apply_trace_layer(router);

    let x_request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));
    router = router.layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid));

    Ok(router)
}

fn apply_trace_layer(router: Router) -> Router {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|req: &axum::http::Request<axum::body::Body>| {
                let rid = req
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("n/a");

                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    uri = %req.uri().path(),
                    version = ?req.version(),
                    request_id = %rid,
                    status = Empty,
                    latency_ms = Empty
                )
            })
            .on_response(
                |res: &axum::http::Response<axum::body::Body>,
                 latency: std::time::Duration,
                 span: &tracing::Span| {
                    span.record("status", res.status().as_u16());
                    span.record("latency_ms", latency.as_millis());
                },
            ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::{get, post};
    use std::time::Duration;
    use tower::ServiceExt as _;

    fn app(cfg: &ServerConfig) -> Router {
        let router = Router::new()
            .route("/ping", get(|| async { "pong" }))
            .route("/echo", post(|body: String| async move { body }))
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "late"
                }),
            );
        apply_middleware(router, cfg).unwrap()
    }

    #[tokio::test]
    async fn request_id_is_generated_and_echoed() {
        let response = app(&ServerConfig::default())
            .oneshot(Request::get("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));

        let response = app(&ServerConfig::default())
            .oneshot(
                Request::get("/ping")
                    .header(REQUEST_ID_HEADER, "req-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()[REQUEST_ID_HEADER], "req-42");
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let cfg = ServerConfig {
            body_limit_bytes: 16,
            ..ServerConfig::default()
        };
        let response = app(&cfg)
            .oneshot(
                Request::post("/echo")
                    .header("content-length", "64")
                    .body(Body::from("x".repeat(64)))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn slow_handler_times_out_with_504() {
        let cfg = ServerConfig {
            request_timeout: Duration::from_millis(50),
            ..ServerConfig::default()
        };
        let response = app(&cfg)
            .oneshot(Request::get("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[tokio::test]
    async fn preflight_is_answered_by_cors_layer() {
        let response = app(&ServerConfig::default())
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/echo")
                    .header("origin", "https://pricing.example.com")
                    .header("access-control-request-method", "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }
}
