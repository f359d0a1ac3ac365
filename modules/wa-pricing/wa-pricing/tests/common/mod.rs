#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

//! Shared setup for wa-pricing integration tests

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::Value;
use tower::ServiceExt;
use wa_pricing::WaPricingModule;
use wa_pricing::config::{CountryRateConfig, IdentityConfig, WaPricingConfig};

pub const ANA_TOKEN: &str = "token-ana";
pub const BRUNO_TOKEN: &str = "token-bruno";

pub async fn connect() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).sqlx_logging(false);
    Database::connect(opts).await.unwrap()
}

fn identity(open_id: &str, name: &str) -> IdentityConfig {
    IdentityConfig {
        open_id: open_id.to_owned(),
        name: Some(name.to_owned()),
        email: Some(format!("{open_id}@example.com")),
        login_method: Some("static".to_owned()),
    }
}

fn rate(country: &str, marketing: &str) -> CountryRateConfig {
    CountryRateConfig {
        country: country.to_owned(),
        marketing_rate: marketing.to_owned(),
        utility_rate: "0.0080".to_owned(),
        authentication_rate: "0.0315".to_owned(),
    }
}

pub fn test_config() -> WaPricingConfig {
    let mut config = WaPricingConfig::default();
    config
        .auth
        .tokens
        .insert(ANA_TOKEN.to_owned(), identity("ana", "Ana"));
    config
        .auth
        .tokens
        .insert(BRUNO_TOKEN.to_owned(), identity("bruno", "Bruno"));
    config.country_rates = vec![rate("Mexico", "0.0436"), rate("Brazil", "0.0625")];
    config
}

pub async fn init_module(config: WaPricingConfig) -> WaPricingModule {
    WaPricingModule::init(connect().await, config).await.unwrap()
}

pub async fn test_router() -> Router {
    init_module(test_config()).await.router()
}

pub fn request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    send(app, request("GET", uri, token, None)).await
}

pub async fn post(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> (StatusCode, Value) {
    send(app, request("POST", uri, token, Some(body))).await
}
