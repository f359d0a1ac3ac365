use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Extension, Router, middleware};

use crate::domain::service::Service;

use super::auth::{AuthState, resolve_caller};
use super::error::with_problem_instance;
use super::handlers;

/// Module routes plus `/health` and `/openapi.json`.
///
/// Caller resolution wraps the `/wa-pricing/v1` routes only. Problem
/// responses of every route get the request path as `instance`.
#[must_use]
pub fn router(service: Arc<Service>, auth: AuthState) -> Router {
    let api = Router::new()
        .route(
            "/wa-pricing/v1/calculator/calculate",
            post(handlers::calculate),
        )
        .route(
            "/wa-pricing/v1/calculator/calculations",
            post(handlers::save_calculation).get(handlers::my_calculations),
        )
        .route(
            "/wa-pricing/v1/leads",
            post(handlers::submit_lead).get(handlers::list_leads),
        )
        .route("/wa-pricing/v1/rates", get(handlers::list_country_rates))
        .route(
            "/wa-pricing/v1/rates/{country}",
            get(handlers::get_country_rate),
        )
        .route("/wa-pricing/v1/auth/me", get(handlers::me))
        .layer(middleware::from_fn_with_state(auth, resolve_caller))
        .layer(Extension(service));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/openapi.json", get(handlers::openapi_json))
        .merge(api)
        .layer(middleware::from_fn(with_problem_instance))
}
