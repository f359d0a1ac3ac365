//! Caller resolution for the REST surface.
//!
//! [`resolve_caller`] runs on every route and stores a [`CallerCtx`] in the
//! request extensions. Handlers read it back with [`Caller`] (anonymous
//! allowed) or [`Authenticated`] (401 otherwise).

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::{HeaderMap, Method, StatusCode, header};
use axum::middleware::Next;
use axum::response::Response;
use wa_pricing_sdk::models::{CallerCtx, Identity};

use crate::domain::error::DomainError;
use crate::domain::identity::IdentityResolver;
use crate::domain::service::Service;

use super::problem::Problem;

#[derive(Clone)]
pub struct AuthState {
    service: Arc<Service>,
    resolver: Arc<dyn IdentityResolver>,
    /// When set, every request runs as this identity and tokens are ignored.
    dev_identity: Option<Identity>,
}

impl AuthState {
    #[must_use]
    pub fn new(
        service: Arc<Service>,
        resolver: Arc<dyn IdentityResolver>,
        dev_identity: Option<Identity>,
    ) -> Self {
        Self {
            service,
            resolver,
            dev_identity,
        }
    }

    fn identity_for(&self, headers: &HeaderMap) -> Option<Identity> {
        if let Some(dev) = &self.dev_identity {
            return Some(dev.clone());
        }
        let token = extract_bearer_token(headers)?;
        let identity = self.resolver.resolve(token);
        if identity.is_none() {
            tracing::debug!("unknown bearer token, continuing as anonymous");
        }
        identity
    }
}

/// Resolve the caller and attach a [`CallerCtx`] to the request.
///
/// Unknown tokens and failed sign-ins leave the caller anonymous, so public
/// procedures still run. [`Authenticated`] answers 401 for the former and an
/// opaque 500 for a storage failure.
pub async fn resolve_caller(
    State(state): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    if is_preflight_request(request.method(), request.headers()) {
        return next.run(request).await;
    }

    let ctx = match state.identity_for(request.headers()) {
        Some(identity) => match state.service.sign_in(identity).await {
            Ok(user) => CallerCtx::authenticated(user),
            Err(DomainError::Database(cause)) => {
                tracing::error!(error = ?cause, "sign-in failed, continuing as anonymous");
                request.extensions_mut().insert(SignInUnavailable);
                CallerCtx::anonymous()
            }
            Err(err) => {
                tracing::warn!(error = %err, "identity rejected, continuing as anonymous");
                CallerCtx::anonymous()
            }
        },
        None => CallerCtx::anonymous(),
    };

    request.extensions_mut().insert(ctx);
    next.run(request).await
}

/// Set when a resolved identity could not be signed in because of storage.
#[derive(Debug, Clone, Copy)]
struct SignInUnavailable;

/// Caller context, anonymous or not.
#[derive(Debug, Clone)]
pub struct Caller(pub CallerCtx);

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CallerCtx>()
            .cloned()
            .map(Caller)
            .ok_or_else(missing_ctx)
    }
}

/// Caller context that is guaranteed to carry a user.
#[derive(Debug, Clone)]
pub struct Authenticated(pub CallerCtx);

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Caller(ctx) = Caller::from_request_parts(parts, state).await?;
        if ctx.is_authenticated() {
            Ok(Authenticated(ctx))
        } else if parts.extensions.get::<SignInUnavailable>().is_some() {
            Err(internal_error())
        } else {
            Err(Problem::unauthenticated())
        }
    }
}

fn missing_ctx() -> Problem {
    tracing::error!("CallerCtx not found, resolve_caller middleware is not installed");
    internal_error()
}

fn internal_error() -> Problem {
    Problem::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal Server Error",
        "An internal error occurred",
    )
    .with_code("INTERNAL")
    .with_current_trace()
}

/// Token from `Authorization: Bearer <token>`. The scheme is case-insensitive.
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

fn is_preflight_request(method: &Method, headers: &HeaderMap) -> bool {
    method == Method::OPTIONS
        && headers.contains_key(header::ORIGIN)
        && headers.contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(auth: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(auth).unwrap());
        headers
    }

    #[test]
    fn bearer_scheme_is_case_insensitive() {
        assert_eq!(extract_bearer_token(&headers_with("Bearer abc")), Some("abc"));
        assert_eq!(extract_bearer_token(&headers_with("bearer  abc ")), Some("abc"));
        assert_eq!(extract_bearer_token(&headers_with("BEARER abc")), Some("abc"));
    }

    #[test]
    fn other_schemes_and_empty_tokens_are_ignored() {
        assert_eq!(extract_bearer_token(&headers_with("Basic dXNlcjpwdw==")), None);
        assert_eq!(extract_bearer_token(&headers_with("Bearer ")), None);
        assert_eq!(extract_bearer_token(&headers_with("abc")), None);
        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn preflight_needs_origin_and_requested_method() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ORIGIN, HeaderValue::from_static("http://localhost"));
        assert!(!is_preflight_request(&Method::OPTIONS, &headers));

        headers.insert(
            header::ACCESS_CONTROL_REQUEST_METHOD,
            HeaderValue::from_static("POST"),
        );
        assert!(is_preflight_request(&Method::OPTIONS, &headers));
        assert!(!is_preflight_request(&Method::POST, &headers));
    }
}
