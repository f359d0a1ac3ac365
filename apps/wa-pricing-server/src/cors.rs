use anyhow::{Result, bail};
use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::config::CorsConfig;

/// Build the CORS layer, or `None` when no origin is allowed.
///
/// # Errors
/// Wildcard origins combined with credentials, or an unparsable origin,
/// method or header.
pub fn build_cors_layer(cfg: &CorsConfig) -> Result<Option<CorsLayer>> {
    if cfg.allowed_origins.is_empty() {
        return Ok(None);
    }

    let has_wildcard_origin = cfg.allowed_origins.iter().any(|o| o == "*");
    if has_wildcard_origin && cfg.allow_credentials {
        bail!(
            "CORS misconfiguration: allowed_origins=['*'] cannot be combined with \
             allow_credentials=true; list explicit origins instead"
        );
    }

    let mut layer = CorsLayer::new();

    if has_wildcard_origin {
        layer = layer.allow_origin(Any);
    } else {
        let origins = cfg
            .allowed_origins
            .iter()
            .map(|o| {
                HeaderValue::from_str(o).map_err(|_| anyhow::anyhow!("invalid CORS origin '{o}'"))
            })
            .collect::<Result<Vec<_>>>()?;
        layer = layer.allow_origin(origins);
    }

    if cfg.allowed_methods.iter().any(|m| m == "*") {
        layer = layer.allow_methods(Any);
    } else {
        let methods = cfg
            .allowed_methods
            .iter()
            .map(|m| {
                m.parse::<Method>()
                    .map_err(|_| anyhow::anyhow!("invalid CORS method '{m}'"))
            })
            .collect::<Result<Vec<_>>>()?;
        layer = layer.allow_methods(methods);
    }

    if cfg.allowed_headers.iter().any(|h| h == "*") {
        layer = layer.allow_headers(Any);
    } else {
        let headers = cfg
            .allowed_headers
            .iter()
            .map(|h| {
                h.parse::<HeaderName>()
                    .map_err(|_| anyhow::anyhow!("invalid CORS header '{h}'"))
            })
            .collect::<Result<Vec<_>>>()?;
        layer = layer.allow_headers(headers);
    }

    if cfg.allow_credentials {
        layer = layer.allow_credentials(true);
    }
    if cfg.max_age_seconds > 0 {
        layer = layer.max_age(std::time::Duration::from_secs(cfg.max_age_seconds));
    }

    Ok(Some(layer))
}

/// Log once at startup when any origin may call the API.
pub fn warn_if_wildcard(cfg: &CorsConfig) {
    if cfg.allowed_origins.iter().any(|o| o == "*") {
        warn!(
            "CORS is configured with allowed_origins=['*']. Any website can make \
             cross-origin requests to the API; list explicit origins for production"
        );
    }
}
