//! CORS policy for the browser client calling the gated API.
//!
//! The surface is read-only (`GET /health`, `GET /api/v1/me`), so preflights
//! only ever grant `GET`. The client sends its token in `Authorization`, which
//! is the one non-simple request header that must be allowed. Credentials mode
//! stays off: no cookies are involved.
//!
//! - Development: any origin.
//! - Production: exact-match allowlist from `CORS_ALLOWED_ORIGINS`; empty allows none.

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;
use crate::middleware::http::REQUEST_ID_HEADER;

const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(60 * 10);

fn allow_origin(config: &Config) -> AllowOrigin {
    if !config.app_env.is_production() {
        return AllowOrigin::from(Any);
    }

    let allowed: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            // a wildcard would defeat the allowlist
            Ok(value) if value != "*" => Some(value),
            _ => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        tracing::warn!("CORS allowlist is empty; browser clients will be refused");
    }

    AllowOrigin::list(allowed)
}

pub fn apply(router: Router, config: &Config) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let cors = CorsLayer::new()
        .allow_origin(allow_origin(config))
        .allow_methods([Method::GET])
        .allow_headers([header::AUTHORIZATION, request_id.clone()])
        // lets the client correlate a 401 with server logs
        .expose_headers([request_id])
        .max_age(PREFLIGHT_MAX_AGE);

    router.layer(cors)
}
