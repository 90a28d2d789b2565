//! Bearer token 検証 → Identity を extensions に入れる
//!
//! Per request: `Start → token present? → Extracted → verify → Authorized | Rejected`.
//! Nothing survives between requests; the provider is shared read-only.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};
use thiserror::Error;

use crate::error::AppError;
use crate::services::identity::{Identity, IdentityProvider, VerifyError};
use crate::state::AppState;

const BEARER: &str = "Bearer ";

/// Internal reason a request was refused. Both variants become the same 401.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing or malformed bearer token")]
    MissingToken,
    #[error("invalid token: {0}")]
    InvalidToken(#[source] VerifyError),
}

/// Take the token out of `Authorization`.
///
/// The token is everything after the first `Bearer `; it is not trimmed or
/// otherwise canonicalized. An empty remainder counts as no token.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    let (_, token) = value.split_once(BEARER).ok_or(AuthError::MissingToken)?;
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }

    Ok(token)
}

/// Extract and verify. Does not touch the request; the caller decides what to attach.
pub async fn authenticate(
    provider: &dyn IdentityProvider,
    headers: &HeaderMap,
) -> Result<Identity, AuthError> {
    let token = extract_bearer(headers)?;
    provider.verify(token).await.map_err(AuthError::InvalidToken)
}

/// 保護したい Router に gate を適用する。
///
/// ```ignore
/// let protected = Router::new().route("/me", get(me));
/// let v1 = middleware::auth::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // route_layer: 未マッチのパスは 401 ではなく 404 のまま
    router.route_layer(middleware::from_fn_with_state(state, gate))
}

pub async fn gate(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let identity = match authenticate(state.identity.as_ref(), req.headers()).await {
        Ok(identity) => identity,
        Err(err) => {
            match &err {
                AuthError::MissingToken => tracing::debug!("request without bearer token"),
                AuthError::InvalidToken(cause) if cause.is_unavailable() => {
                    tracing::error!(error = %cause, "identity provider unavailable")
                }
                AuthError::InvalidToken(cause) => {
                    tracing::warn!(error = %cause, "bearer token verification failed")
                }
            }
            return Err(err.into());
        }
    };

    tracing::debug!(subject = ?identity.subject(), "request authenticated");

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
