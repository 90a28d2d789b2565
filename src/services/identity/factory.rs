/// Factory: build the process-wide `IdentityProvider` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::identity::{IdentityProvider, JwtIdentityProvider, jwt::JwtProviderError};

pub fn build_identity_provider(
    config: &Config,
) -> Result<Arc<dyn IdentityProvider>, JwtProviderError> {
    let provider = JwtIdentityProvider::new(
        &config.auth_jwt_public_key_pem,
        config.auth_jwt_algorithm,
        &config.auth_issuer,
        &config.auth_audience,
        config.access_token_leeway_seconds,
    )?;

    tracing::info!(
        algorithm = ?config.auth_jwt_algorithm,
        issuer = %config.auth_issuer,
        audience = %config.auth_audience,
        "identity provider ready"
    );

    Ok(Arc::new(provider))
}
