use async_trait::async_trait;
use thiserror::Error;

use super::Identity;

/// Why a provider refused to produce an [`Identity`].
///
/// The distinction only matters for operators (log level, alerting).
/// Callers of the HTTP API always see the same 401.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerifyError {
    /// The token itself is bad: malformed, expired, wrong issuer/audience, forged.
    #[error("token rejected: {0}")]
    Rejected(String),
    /// The provider could not give an answer (network failure, outage, key fetch failure).
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}

impl VerifyError {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected(reason.into())
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// "Verify token, return claims or fail."
///
/// Any identity-provider SDK can sit behind this trait. The call may suspend
/// on I/O; timeouts are the implementation's concern, not the gate's.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Identity, VerifyError>;
}
