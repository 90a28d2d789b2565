use std::sync::Arc;

use async_trait::async_trait;
use axum::http::HeaderValue;
use thiserror::Error;
use tokio::sync::watch;

use crate::services::identity::Identity;

/// What the user hands the sign-in flow.
#[derive(Debug, Clone)]
pub enum Credentials {
    EmailPassword { email: String, password: String },
    /// Token minted by a federated/popup flow outside this process.
    Federated { provider_id: String, token: String },
}

/// A signed-in user as seen by the client: the bearer token it sends and
/// the claims the identity provider reported for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub identity: Identity,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum AuthState {
    /// Startup: the backend has not said yet whether a session exists.
    #[default]
    Pending,
    SignedOut,
    SignedIn(Session),
}

impl AuthState {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::SignedIn(session) => Some(session),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClientAuthError {
    #[error("sign-in rejected: {0}")]
    Rejected(String),
    #[error("identity backend unavailable: {0}")]
    Unavailable(String),
}

/// The identity provider's client SDK, reduced to what the provider needs.
#[async_trait]
pub trait SessionBackend: Send + Sync {
    /// Previously persisted session, if any. Called once at startup.
    async fn restore(&self) -> Result<Option<Session>, ClientAuthError>;

    async fn sign_in(&self, credentials: Credentials) -> Result<Session, ClientAuthError>;

    async fn sign_out(&self, session: &Session) -> Result<(), ClientAuthError>;
}

/// Holds the current [`AuthState`] and publishes every change to subscribers.
pub struct AuthProvider {
    backend: Arc<dyn SessionBackend>,
    state: watch::Sender<AuthState>,
}

/// What descendants of the UI root receive.
pub type AuthHandle = Arc<AuthProvider>;

impl std::fmt::Debug for AuthProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // tokens are not printed
        f.debug_struct("AuthProvider")
            .field("resolved", &self.is_resolved())
            .field("signed_in", &self.current_identity().is_some())
            .finish()
    }
}

impl AuthProvider {
    pub fn new(backend: Arc<dyn SessionBackend>) -> Self {
        let (state, _) = watch::channel(AuthState::Pending);
        Self { backend, state }
    }

    /// Resolve the initial state from the backend. A backend failure leaves
    /// the user signed out rather than stuck in `Pending`.
    pub async fn initialize(&self) {
        let next = match self.backend.restore().await {
            Ok(Some(session)) => AuthState::SignedIn(session),
            Ok(None) => AuthState::SignedOut,
            Err(err) => {
                tracing::warn!(error = %err, "could not restore session");
                AuthState::SignedOut
            }
        };
        self.state.send_replace(next);
    }

    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn is_resolved(&self) -> bool {
        self.state.borrow().is_resolved()
    }

    pub fn current_identity(&self) -> Option<Identity> {
        self.state.borrow().session().map(|s| s.identity.clone())
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().session().map(|s| s.token.clone())
    }

    /// `Authorization` value for calls to gated routes.
    pub fn authorization_header(&self) -> Option<HeaderValue> {
        let token = self.token()?;
        let mut value = HeaderValue::from_str(&format!("Bearer {token}")).ok()?;
        value.set_sensitive(true);
        Some(value)
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// On failure the previous state is kept.
    pub async fn sign_in(&self, credentials: Credentials) -> Result<Identity, ClientAuthError> {
        let session = self.backend.sign_in(credentials).await?;
        let identity = session.identity.clone();
        tracing::debug!(subject = ?identity.subject(), "signed in");
        self.state.send_replace(AuthState::SignedIn(session));
        Ok(identity)
    }

    /// Local state is cleared even if the backend call fails.
    pub async fn sign_out(&self) -> Result<(), ClientAuthError> {
        let previous = self.state.send_replace(AuthState::SignedOut);
        match previous {
            AuthState::SignedIn(session) => self.backend.sign_out(&session).await,
            _ => Ok(()),
        }
    }
}
