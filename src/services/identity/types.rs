/*
 * Responsibility
 * - 検証済みトークンから得られる主体 (Identity) の型
 * - claims は opaque な map として保持し、よく使うものだけ accessor を用意する
 */
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// Claims returned by an identity provider after a token verified successfully.
///
/// The gate never builds one of these itself; it only forwards what the
/// provider returned. Handlers receive it read-only through request extensions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Identity {
    claims: Map<String, Value>,
}

impl Identity {
    pub fn new(claims: Map<String, Value>) -> Self {
        Self { claims }
    }

    pub fn claims(&self) -> &Map<String, Value> {
        &self.claims
    }

    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }

    /// `sub`, or Firebase-style `uid` when a provider reports that instead.
    pub fn subject(&self) -> Option<&str> {
        self.claim("sub")
            .or_else(|| self.claim("uid"))
            .and_then(Value::as_str)
    }

    pub fn issuer(&self) -> Option<&str> {
        self.claim("iss").and_then(Value::as_str)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.claim("exp")
            .and_then(Value::as_i64)
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    pub fn into_claims(self) -> Map<String, Value> {
        self.claims
    }
}

impl From<Map<String, Value>> for Identity {
    fn from(claims: Map<String, Value>) -> Self {
        Self::new(claims)
    }
}
