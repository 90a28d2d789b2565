use serde::Serialize;

use crate::services::identity::Identity;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub subject: Option<String>,
    pub claims: Identity,
}

impl From<Identity> for MeResponse {
    fn from(identity: Identity) -> Self {
        Self {
            subject: identity.subject().map(str::to_owned),
            claims: identity,
        }
    }
}
