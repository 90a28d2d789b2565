pub mod factory;
pub mod jwt;
pub mod provider;
pub mod types;

pub use factory::build_identity_provider;
pub use jwt::JwtIdentityProvider;
pub use provider::{IdentityProvider, VerifyError};
pub use types::Identity;
