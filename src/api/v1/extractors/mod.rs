mod identity_ctx;

pub use identity_ctx::CurrentIdentity;
