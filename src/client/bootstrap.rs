use std::sync::Arc;

use super::{AuthHandle, AuthProvider, SessionBackend};

/// The application root, built under exactly one [`AuthProvider`].
#[derive(Debug)]
pub struct AppRoot<R> {
    auth: AuthHandle,
    root: R,
}

impl<R> AppRoot<R> {
    pub fn auth(&self) -> &AuthHandle {
        &self.auth
    }

    pub fn root(&self) -> &R {
        &self.root
    }

    pub fn into_parts(self) -> (AuthHandle, R) {
        (self.auth, self.root)
    }
}

/// Composition root: construct the provider once, resolve the initial auth
/// state, then build the UI root with the handle.
///
/// `render` is called once, after the state is resolved, so nothing in the
/// tree observes the provider before it exists.
pub async fn bootstrap<R, F>(backend: Arc<dyn SessionBackend>, render: F) -> AppRoot<R>
where
    F: FnOnce(AuthHandle) -> R,
{
    let auth: AuthHandle = Arc::new(AuthProvider::new(backend));
    auth.initialize().await;

    let root = render(Arc::clone(&auth));
    AppRoot { auth, root }
}
