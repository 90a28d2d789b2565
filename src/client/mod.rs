/*!
 * Client-side auth context
 *
 * Responsibility:
 * - UI root 全体を一つの AuthProvider の下に置く composition root (bootstrap)
 * - 子孫には AuthHandle を明示的に渡す (グローバル lookup はしない)
 * - トークン検証はしない。サインイン手段は SessionBackend に委譲する
 */
mod bootstrap;
mod provider;

pub use bootstrap::{AppRoot, bootstrap};
pub use provider::{
    AuthHandle, AuthProvider, AuthState, ClientAuthError, Credentials, Session, SessionBackend,
};
