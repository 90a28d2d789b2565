/*!
 * Bearer token authentication gate
 *
 * Public API:
 * - apply (router に gate を掛ける)
 * - authenticate / extract_bearer (axum 非依存で単体テスト可能なコア)
 * - AuthError
 */
mod gate;

pub use gate::{AuthError, apply, authenticate, extract_bearer, gate};
