/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - Bearer が必要な範囲はここで route_layer として掛ける
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::{me::me, method_not_allowed};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new().route("/me", get(me).fallback(method_not_allowed));

    // the gate wraps the method fallback too: an unauthenticated POST is a 401
    middleware::auth::apply(protected, state)
}
