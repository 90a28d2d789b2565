/*
 * Responsibility
 * - GET /api/v1/me
 * - gate が付与した Identity をそのまま返す (保護ルートの参照実装)
 */
use axum::Json;

use crate::api::v1::dto::me::MeResponse;
use crate::api::v1::extractors::CurrentIdentity;

pub async fn me(CurrentIdentity(identity): CurrentIdentity) -> Json<MeResponse> {
    Json(MeResponse::from(identity))
}
