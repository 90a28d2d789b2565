/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth: bearer gate (保護ルートのみ)
 * - http / cors / security_headers: 全ルート共通
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
