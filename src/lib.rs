/*
 * Responsibility
 * - server (bearer gate) と client (auth bootstrap) のモジュール公開
 * - integration tests からも同じ Router を組み立てられるようにする
 */
pub mod api;
pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
