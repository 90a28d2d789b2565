/*!
 * Identity extractor
 *
 * Responsibility:
 * - gate が request extensions に入れた Identity を handler に渡す
 * - 型 (Identity) は services::identity 側、ここは axum との接点のみ
 */

mod core;

pub use core::CurrentIdentity;
