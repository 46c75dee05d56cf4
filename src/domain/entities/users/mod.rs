//! 사용자 관련 엔티티
//!
//! - [`user::UserProfile`] - 토큰에 담기는 사용자 신원 스냅샷
//! - [`user::Role`] - 역할 카탈로그 항목

pub mod user;

pub use user::*;
