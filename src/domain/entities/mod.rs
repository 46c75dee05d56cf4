//! # Domain Entities
//!
//! 외부 저장소가 보관하는 레코드의 형태를 정의합니다.
//!
//! - [`users`] - 사용자 프로필, 역할
//! - [`sessions`] - 토큰 쌍과 주체를 연결하는 세션 레코드

pub mod users;
pub mod sessions;

pub use users::*;
pub use sessions::*;
