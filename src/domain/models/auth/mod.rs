//! 요청 단위 인증 모델
//!
//! - [`authenticated_user::AuthorizedUser`] - Access Gate 통과 후 핸들러에 노출되는 호출자
//! - [`authentication_request::AuthMode`] - 미들웨어가 적용할 인증 방식

pub mod authenticated_user;
pub mod authentication_request;

pub use authenticated_user::*;
pub use authentication_request::*;
