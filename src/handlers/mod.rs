//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들입니다. 인증 코어 서비스는 `web::Data`로 주입되고,
//! 보호된 핸들러는 미들웨어가 넣어 둔 [`AuthorizedUser`](crate::domain::models::auth::AuthorizedUser)를 인자로 받습니다.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   AuthMiddleware (AccessGate)                   ← 인증/인가
//! ├─────────────────────────────────────────────┤
//!   Handlers (이 모듈)                             ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   PassportService / ports                       ← Service Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! 서비스 에러는 `?`로 `AppError`에 변환되어 401 또는 500 응답이 됩니다.
//! 입력 DTO는 `validator`로 검증하며 실패하면 400을 반환합니다.

pub mod users;
pub mod appinfo;
