//! # Data Transfer Objects (DTO) Module
//!
//! HTTP 경계에서 주고받는 요청/응답 본문을 정의합니다.
//! 요청 DTO는 `validator` crate로 검증한 뒤 서비스 계층에 전달합니다.
//!
//! ```text
//! dto/
//! └── tokens/
//!     ├── request.rs   # RefreshRequest, SignOutRequest
//!     └── response.rs  # ApiResponse, ElevatedTokenResponse, MachineKeyResponse
//! ```
//!
//! 패스포트 응답은 도메인 모델 `Passport`를 그대로 직렬화합니다.

pub mod tokens;

pub use tokens::*;
