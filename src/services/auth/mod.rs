//! 인증 및 인가 서비스 모듈
//!
//! - [`TokenService`]: 토큰 클래스별 HMAC 서명과 검증
//! - [`RoleService`]: 비트 위치 기반 역할 판정
//! - [`PassportService`]: 패스포트 발급, 리프레시, 폐기와 특수 토큰 발급
//! - [`AccessGate`]: 요청 단위 인증/인가

pub mod token_service;
pub mod role_service;
pub mod passport_service;
pub mod access_gate;

pub use token_service::TokenService;
pub use role_service::RoleService;
pub use passport_service::PassportService;
pub use access_gate::AccessGate;
