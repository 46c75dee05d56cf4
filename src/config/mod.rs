//! # Configuration Module
//!
//! 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수(`.env` 파일 포함) 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`auth_config`] - 토큰 클래스별 서명 키, 토큰 수명
//! - [`data_config`] - 서버, 저장소 백엔드
//!
//! ## 설계 원칙
//!
//! - 서명 키는 환경 변수로만 제공되며, 누락 시 서비스가 시작되지 않습니다
//! - 로드된 [`KeyConfig`]는 불변 값이며 `Arc`로 서비스에 주입됩니다
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::config::{KeyConfig, ServerConfig};
//!
//! let keys = Arc::new(KeyConfig::from_env()?);
//! let bind_address = ServerConfig::bind_address();
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
