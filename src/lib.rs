//! 패스포트 인증 서비스
//!
//! 사용자 세션에 대한 서명 토큰 쌍(패스포트)을 발급, 검증, 갱신, 폐기하고
//! 비트 위치 기반 역할 판정으로 요청을 인가하는 서비스입니다.
//!
//! # Features
//!
//! - **토큰 클래스**: 액세스/리프레시, 관리자용 Elevated, 머신 키(API Key)
//! - **세션 기반 폐기**: 저장된 세션 레코드가 없으면 만료 전 토큰도 거부
//! - **역할 판정**: 단일 비트 역할과 허용 목록 비트마스크의 위치별 비교
//! - **저장소 선택**: 인메모리 또는 Redis(세션) + MongoDB(사용자, 역할)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트, AuthMiddleware
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← TokenService, PassportService, RoleService, AccessGate
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← CredentialStore, UserProfileStore, RoleCatalog
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ Redis + MongoDB │ ← 저장소 (또는 인메모리)
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use passport_auth::services::auth::{PassportService, TokenService};
//!
//! let tokens = Arc::new(TokenService::new(keys, clock.clone()));
//! let passports = PassportService::new(tokens, sessions, profiles, clock);
//! let passport = passports.issue_passport(&profile).await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
