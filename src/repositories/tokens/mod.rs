//! 세션 레코드 저장소 모듈
//!
//! Redis를 사용하여 주체와 토큰 쌍을 연결하는 세션 레코드를 관리합니다.
//!
//! # Features
//!
//! - **리프레시 토큰 인덱스**: 리프레시 시 세션 조회
//! - **액세스 토큰 인덱스**: 요청마다 폐기 여부 확인
//! - **TTL 자동 관리**: 리프레시 토큰 만료와 함께 레코드 자동 삭제
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::repositories::tokens::RedisSessionRepository;
//!
//! let sessions = RedisSessionRepository::new(redis, clock);
//! sessions.put_session(&record).await?;
//! ```

pub mod session_repository;

pub use session_repository::*;
