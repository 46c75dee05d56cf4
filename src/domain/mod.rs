//! # Domain Layer Module
//!
//! 인증 코어가 다루는 데이터 형태를 정의합니다. 비즈니스 규칙은
//! `services` 계층에 있고, 이 모듈은 순수한 데이터와 작은 생성자만 가집니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Entities  - 외부 저장소 레코드 (UserProfile, Role, SessionRecord)
//! ├── Models    - 토큰 페이로드와 요청 단위 값 (Claims, Passport, AuthorizedUser)
//! └── DTOs      - HTTP 요청/응답 본문
//!      │
//!      ▼
//! Application Layer (services::auth)
//!      │
//!      ▼
//! Infrastructure Layer (repositories, caching, db)
//! ```

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::*;
pub use dto::*;
pub use models::*;
