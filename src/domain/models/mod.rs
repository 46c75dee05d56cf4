//! # Domain Models Module
//!
//! 토큰 페이로드와 요청 단위 인증 정보처럼 영속화되지 않는 값 객체를 정의합니다.
//!
//! ## Entities vs Models 구분
//!
//! - `../entities/` - 외부 저장소가 보관하는 레코드 (`UserProfile`, `SessionRecord`)
//! - `./` - 서명된 토큰 안에만 존재하거나 요청 처리 중에만 존재하는 값
//!
//! ## 모듈 구성
//!
//! ```text
//! models/
//! ├── token/   ← TokenClass, Claims, Passport
//! └── auth/    ← AuthorizedUser, AuthMode
//! ```

pub mod token;
pub mod auth;

pub use token::*;
pub use auth::*;
