//! 사용자 데이터 액세스 모듈
//!
//! [`MongoUserRepository`](user_repo::MongoUserRepository)가 MongoDB에서
//! 사용자 프로필과 역할 카탈로그를 읽습니다.

pub mod user_repo;

pub use user_repo::*;
