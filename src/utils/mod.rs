//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`bit_utils`] - 역할 비트마스크 변환 유틸리티
//! - [`hash_utils`] - 토큰 지문 계산
//! - [`string_utils`] - 헤더 값 정리 유틸리티

pub mod bit_utils;
pub mod hash_utils;
pub mod string_utils;
