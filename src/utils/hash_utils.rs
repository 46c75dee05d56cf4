//! # 해시 유틸리티

use sha2::{Digest, Sha256};

/// 토큰 문자열의 SHA-256 지문(소문자 16진수 64자)을 계산합니다.
///
/// 저장소 인덱스 키와 로그에 원본 토큰 대신 사용합니다.
pub fn token_fingerprint(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
