//! # 문자열 유틸리티
//!
//! 인증 헤더 값을 정리하는 함수들입니다.

/// Bearer 토큰 접두사 (대소문자 구분)
pub const BEARER_PREFIX: &str = "Bearer ";

/// `"Bearer "` 접두사가 있으면 제거합니다.
///
/// 접두사가 없으면 입력을 그대로 돌려주므로 원시 토큰 문자열도 허용됩니다.
/// 대소문자를 구분하므로 `"bearer "`는 제거되지 않습니다.
///
/// # 예제
/// ```rust,ignore
/// use crate::utils::string_utils::strip_bearer_prefix;
///
/// assert_eq!(strip_bearer_prefix("Bearer abc.def.ghi"), "abc.def.ghi");
/// assert_eq!(strip_bearer_prefix("abc.def.ghi"), "abc.def.ghi");
/// ```
pub fn strip_bearer_prefix(value: &str) -> &str {
    value.strip_prefix(BEARER_PREFIX).unwrap_or(value)
}

/// 선택적 헤더 값 정리
///
/// 값이 없거나 공백뿐이면 `None`, 그렇지 않으면 앞뒤 공백을 제거한 문자열을 반환합니다.
pub fn clean_header_value(value: Option<&str>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
