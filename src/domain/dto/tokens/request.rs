//! 토큰 관련 요청 DTO
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 토큰 갱신 요청 DTO
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshRequest {
    /// 기존 리프레시 토큰
    #[validate(length(min = 1, message = "refresh_token은 필수입니다"))]
    pub refresh_token: String,
}

/// 로그아웃 요청 DTO
///
/// 패스포트 발급 시 전달된 세션 레코드 ID(`token.id`)를 받습니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignOutRequest {
    #[validate(length(min = 1, message = "oauth_id는 필수입니다"))]
    pub oauth_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_fields_are_rejected() {
        let refresh = RefreshRequest { refresh_token: String::new() };
        let sign_out = SignOutRequest { oauth_id: String::new() };

        assert!(refresh.validate().is_err());
        assert!(sign_out.validate().is_err());
    }

    #[test]
    fn test_sign_out_request_from_json() {
        let request: SignOutRequest =
            serde_json::from_str(r#"{"oauth_id":"5d1f"}"#).unwrap();

        assert!(request.validate().is_ok());
        assert_eq!(request.oauth_id, "5d1f");
    }
}
