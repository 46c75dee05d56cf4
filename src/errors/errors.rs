//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 두 계층으로 나뉩니다.
//!
//! - [`AuthError`]: 토큰 서명/검증, 세션 조회, 역할 판정에서 발생하는 세분화된 도메인 에러.
//!   로깅과 진단에만 사용되며 신뢰 경계 밖으로 그대로 노출되지 않습니다.
//! - [`AppError`]: HTTP 경계에서 사용하는 에러. `From<AuthError>` 변환 시
//!   모든 인증/인가 실패는 불투명한 401로, 저장소/서명 실패는 500으로 축약됩니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::{AppError, AuthError};
//!
//! async fn refresh(req: RefreshRequest) -> Result<Passport, AppError> {
//!     let passport = passport_service.refresh_passport(&req.refresh_token).await?;
//!     Ok(passport)
//! }
//! ```

use thiserror::Error;

/// 인증 코어의 도메인 에러
///
/// 각 변형은 서로 다른 실패 원인을 나타냅니다. 메시지에는 서명 키나
/// 저장소 내부 상태가 포함되지 않아야 합니다.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthError {
    /// 토큰 인코딩 구조가 올바르지 않음 (세그먼트 수, base64, 헤더 JSON)
    #[error("token format is invalid")]
    TokenMalformed,

    /// `now > exp`
    #[error("token had expired")]
    TokenExpired,

    /// `now < nbf`
    #[error("token is not valid yet")]
    TokenNotYetValid,

    /// 헤더의 alg가 HMAC 계열이 아님
    #[error("signing method is invalid")]
    SigningMethodMismatch,

    /// 서명이 선택된 키와 일치하지 않음
    #[error("token signature is invalid")]
    SignatureInvalid,

    /// issuer, audience 또는 sub 라벨이 요청한 토큰 클래스와 다름
    #[error("token class does not match")]
    TokenClassMismatch,

    /// 페이로드가 기대하는 클레임 형태가 아님
    #[error("claims type is invalid")]
    ClaimsTypeInvalid,

    /// 리프레시 토큰에 해당하는 세션 레코드 없음 (폐기되었거나 위조됨)
    #[error("session not found")]
    SessionNotFound,

    /// 역할 값이 단일 비트가 아니거나 역할 폭을 벗어남
    #[error("role is malformed: {0}")]
    MalformedRole(i64),

    /// 위 원인들을 포괄하는 인증 실패
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// 대상 레코드 없음
    #[error("not found: {0}")]
    NotFound(String),

    /// 외부 저장소 사용 불가
    #[error("persistence error: {0}")]
    PersistenceError(String),

    /// 서명 실패. 유효한 키에서는 발생하지 않으므로 설정 오류로 간주합니다.
    #[error("token signing failed: {0}")]
    SigningFailed(String),
}

impl AuthError {
    /// 서버 측 장애(5xx)로 분류되는 에러인지 확인
    pub fn is_server_fault(&self) -> bool {
        matches!(self, AuthError::PersistenceError(_) | AuthError::SigningFailed(_))
    }
}

/// HTTP 경계 에러 타입
///
/// 자동으로 HTTP 응답으로 변환되어 클라이언트에게 전달됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 인증/인가 실패 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        if err.is_server_fault() {
            log::error!("인증 처리 중 서버 오류: {}", err);
            AppError::InternalError("internal server error".to_string())
        } else {
            log::warn!("인증 거부: {}", err);
            AppError::AuthenticationError("no permission to access".to_string())
        }
    }
}

impl actix_web::ResponseError for AppError {
    /// 각 에러 타입을 적절한 HTTP 상태 코드와 JSON 응답으로 변환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        use actix_web::http::StatusCode;

        let status = match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        actix_web::HttpResponse::build(status)
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 인증 코어용 Result 타입 별칭
pub type AuthResult<T> = Result<T, AuthError>;

/// 외부 라이브러리 에러를 AuthError로 변환하는 확장 trait
///
/// 저장소 어댑터에서 드라이버 에러를 `PersistenceError`로 감쌀 때 사용합니다.
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AuthResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AuthResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AuthResult<T> {
        self.map_err(|e| AuthError::PersistenceError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AuthResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AuthError::PersistenceError(format!("{}: {}", f(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("refresh_token is required".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_token_errors_collapse_to_unauthorized() {
        let kinds = vec![
            AuthError::TokenMalformed,
            AuthError::TokenExpired,
            AuthError::SigningMethodMismatch,
            AuthError::SignatureInvalid,
            AuthError::TokenClassMismatch,
            AuthError::ClaimsTypeInvalid,
            AuthError::SessionNotFound,
            AuthError::MalformedRole(3),
            AuthError::NotFound("session".to_string()),
        ];

        for kind in kinds {
            let app_error: AppError = kind.into();
            let response = app_error.error_response();
            assert_eq!(response.status(), actix_web::http::StatusCode::UNAUTHORIZED);
            assert_eq!(app_error.to_string(), "Authentication error: no permission to access");
        }
    }

    #[test]
    fn test_store_errors_collapse_to_server_error() {
        let app_error: AppError = AuthError::PersistenceError("redis: connection refused".to_string()).into();
        let response = app_error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!app_error.to_string().contains("redis"));
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let auth_result = result.context("Additional context");

        if let Err(AuthError::PersistenceError(msg)) = auth_result {
            assert!(msg.contains("Additional context"));
            assert!(msg.contains("original error"));
        } else {
            panic!("Expected PersistenceError");
        }
    }
}
