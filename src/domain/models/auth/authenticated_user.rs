use std::future::{ready, Ready};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::domain::entities::ADMIN_ROLE;

/// Access Gate를 통과한 호출자 정보
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizedUser {
    /// 사용자 고유 ID
    pub subject_id: String,

    /// 사용자 역할 (단일 비트)
    pub role: i64,
}

impl AuthorizedUser {
    pub fn new(subject_id: impl Into<String>, role: i64) -> Self {
        Self {
            subject_id: subject_id.into(),
            role,
        }
    }

    /// 관리자 권한을 보유하고 있는지 확인
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

/// ActixWeb FromRequest trait 구현
///
/// `AuthMiddleware`가 요청 확장에 넣어 둔 사용자를 꺼냅니다.
impl FromRequest for AuthorizedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthorizedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "no permission to access"
            ))),
        }
    }
}
