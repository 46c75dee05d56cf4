//! JWT 클레임 구조체와 토큰 클래스 템플릿
//!
//! 토큰 페이로드의 JSON 형태는 다음과 같습니다. 사용자 신원이 없는
//! Elevated/MachineKey 토큰은 `claims`가 `null`입니다.
//!
//! ```text
//! {
//!   "claims": { "id": "u1", "role": 1 },
//!   "iss": "application-api",
//!   "sub": "access-token",
//!   "aud": ["customer", "admin"],
//!   "exp": 1700000900,
//!   "nbf": 1700000000,
//!   "iat": 1700000000,
//!   "jti": "4f0c7a1e-..."
//! }
//! ```
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::UserProfile;

/// 모든 토큰의 발급자
pub const TOKEN_ISSUER: &str = "application-api";

/// Elevated 토큰 수명 (초)
pub const ELEVATED_TOKEN_LIFETIME_SECS: i64 = 300;

/// MachineKey 토큰 수명 (년)
pub const MACHINE_KEY_LIFETIME_YEARS: u32 = 2;

/// 서명된 토큰 문자열. `header.claims.signature` 형태의 base64url 세그먼트입니다.
pub type SignedToken = String;

/// 토큰 클래스
///
/// 클래스마다 서명 키, `sub` 라벨, `aud` 목록, 기본 수명이 고정되어 있습니다.
/// 서명 키와 수명은 `KeyConfig`에서 결정되므로 서비스 계층에서 선택합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    StandardAccess,
    StandardRefresh,
    Elevated,
    MachineKey,
}

impl TokenClass {
    /// 모든 토큰 클래스
    pub const ALL: [TokenClass; 4] = [
        TokenClass::StandardAccess,
        TokenClass::StandardRefresh,
        TokenClass::Elevated,
        TokenClass::MachineKey,
    ];

    /// 토큰의 `sub` 라벨
    pub fn subject_label(&self) -> &'static str {
        match self {
            TokenClass::StandardAccess => "access-token",
            TokenClass::StandardRefresh => "refresh-token",
            TokenClass::Elevated => "admin-token",
            TokenClass::MachineKey => "api-token",
        }
    }

    /// 토큰의 `aud` 목록
    pub fn audience(&self) -> &'static [&'static str] {
        match self {
            TokenClass::StandardAccess | TokenClass::StandardRefresh => &["customer", "admin"],
            TokenClass::Elevated => &["admin"],
            TokenClass::MachineKey => &["admin", "customer"],
        }
    }

    /// 사용자 신원(`claims`)을 반드시 포함해야 하는 클래스인지 확인
    pub fn carries_identity(&self) -> bool {
        matches!(self, TokenClass::StandardAccess | TokenClass::StandardRefresh)
    }
}

impl std::fmt::Display for TokenClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.subject_label())
    }
}

/// 토큰에 담기는 사용자 신원
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaims {
    /// 사용자 ID
    pub id: String,
    /// 사용자 역할 (단일 비트)
    pub role: i64,
}

impl UserClaims {
    pub fn new(id: impl Into<String>, role: i64) -> Self {
        Self { id: id.into(), role }
    }
}

impl From<&UserProfile> for UserClaims {
    fn from(profile: &UserProfile) -> Self {
        Self::new(profile.id.clone(), profile.role)
    }
}

/// JWT 토큰의 클레임(Payload) 구조체
///
/// RFC 7519 등록 클레임과 사용자 신원을 포함합니다.
/// 불변식: `nbf <= iat <= exp`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// 사용자 신원. Elevated/MachineKey 토큰에서는 `None`
    pub claims: Option<UserClaims>,
    /// 발급자 (항상 `application-api`)
    pub iss: String,
    /// 토큰 클래스 라벨
    pub sub: String,
    /// 대상 목록
    pub aud: Vec<String>,
    /// 만료 시간 (Unix timestamp)
    pub exp: i64,
    /// 유효 시작 시간 (Unix timestamp)
    pub nbf: i64,
    /// 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// 토큰 고유 ID. 같은 초에 같은 클레임으로 발급해도 토큰 문자열이 달라집니다.
    #[serde(default)]
    pub jti: String,
}

impl Claims {
    /// 클래스 템플릿으로 클레임을 구성합니다.
    pub fn for_class(
        class: TokenClass,
        identity: Option<&UserClaims>,
        issued_at: i64,
        expires_at: i64,
    ) -> Self {
        Self {
            claims: identity.cloned(),
            iss: TOKEN_ISSUER.to_string(),
            sub: class.subject_label().to_string(),
            aud: class.audience().iter().map(|a| a.to_string()).collect(),
            exp: expires_at,
            nbf: issued_at,
            iat: issued_at,
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// 주체 사용자 ID. 신원이 없으면 빈 문자열
    pub fn subject_id(&self) -> &str {
        self.claims.as_ref().map(|c| c.id.as_str()).unwrap_or("")
    }

    /// 주체 역할. 신원이 없으면 0
    pub fn role(&self) -> i64 {
        self.claims.as_ref().map(|c| c.role).unwrap_or(0)
    }
}

/// 패스포트의 토큰 부분
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassportToken {
    /// 세션 레코드 ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub access_token: SignedToken,
    pub refresh_token: SignedToken,
}

/// 인증된 사용자에게 발급되는 액세스/리프레시 토큰 쌍
///
/// 리프레시 시 변경되지 않고 새 패스포트로 대체됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passport {
    pub user: UserProfile,
    pub token: PassportToken,
}
