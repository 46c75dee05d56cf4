//! User Profile Entity
//!
//! 토큰 발급에 필요한 사용자 신원 스냅샷과 역할 카탈로그 항목입니다.
//! 사용자 레코드 자체의 영속화는 외부 사용자 저장소의 책임입니다.

use serde::{Deserialize, Serialize};

/// 고객 역할 비트
pub const CUSTOMER_ROLE: i64 = 1;

/// 관리자 역할 비트. 경로 파라미터 소유자 검사를 우회합니다.
pub const ADMIN_ROLE: i64 = 2;

/// 사용자 신원 스냅샷
///
/// `role`은 항상 단일 비트 값(1, 2, 4, ...)이어야 합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// 사용자 고유 ID
    pub id: String,
    /// 사용자 역할 (단일 비트)
    pub role: i64,
    /// 이메일 (선택사항)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// 사용자명 (선택사항)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl UserProfile {
    pub fn new(id: impl Into<String>, role: i64) -> Self {
        Self {
            id: id.into(),
            role,
            email: None,
            username: None,
        }
    }
}

/// 역할 카탈로그 항목
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    /// 역할 비트 값
    pub id: i64,
    /// 표시 이름
    pub title: String,
}

impl Role {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }

    /// 기본 역할 목록 (customer, admin)
    pub fn defaults() -> Vec<Role> {
        vec![
            Role::new(CUSTOMER_ROLE, "customer"),
            Role::new(ADMIN_ROLE, "admin"),
        ]
    }
}
