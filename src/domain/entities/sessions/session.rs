//! Session Record Entity
//!
//! 주체(사용자)와 현재 유효한 토큰 쌍을 연결하는 세션 레코드입니다.
//! Access Gate는 요청마다 이 레코드의 존재 여부로 폐기 여부를 판단합니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 세션 레코드
///
/// 생명주기: 발급 시 생성 → 리프레시 시 토큰 쌍만 교체(동일 id 유지) → 로그아웃 시 삭제
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// 세션 ID (UUID v4)
    pub id: String,
    /// 주체 사용자 ID
    pub subject_id: String,
    /// 현재 액세스 토큰
    pub access_token: String,
    /// 현재 리프레시 토큰
    pub refresh_token: String,
    /// 리프레시 토큰 만료 시각 (Unix timestamp). 저장소 TTL 계산용
    pub expires_at: i64,
    /// 최초 발급 시각
    pub created_at: DateTime<Utc>,
    /// 마지막 교체 시각
    pub updated_at: DateTime<Utc>,
}

impl SessionRecord {
    /// 새 세션 레코드를 생성합니다.
    pub fn new(
        subject_id: impl Into<String>,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires_at: i64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            subject_id: subject_id.into(),
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            expires_at,
            created_at: now,
            updated_at: now,
        }
    }

    /// 같은 세션 ID를 유지한 채 토큰 쌍을 교체한 레코드를 반환합니다.
    pub fn rotated(
        &self,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            updated_at: now,
            ..self.clone()
        }
    }
}
