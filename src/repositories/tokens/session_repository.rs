use std::sync::Arc;

use async_trait::async_trait;
use redis::Pipeline;

use crate::caching::redis::RedisClient;
use crate::core::Clock;
use crate::domain::entities::SessionRecord;
use crate::errors::{AuthResult, ErrorContext};
use crate::repositories::ports::CredentialStore;
use crate::utils::hash_utils::token_fingerprint;

/// Redis 기반 세션 레코드 저장소
///
/// 레코드 하나당 세 개의 키를 사용합니다. 토큰 문자열은 SHA-256 지문으로만 키에 들어갑니다.
///
/// | 키 | 값 |
/// |----|----|
/// | `session:{id}` | 레코드 JSON |
/// | `session:refresh:{fp(refresh_token)}` | 세션 id |
/// | `session:access:{subject_id}:{fp(access_token)}` | 세션 id |
///
/// 모든 키의 TTL은 리프레시 토큰의 남은 수명입니다. 만료된 세션은 Redis가 정리합니다.
pub struct RedisSessionRepository {
    redis: Arc<RedisClient>,
    clock: Arc<dyn Clock>,
}

impl RedisSessionRepository {
    pub fn new(redis: Arc<RedisClient>, clock: Arc<dyn Clock>) -> Self {
        Self { redis, clock }
    }

    fn record_key(session_id: &str) -> String {
        format!("session:{}", session_id)
    }

    fn refresh_key(refresh_token: &str) -> String {
        format!("session:refresh:{}", token_fingerprint(refresh_token))
    }

    fn access_key(subject_id: &str, access_token: &str) -> String {
        format!("session:access:{}:{}", subject_id, token_fingerprint(access_token))
    }

    /// 리프레시 토큰 만료까지 남은 초. 최소 1초
    fn ttl_seconds(&self, record: &SessionRecord) -> u64 {
        (record.expires_at - self.clock.timestamp()).max(1) as u64
    }

    async fn load(&self, session_id: &str) -> AuthResult<Option<SessionRecord>> {
        self.redis
            .get::<SessionRecord>(&Self::record_key(session_id))
            .await
            .context("세션 레코드 조회 실패")
    }

    /// 이전 세션 키 삭제와 새 레코드/인덱스 저장을 하나의 MULTI/EXEC 파이프라인으로 묶습니다.
    fn swap_pipeline(previous: Option<&SessionRecord>, record: &SessionRecord, ttl: u64) -> AuthResult<Pipeline> {
        let json = serde_json::to_string(record).context("세션 레코드 직렬화 실패")?;

        let mut pipe = redis::pipe();
        pipe.atomic();
        if let Some(previous) = previous {
            pipe.del(Self::session_keys(previous)).ignore();
        }
        pipe.set_ex(Self::record_key(&record.id), json, ttl)
            .ignore()
            .set_ex(Self::refresh_key(&record.refresh_token), &record.id, ttl)
            .ignore()
            .set_ex(Self::access_key(&record.subject_id, &record.access_token), &record.id, ttl)
            .ignore();
        Ok(pipe)
    }

    fn session_keys(record: &SessionRecord) -> Vec<String> {
        vec![
            Self::record_key(&record.id),
            Self::refresh_key(&record.refresh_token),
            Self::access_key(&record.subject_id, &record.access_token),
        ]
    }
}

#[async_trait]
impl CredentialStore for RedisSessionRepository {
    async fn put_session(&self, record: &SessionRecord) -> AuthResult<()> {
        let pipe = Self::swap_pipeline(None, record, self.ttl_seconds(record))?;
        self.redis.exec_atomic(&pipe).await.context("세션 저장 실패")?;
        log::debug!("세션 저장 - session_id: {}, subject: {}", record.id, record.subject_id);
        Ok(())
    }

    async fn find_by_refresh_token(&self, refresh_token: &str) -> AuthResult<Option<SessionRecord>> {
        let session_id = self
            .redis
            .get_string(&Self::refresh_key(refresh_token))
            .await
            .context("리프레시 토큰 인덱스 조회 실패")?;

        match session_id {
            Some(id) => Ok(self
                .load(&id)
                .await?
                .filter(|record| record.refresh_token == refresh_token)),
            None => Ok(None),
        }
    }

    async fn has_access_token(&self, subject_id: &str, access_token: &str) -> AuthResult<bool> {
        self.redis
            .exists(&Self::access_key(subject_id, access_token))
            .await
            .context("액세스 토큰 인덱스 조회 실패")
    }

    async fn update_session(&self, record: &SessionRecord) -> AuthResult<bool> {
        let Some(previous) = self.load(&record.id).await? else {
            return Ok(false);
        };

        let pipe = Self::swap_pipeline(Some(&previous), record, self.ttl_seconds(record))?;
        self.redis.exec_atomic(&pipe).await.context("세션 교체 실패")?;
        log::debug!("세션 교체 - session_id: {}", record.id);
        Ok(true)
    }

    async fn delete_session(&self, session_id: &str) -> AuthResult<bool> {
        let Some(record) = self.load(session_id).await? else {
            return Ok(false);
        };

        self.redis
            .del_multiple(&Self::session_keys(&record))
            .await
            .context("세션 키 삭제 실패")?;
        log::debug!("세션 삭제 - session_id: {}", session_id);
        Ok(true)
    }
}
