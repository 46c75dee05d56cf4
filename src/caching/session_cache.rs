//! 세션 조회 결과 캐시
//!
//! Access Gate가 요청마다 수행하는 `(subject_id, access_token)` 세션 조회 앞에 두는
//! 프로세스 로컬 캐시입니다. 존재가 확인된 조회 결과만 TTL 동안 보관하므로,
//! 폐기(로그아웃)는 최대 TTL초 뒤에 모든 요청에 반영됩니다.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::TimeDelta;

use crate::core::Clock;
use crate::utils::hash_utils::token_fingerprint;

/// 긍정 조회 결과 TTL 캐시
pub struct SessionCache {
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
    /// 지문 → 만료 시각 (Unix timestamp)
    entries: RwLock<HashMap<String, i64>>,
}

impl SessionCache {
    /// `ttl_secs` 동안 조회 결과를 보관하는 캐시를 생성합니다.
    pub fn new(ttl_secs: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl: i64::try_from(ttl_secs)
                .ok()
                .and_then(TimeDelta::try_seconds)
                .unwrap_or(TimeDelta::MAX),
            clock,
            entries: RwLock::new(HashMap::new()),
        }
    }

    fn key(subject_id: &str, access_token: &str) -> String {
        format!("{}:{}", subject_id, token_fingerprint(access_token))
    }

    /// 유효한 캐시 항목이 있는지 확인합니다.
    pub fn contains(&self, subject_id: &str, access_token: &str) -> bool {
        let now = self.clock.timestamp();
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries
            .get(&Self::key(subject_id, access_token))
            .is_some_and(|expires_at| now < *expires_at)
    }

    /// 세션 존재가 확인된 조회 결과를 기록합니다.
    pub fn remember(&self, subject_id: &str, access_token: &str) {
        let now = self.clock.timestamp();
        let expires_at = now.saturating_add(self.ttl.num_seconds());
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.retain(|_, exp| now < *exp);
        entries.insert(Self::key(subject_id, access_token), expires_at);
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ManualClock;
    use chrono::Duration;

    #[test]
    fn test_entries_expire_after_ttl() {
        let clock = Arc::new(ManualClock::at_timestamp(1_000));
        let cache = SessionCache::new(5, clock.clone());

        cache.remember("u1", "token");
        assert!(cache.contains("u1", "token"));
        assert!(!cache.contains("u2", "token"));

        clock.advance(Duration::seconds(4));
        assert!(cache.contains("u1", "token"));

        clock.advance(Duration::seconds(1));
        assert!(!cache.contains("u1", "token"));
    }

    #[test]
    fn test_expired_entries_are_purged() {
        let clock = Arc::new(ManualClock::at_timestamp(0));
        let cache = SessionCache::new(10, clock.clone());

        cache.remember("u1", "b");
        clock.advance(Duration::seconds(11));
        cache.remember("u2", "c");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_oversized_ttl_saturates() {
        let clock = Arc::new(ManualClock::at_timestamp(1_000));
        let cache = SessionCache::new(10_000_000_000_000_000, clock.clone());

        cache.remember("u1", "token");
        clock.advance(Duration::days(365 * 100));
        assert!(cache.contains("u1", "token"));
    }
}
