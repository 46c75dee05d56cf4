//! 시간 소스 추상화
//!
//! 토큰 발급/검증은 모두 주입된 [`Clock`]의 `now()`를 기준으로 합니다.
//! 운영에서는 [`SystemClock`], 테스트에서는 [`ManualClock`]을 사용해
//! 만료 경계를 결정적으로 재현합니다.

use std::sync::RwLock;
use chrono::{DateTime, Duration, TimeZone, Utc};

/// 현재 시각을 제공하는 시간 소스
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// 현재 시각 (Unix timestamp, 초)
    fn timestamp(&self) -> i64 {
        self.now().timestamp()
    }
}

/// 시스템 시계
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 수동으로 설정하고 전진시킬 수 있는 시계
#[derive(Debug)]
pub struct ManualClock {
    current: RwLock<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            current: RwLock::new(start),
        }
    }

    /// Unix timestamp(초)에서 시작하는 시계를 생성합니다.
    pub fn at_timestamp(secs: i64) -> Self {
        let start = Utc.timestamp_opt(secs, 0).single().unwrap_or_else(Utc::now);
        Self::new(start)
    }

    pub fn set(&self, at: DateTime<Utc>) {
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        *current = at;
    }

    pub fn advance(&self, by: Duration) {
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        *current += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current.read().unwrap_or_else(|e| e.into_inner())
    }
}
