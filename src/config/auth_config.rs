//! # Authentication Configuration Module
//!
//! 토큰 클래스별 서명 키와 만료 시간을 관리하는 모듈입니다.
//!
//! 프로세스 시작 시 한 번 로드되어 [`KeyConfig`] 값으로 고정되며,
//! 이후에는 읽기 전용으로 `Arc`를 통해 서비스들에 명시적으로 주입됩니다.
//! 전역 상태로 접근하지 않습니다.
//!
//! ## 필수 환경 변수
//!
//! ```bash
//! export JWT_SECRET_KEY="standard-token-secret"   # 액세스/리프레시 토큰
//! export JWT_ADMIN_KEY="admin-token-secret"       # 권한 상승(Elevated) 토큰
//! export JWT_API_KEY="api-key-secret"             # 머신(API Key) 토큰
//! export JWT_ACCESS_EXPIRES="900"                 # 초 단위
//! export JWT_REFRESH_EXPIRES="604800"             # 초 단위
//! ```
//!
//! ## 선택 환경 변수
//!
//! ```bash
//! export JWT_REFRESH_KEY="refresh-token-secret"   # 없으면 JWT_SECRET_KEY 사용
//! export SESSION_CACHE_TTL_SECONDS="5"            # 0이면 세션 캐시 비활성화
//! ```

use std::env;
use std::fmt;
use thiserror::Error;

/// 세션 조회 캐시 TTL 상한 (초). 캐시는 폐기 반영을 늦추므로 하루를 넘길 수 없습니다.
pub const MAX_SESSION_CACHE_TTL_SECS: u64 = 86_400;

/// 설정 로드 에러
///
/// 서명 키 누락은 재시도 가능한 오류가 아니라 치명적인 설정 오류입니다.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{0} must be a positive integer, got `{1}`")]
    InvalidNumber(&'static str, String),
}

/// 토큰 클래스별 서명 키와 수명 설정
///
/// 네 종류의 토큰 클래스가 각각 독립된 키를 사용합니다.
/// 리프레시 키가 지정되지 않으면 표준 키를 공유하며,
/// 이 경우 클래스 구분은 토큰의 `sub` 라벨 검증으로 이루어집니다.
#[derive(Clone)]
pub struct KeyConfig {
    secret_key: Vec<u8>,
    refresh_key: Option<Vec<u8>>,
    admin_key: Vec<u8>,
    api_key: Vec<u8>,
    access_expires_secs: i64,
    refresh_expires_secs: i64,
    session_cache_ttl_secs: u64,
}

impl KeyConfig {
    /// 세 개의 키와 만료 시간(초)으로 설정을 생성합니다.
    pub fn new(
        secret_key: impl Into<Vec<u8>>,
        admin_key: impl Into<Vec<u8>>,
        api_key: impl Into<Vec<u8>>,
        access_expires_secs: i64,
        refresh_expires_secs: i64,
    ) -> Self {
        Self {
            secret_key: secret_key.into(),
            refresh_key: None,
            admin_key: admin_key.into(),
            api_key: api_key.into(),
            access_expires_secs,
            refresh_expires_secs,
            session_cache_ttl_secs: 0,
        }
    }

    /// 리프레시 토큰 전용 키를 지정합니다.
    pub fn with_refresh_key(mut self, refresh_key: impl Into<Vec<u8>>) -> Self {
        self.refresh_key = Some(refresh_key.into());
        self
    }

    /// 세션 조회 캐시 TTL을 지정합니다. 0이면 캐시하지 않습니다.
    pub fn with_session_cache_ttl(mut self, ttl_secs: u64) -> Self {
        self.session_cache_ttl_secs = ttl_secs;
        self
    }

    /// 프로세스 환경 변수에서 설정을 로드합니다.
    ///
    /// # Errors
    ///
    /// * `ConfigError::Missing` - 필수 키가 없거나 비어 있음
    /// * `ConfigError::InvalidNumber` - 만료 시간이 양의 정수가 아님
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 임의의 조회 함수로부터 설정을 로드합니다.
    ///
    /// `.env` 파일이나 테스트용 맵에서 값을 읽을 때 사용합니다.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| -> Result<String, ConfigError> {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let seconds = |name: &'static str| -> Result<i64, ConfigError> {
            let raw = required(name)?;
            match raw.trim().parse::<i64>() {
                Ok(value) if value > 0 => Ok(value),
                _ => Err(ConfigError::InvalidNumber(name, raw)),
            }
        };

        let mut config = Self::new(
            required("JWT_SECRET_KEY")?,
            required("JWT_ADMIN_KEY")?,
            required("JWT_API_KEY")?,
            seconds("JWT_ACCESS_EXPIRES")?,
            seconds("JWT_REFRESH_EXPIRES")?,
        );

        if let Some(refresh_key) = lookup("JWT_REFRESH_KEY").filter(|v| !v.trim().is_empty()) {
            config = config.with_refresh_key(refresh_key);
        }

        if let Some(raw) = lookup("SESSION_CACHE_TTL_SECONDS") {
            let ttl = match raw.trim().parse::<u64>() {
                Ok(value) if value <= MAX_SESSION_CACHE_TTL_SECS => value,
                _ => return Err(ConfigError::InvalidNumber("SESSION_CACHE_TTL_SECONDS", raw)),
            };
            config = config.with_session_cache_ttl(ttl);
        }

        if config.secret_key == config.admin_key || config.secret_key == config.api_key || config.admin_key == config.api_key {
            log::warn!("토큰 클래스 간에 동일한 서명 키가 설정되어 있습니다. 클래스별로 다른 키를 사용하세요");
        }

        Ok(config)
    }

    /// 액세스 토큰 서명 키
    pub fn secret_key(&self) -> &[u8] {
        &self.secret_key
    }

    /// 리프레시 토큰 서명 키 (없으면 표준 키)
    pub fn refresh_key(&self) -> &[u8] {
        self.refresh_key.as_deref().unwrap_or(&self.secret_key)
    }

    /// Elevated 토큰 서명 키
    pub fn admin_key(&self) -> &[u8] {
        &self.admin_key
    }

    /// 머신 키 서명 키
    pub fn api_key(&self) -> &[u8] {
        &self.api_key
    }

    /// 액세스 토큰 수명 (초)
    pub fn access_expires_secs(&self) -> i64 {
        self.access_expires_secs
    }

    /// 리프레시 토큰 수명 (초)
    pub fn refresh_expires_secs(&self) -> i64 {
        self.refresh_expires_secs
    }

    /// 세션 조회 캐시 TTL (초)
    pub fn session_cache_ttl_secs(&self) -> u64 {
        self.session_cache_ttl_secs
    }
}

// 키 값이 로그에 찍히지 않도록 Debug를 직접 구현합니다.
impl fmt::Debug for KeyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyConfig")
            .field("secret_key", &"***")
            .field("refresh_key", &self.refresh_key.as_ref().map(|_| "***"))
            .field("admin_key", &"***")
            .field("api_key", &"***")
            .field("access_expires_secs", &self.access_expires_secs)
            .field("refresh_expires_secs", &self.refresh_expires_secs)
            .field("session_cache_ttl_secs", &self.session_cache_ttl_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn base_vars() -> HashMap<String, String> {
        vars(&[
            ("JWT_SECRET_KEY", "standard"),
            ("JWT_ADMIN_KEY", "admin"),
            ("JWT_API_KEY", "api"),
            ("JWT_ACCESS_EXPIRES", "900"),
            ("JWT_REFRESH_EXPIRES", "86400"),
        ])
    }

    #[test]
    fn test_load_from_lookup() {
        let map = base_vars();
        let config = KeyConfig::from_lookup(|name| map.get(name).cloned()).unwrap();

        assert_eq!(config.secret_key(), b"standard");
        assert_eq!(config.refresh_key(), b"standard");
        assert_eq!(config.admin_key(), b"admin");
        assert_eq!(config.api_key(), b"api");
        assert_eq!(config.access_expires_secs(), 900);
        assert_eq!(config.refresh_expires_secs(), 86400);
        assert_eq!(config.session_cache_ttl_secs(), 0);
    }

    #[test]
    fn test_optional_refresh_key_and_cache_ttl() {
        let mut map = base_vars();
        map.insert("JWT_REFRESH_KEY".to_string(), "refresh".to_string());
        map.insert("SESSION_CACHE_TTL_SECONDS".to_string(), "5".to_string());
        let config = KeyConfig::from_lookup(|name| map.get(name).cloned()).unwrap();

        assert_eq!(config.refresh_key(), b"refresh");
        assert_eq!(config.session_cache_ttl_secs(), 5);
    }

    #[test]
    fn test_missing_key_is_fatal() {
        let mut map = base_vars();
        map.remove("JWT_ADMIN_KEY");
        let result = KeyConfig::from_lookup(|name| map.get(name).cloned());

        assert_eq!(result.unwrap_err(), ConfigError::Missing("JWT_ADMIN_KEY"));
    }

    #[test]
    fn test_cache_ttl_out_of_range() {
        let mut map = base_vars();
        map.insert("SESSION_CACHE_TTL_SECONDS".to_string(), "10000000000000000".to_string());
        let result = KeyConfig::from_lookup(|name| map.get(name).cloned());
        assert!(matches!(result, Err(ConfigError::InvalidNumber("SESSION_CACHE_TTL_SECONDS", _))));

        map.insert("SESSION_CACHE_TTL_SECONDS".to_string(), "86400".to_string());
        let config = KeyConfig::from_lookup(|name| map.get(name).cloned()).unwrap();
        assert_eq!(config.session_cache_ttl_secs(), MAX_SESSION_CACHE_TTL_SECS);

        map.insert("SESSION_CACHE_TTL_SECONDS".to_string(), "86401".to_string());
        assert!(KeyConfig::from_lookup(|name| map.get(name).cloned()).is_err());
    }

    #[test]
    fn test_invalid_expiry() {
        let mut map = base_vars();
        map.insert("JWT_ACCESS_EXPIRES".to_string(), "soon".to_string());
        let result = KeyConfig::from_lookup(|name| map.get(name).cloned());

        assert!(matches!(result, Err(ConfigError::InvalidNumber("JWT_ACCESS_EXPIRES", _))));
    }

    #[test]
    fn test_debug_hides_keys() {
        let config = KeyConfig::new("standard-secret", "admin-secret", "api-secret", 60, 120);
        let printed = format!("{:?}", config);

        assert!(!printed.contains("standard-secret"));
        assert!(!printed.contains("admin-secret"));
        assert!(printed.contains("access_expires_secs: 60"));
    }
}
