//! 데이터 및 서버 설정 관리 모듈
//!
//! 서버 바인딩과 세션/사용자 저장소 백엔드 설정을 관리합니다.

use std::env;

/// 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    /// 서버가 바인딩할 포트를 반환합니다. 기본값: 8080
    pub fn port() -> u16 {
        env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080)
    }

    /// 서버가 바인딩할 호스트 주소를 반환합니다. 기본값: "127.0.0.1"
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string())
    }

    /// `host:port` 형식의 바인딩 주소
    pub fn bind_address() -> String {
        format!("{}:{}", Self::host(), Self::port())
    }
}

/// 세션 레코드와 사용자 프로필을 보관할 저장소 종류
#[derive(Debug, Clone, PartialEq)]
pub enum StoreBackend {
    /// 프로세스 메모리 (로컬 실행 및 테스트용)
    Memory,
    /// 세션은 Redis, 사용자/역할은 MongoDB
    Persistent,
}

impl StoreBackend {
    /// `AUTH_STORE` 환경 변수에서 백엔드를 결정합니다. 기본값: Memory
    pub fn current() -> Self {
        Self::from_str(&env::var("AUTH_STORE").unwrap_or_else(|_| "memory".to_string()))
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "redis" | "mongo" | "persistent" => StoreBackend::Persistent,
            _ => StoreBackend::Memory,
        }
    }
}

/// 외부 저장소 접속 설정
pub struct StoreConfig;

impl StoreConfig {
    /// Redis 접속 URL. 기본값: redis://localhost:6379
    pub fn redis_url() -> String {
        env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
    }

    /// MongoDB 접속 URI. 기본값: mongodb://localhost:27017
    pub fn mongodb_uri() -> String {
        env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string())
    }

    /// MongoDB 데이터베이스 이름. 기본값: passport_auth
    pub fn database_name() -> String {
        env::var("DATABASE_NAME").unwrap_or_else(|_| "passport_auth".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_backend_from_string() {
        assert_eq!(StoreBackend::from_str("redis"), StoreBackend::Persistent);
        assert_eq!(StoreBackend::from_str("MEMORY"), StoreBackend::Memory);
        assert_eq!(StoreBackend::from_str(""), StoreBackend::Memory);
    }

    #[test]
    fn test_server_config_defaults() {
        if env::var("PORT").is_err() {
            assert_eq!(ServerConfig::port(), 8080);
        }

        if env::var("HOST").is_err() {
            assert_eq!(ServerConfig::host(), "127.0.0.1");
        }
    }
}
