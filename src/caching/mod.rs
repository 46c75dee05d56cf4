//! 캐싱 계층 모듈
//!
//! - [`redis`] - Redis 클라이언트 래퍼 (세션 레코드 저장소 백엔드)
//! - [`session_cache`] - Access Gate 앞단의 세션 조회 TTL 캐시
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! SESSION_CACHE_TTL_SECONDS=0       # 0이면 세션 캐시 비활성화
//! ```

pub mod redis;
pub mod session_cache;

pub use session_cache::SessionCache;
