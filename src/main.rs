//! 패스포트 인증 서비스 메인 애플리케이션
//!
//! 설정을 로드하고 저장소 백엔드를 선택한 뒤, 인증 코어 서비스를 구성하여
//! Actix-web HTTP 서버를 구동합니다.

use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};

use passport_auth::caching::redis::RedisClient;
use passport_auth::caching::SessionCache;
use passport_auth::config::{KeyConfig, ServerConfig, StoreBackend, StoreConfig};
use passport_auth::core::{Clock, SystemClock};
use passport_auth::db::Database;
use passport_auth::repositories::{
    CredentialStore, InMemoryCredentialStore, InMemoryUserDirectory, MongoUserRepository,
    RedisSessionRepository, RoleCatalog, UserProfileStore,
};
use passport_auth::routes::configure_all_routes;
use passport_auth::services::auth::{AccessGate, PassportService, RoleService, TokenService};

/// Rate Limiting 설정 구조체
#[derive(Debug)]
struct RateLimitConfig {
    per_second: u64,
    burst_size: u32,
}

/// 인증 코어가 사용하는 세 가지 저장소 포트
struct Stores {
    sessions: Arc<dyn CredentialStore>,
    profiles: Arc<dyn UserProfileStore>,
    roles: Arc<dyn RoleCatalog>,
}

/// HTTP 워커들이 공유하는 앱 데이터
#[derive(Clone)]
struct AppState {
    gate: web::Data<AccessGate>,
    passports: web::Data<PassportService>,
    profiles: web::Data<dyn UserProfileStore>,
    roles: web::Data<dyn RoleCatalog>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 패스포트 인증 서비스 시작중...");

    let keys = match KeyConfig::from_env() {
        Ok(keys) => Arc::new(keys),
        Err(e) => {
            error!("서명 키 설정 오류: {}", e);
            std::process::exit(1);
        }
    };

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let stores = initialize_data_stores(clock.clone()).await;
    let state = build_services(keys, clock, stores);

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server(state).await
}

/// 인증 코어 서비스를 구성합니다
///
/// 모든 협력자는 생성자로 명시적으로 주입됩니다.
fn build_services(keys: Arc<KeyConfig>, clock: Arc<dyn Clock>, stores: Stores) -> AppState {
    let tokens = Arc::new(TokenService::new(keys.clone(), clock.clone()));
    let role_service = Arc::new(RoleService::new(stores.roles.clone()));

    let mut gate = AccessGate::new(tokens.clone(), stores.sessions.clone(), role_service);
    let cache_ttl = keys.session_cache_ttl_secs();
    if cache_ttl > 0 {
        info!("세션 조회 캐시 활성화: TTL {}초", cache_ttl);
        gate = gate.with_session_cache(SessionCache::new(cache_ttl, clock.clone()));
    }

    let passports = PassportService::new(tokens, stores.sessions, stores.profiles.clone(), clock);

    AppState {
        gate: web::Data::new(gate),
        passports: web::Data::new(passports),
        profiles: web::Data::from(stores.profiles),
        roles: web::Data::from(stores.roles),
    }
}

/// HTTP 서버를 구성하고 실행합니다
///
/// CORS, Rate Limiting, 로깅, 경로 정규화 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패, Rate Limiting 설정 오류 또는 서버 실행 오류
async fn start_http_server(state: AppState) -> std::io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    let rate_limit_config = load_rate_limit_config();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| std::io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    HttpServer::new(move || {
        let state = state.clone();

        App::new()
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .app_data(state.gate)
            .app_data(state.passports)
            .app_data(state.profiles)
            .app_data(state.roles)
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .workers(4)
        .run()
        .await
}

/// 환경별 설정 파일을 로드합니다
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    let result = match profile.as_str() {
        "prod" => dotenv::from_filename(".env.prod").map(|_| ".env.prod"),
        "dev" => dotenv::from_filename(".env.dev").map(|_| ".env.dev"),
        _ => dotenv().map(|_| ".env"),
    };

    // 로거 초기화 전이므로 표준 에러로 남긴다
    match result {
        Ok(file) => eprintln!("[{}] {} 파일 로드 됨", profile, file),
        Err(e) => eprintln!("[{}] 환경 파일 로드 실패: {}", profile, e),
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=info")
///
/// ```bash
/// RUST_LOG=passport_auth::services=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// `AUTH_STORE` 값에 따라 저장소 포트를 구성합니다
///
/// 외부 저장소 연결에 실패하면 프로세스를 종료합니다.
async fn initialize_data_stores(clock: Arc<dyn Clock>) -> Stores {
    match StoreBackend::current() {
        StoreBackend::Memory => {
            warn!("인메모리 저장소 사용: 프로세스 종료 시 세션이 사라집니다");
            let directory = Arc::new(InMemoryUserDirectory::new());
            Stores {
                sessions: Arc::new(InMemoryCredentialStore::new(clock)),
                profiles: directory.clone(),
                roles: directory,
            }
        }
        StoreBackend::Persistent => {
            info!("📡 데이터베이스 연결 중...");

            let database = match Database::new(&StoreConfig::mongodb_uri(), &StoreConfig::database_name()).await {
                Ok(database) => Arc::new(database),
                Err(e) => {
                    error!("MongoDB 연결 실패: {}", e);
                    std::process::exit(1);
                }
            };
            info!("✅ MongoDB 연결 성공");

            let redis = match RedisClient::new(&StoreConfig::redis_url()).await {
                Ok(client) => Arc::new(client),
                Err(e) => {
                    error!("Redis 연결 실패: {}", e);
                    std::process::exit(1);
                }
            };
            info!("✅ Redis 연결 성공");

            let users = Arc::new(MongoUserRepository::new(database));
            Stores {
                sessions: Arc::new(RedisSessionRepository::new(redis, clock)),
                profiles: users.clone(),
                roles: users,
            }
        }
    }
}

/// CORS 설정을 구성합니다
///
/// 로컬 프론트엔드 개발 서버와 자체 서버 origin을 허용합니다.
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-api-key"),
        ])
        .max_age(3600)
}

/// 환경변수에서 Rate Limiting 설정을 로드합니다
///
/// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
/// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
fn load_rate_limit_config() -> RateLimitConfig {
    let per_second = std::env::var("RATE_LIMIT_PER_SECOND")
        .unwrap_or_else(|_| "100".to_string())
        .parse::<u64>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
            100
        });

    let burst_size = std::env::var("RATE_LIMIT_BURST_SIZE")
        .unwrap_or_else(|_| "200".to_string())
        .parse::<u32>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
            200
        });

    let config = RateLimitConfig {
        per_second,
        burst_size,
    };

    info!("Rate Limiting 설정 로드됨: {:?}", config);
    config
}
