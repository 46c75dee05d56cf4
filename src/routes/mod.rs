//! API 라우트 설정 모듈
//!
//! 엔드포인트를 기능별로 묶고 라우트마다 인증 방식을 지정합니다.
//!
//! | 경로 | 인증 |
//! |------|------|
//! | `GET /health` | 없음 |
//! | `POST /api/v1/users/refresh`, `POST /api/v1/users/signout` | `X-Api-Key` |
//! | `GET /api/v1/users/admin/secret` | Bearer, admin 역할 |
//! | `GET /api/v1/users/{user_id}` | Bearer, 본인 또는 admin |
//! | `GET /api/v1/appinfo/apikey` | Bearer, admin 역할 |
//! | `GET /api/v1/appinfo/roles` | `X-Api-Key` |
//!
//! 라우트는 `AccessGate`, `PassportService`, `dyn UserProfileStore`, `dyn RoleCatalog`가
//! `web::Data`로 등록되어 있다고 가정합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! let app = App::new()
//!     .app_data(gate.clone())
//!     .app_data(passports.clone())
//!     .configure(configure_all_routes);
//! ```

use actix_web::web;
use serde_json::json;

use crate::domain::entities::ADMIN_ROLE;
use crate::handlers;
use crate::middlewares::AuthMiddleware;

/// 모든 라우트를 설정합니다
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);

    configure_user_routes(cfg);
    configure_appinfo_routes(cfg);
}

/// 사용자 패스포트 라우트
///
/// ```bash
/// # 패스포트 갱신 - 머신 키 필요
/// curl -X POST http://localhost:8080/api/v1/users/refresh \
///   -H "X-Api-Key: eyJ..." -H "Content-Type: application/json" \
///   -d '{"refresh_token":"eyJ..."}'
///
/// # 프로필 조회 - Bearer 토큰 필요
/// curl http://localhost:8080/api/v1/users/507f1f77bcf86cd799439011 \
///   -H "Authorization: Bearer eyJ..."
/// ```
fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/users")
            .service(
                web::resource("/refresh")
                    .wrap(AuthMiddleware::api_key())
                    .route(web::post().to(handlers::users::refresh)),
            )
            .service(
                web::resource("/signout")
                    .wrap(AuthMiddleware::api_key())
                    .route(web::post().to(handlers::users::sign_out)),
            )
            .service(
                web::resource("/admin/secret")
                    .wrap(AuthMiddleware::bearer_with_roles(&[ADMIN_ROLE]))
                    .route(web::get().to(handlers::users::admin_secret)),
            )
            .service(
                web::resource("/{user_id}")
                    .wrap(AuthMiddleware::bearer())
                    .route(web::get().to(handlers::users::get_user)),
            ),
    );
}

/// 애플리케이션 정보 라우트
fn configure_appinfo_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/appinfo")
            .service(
                web::resource("/apikey")
                    .wrap(AuthMiddleware::bearer_with_roles(&[ADMIN_ROLE]))
                    .route(web::get().to(handlers::appinfo::api_key)),
            )
            .service(
                web::resource("/roles")
                    .wrap(AuthMiddleware::api_key())
                    .route(web::get().to(handlers::appinfo::roles)),
            ),
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "passport_auth",
///   "version": "0.1.0",
///   "timestamp": "2024-01-01T00:00:00Z"
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
