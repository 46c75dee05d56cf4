//! # Application Info HTTP Handlers
//!
//! 머신 키 발급과 역할 카탈로그 조회 엔드포인트입니다.

use actix_web::{web, HttpResponse};

use crate::domain::dto::tokens::MachineKeyResponse;
use crate::domain::models::auth::AuthorizedUser;
use crate::errors::AppError;
use crate::repositories::ports::RoleCatalog;
use crate::services::auth::PassportService;

/// 머신 키(API Key) 발급 핸들러
///
/// 수명 2년의 `X-Api-Key` 토큰을 발급합니다. 관리자만 호출할 수 있습니다.
///
/// ```bash
/// curl http://localhost:8080/api/v1/appinfo/apikey \
///   -H "Authorization: Bearer eyJ..."
/// ```
pub async fn api_key(
    user: AuthorizedUser,
    passports: web::Data<PassportService>,
) -> Result<HttpResponse, AppError> {
    let key = passports.mint_machine_key()?;
    log::info!("머신 키 발급 - admin: {}", user.subject_id);

    Ok(HttpResponse::Ok().json(MachineKeyResponse { key }))
}

/// 역할 카탈로그 조회 핸들러
pub async fn roles(catalog: web::Data<dyn RoleCatalog>) -> Result<HttpResponse, AppError> {
    let roles = catalog.list_roles().await?;
    Ok(HttpResponse::Ok().json(roles))
}
