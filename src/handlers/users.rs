//! # User Passport HTTP Handlers
//!
//! 패스포트 갱신, 로그아웃, 관리자 토큰 발급, 프로필 조회 엔드포인트입니다.
//!
//! | 메서드 | 경로 | 인증 | 설명 |
//! |--------|------|------|------|
//! | `POST` | `/api/v1/users/refresh` | `X-Api-Key` | 패스포트 갱신 |
//! | `POST` | `/api/v1/users/signout` | `X-Api-Key` | 세션 폐기 |
//! | `GET` | `/api/v1/users/admin/secret` | Bearer (admin) | Elevated 토큰 발급 |
//! | `GET` | `/api/v1/users/{user_id}` | Bearer (본인 또는 admin) | 프로필 조회 |
//!
//! 인증/인가 실패는 모두 `401 {"error": "Authentication error: no permission to access"}`로 응답합니다.

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::domain::dto::tokens::{ApiResponse, ElevatedTokenResponse, RefreshRequest, SignOutRequest};
use crate::domain::models::auth::AuthorizedUser;
use crate::errors::{AppError, AuthError};
use crate::repositories::ports::UserProfileStore;
use crate::services::auth::{AccessGate, PassportService};

/// 패스포트 갱신 핸들러
///
/// 리프레시 토큰을 검증하고 세션을 새 토큰 쌍으로 교체합니다.
/// 새 리프레시 토큰은 기존 리프레시 토큰의 만료 시각을 그대로 유지합니다.
///
/// # 요청 본문
///
/// ```json
/// { "refresh_token": "eyJ..." }
/// ```
///
/// # 응답 (200 OK)
///
/// ```json
/// {
///   "user": { "id": "u1", "role": 1 },
///   "token": { "id": "5d1f...", "access_token": "eyJ...", "refresh_token": "eyJ..." }
/// }
/// ```
///
/// # 사용 예제
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v1/users/refresh \
///   -H "X-Api-Key: eyJ..." \
///   -H "Content-Type: application/json" \
///   -d '{"refresh_token":"eyJ..."}'
/// ```
pub async fn refresh(
    passports: web::Data<PassportService>,
    payload: web::Json<RefreshRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let passport = passports.refresh_passport(&payload.refresh_token).await?;
    Ok(HttpResponse::Ok().json(passport))
}

/// 로그아웃 핸들러
///
/// 패스포트 발급 시 받은 세션 ID(`token.id`)로 세션을 폐기합니다.
/// 폐기 이후 해당 세션의 액세스 토큰은 만료 전이라도 거부됩니다.
pub async fn sign_out(
    passports: web::Data<PassportService>,
    payload: web::Json<SignOutRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    passports.revoke(&payload.oauth_id).await?;
    log::info!("로그아웃 완료 - session: {}", payload.oauth_id);

    Ok(HttpResponse::Ok().json(ApiResponse::message("signed out")))
}

/// 관리자용 Elevated 토큰 발급 핸들러
///
/// 수명이 짧은(300초) 관리자 전용 토큰을 발급합니다.
pub async fn admin_secret(
    user: AuthorizedUser,
    passports: web::Data<PassportService>,
) -> Result<HttpResponse, AppError> {
    let token = passports.mint_elevated_token()?;
    log::info!("Elevated 토큰 발급 - admin: {}", user.subject_id);

    Ok(HttpResponse::Ok().json(ElevatedTokenResponse { token }))
}

/// 사용자 프로필 조회 핸들러
///
/// 본인 프로필만 조회할 수 있으며 관리자는 모든 프로필을 조회할 수 있습니다.
pub async fn get_user(
    user: AuthorizedUser,
    user_id: web::Path<String>,
    gate: web::Data<AccessGate>,
    profiles: web::Data<dyn UserProfileStore>,
) -> Result<HttpResponse, AppError> {
    let user_id = user_id.into_inner();
    gate.check_owner(&user, &user_id)?;

    let profile = profiles
        .get_profile(&user_id)
        .await?
        .ok_or_else(|| AuthError::NotFound("user profile".to_string()))?;

    Ok(HttpResponse::Ok().json(profile))
}
