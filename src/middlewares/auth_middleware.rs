//! 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 `AccessGate`를 호출하여 요청을 통과시키거나 거부합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::domain::models::auth::AuthMode;
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// Access Gate 미들웨어
///
/// `AccessGate`는 `web::Data<AccessGate>`로 앱 데이터에 등록되어 있어야 합니다.
pub struct AuthMiddleware {
    mode: AuthMode,
}

impl AuthMiddleware {
    pub fn new(mode: AuthMode) -> Self {
        Self { mode }
    }

    /// 액세스 토큰 인증만 요구
    pub fn bearer() -> Self {
        Self::new(AuthMode::bearer())
    }

    /// 액세스 토큰 인증과 역할 중 하나를 요구
    pub fn bearer_with_roles(roles: &[i64]) -> Self {
        Self::new(AuthMode::bearer_with_roles(roles))
    }

    /// `X-Api-Key` 머신 키 요구
    pub fn api_key() -> Self {
        Self::new(AuthMode::ApiKey)
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{test, web, App, HttpResponse};

    use super::*;
    use crate::config::KeyConfig;
    use crate::core::ManualClock;
    use crate::domain::entities::{UserProfile, ADMIN_ROLE, CUSTOMER_ROLE};
    use crate::domain::models::auth::AuthorizedUser;
    use crate::repositories::memory::{InMemoryCredentialStore, InMemoryUserDirectory};
    use crate::services::auth::{AccessGate, PassportService, RoleService, TokenService};

    fn services() -> (web::Data<AccessGate>, PassportService) {
        let clock = Arc::new(ManualClock::at_timestamp(1_700_000_000));
        let keys = Arc::new(KeyConfig::new("standard", "admin", "api", 900, 3600));
        let tokens = Arc::new(TokenService::new(keys, clock.clone()));
        let store = Arc::new(InMemoryCredentialStore::new(clock.clone()));
        let directory = Arc::new(InMemoryUserDirectory::new());
        let roles = Arc::new(RoleService::new(directory.clone()));

        let gate = AccessGate::new(tokens.clone(), store.clone(), roles);
        let passports = PassportService::new(tokens, store, directory, clock);
        (web::Data::new(gate), passports)
    }

    async fn whoami(user: AuthorizedUser) -> HttpResponse {
        HttpResponse::Ok().json(user)
    }

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn test_bearer_mode_inserts_caller() {
        let (gate, passports) = services();
        let passport = passports
            .issue_passport(&UserProfile::new("u1", CUSTOMER_ROLE))
            .await
            .unwrap();

        let app = test::init_service(
            App::new().app_data(gate).service(
                web::scope("/me")
                    .wrap(AuthMiddleware::bearer_with_roles(&[CUSTOMER_ROLE]))
                    .route("", web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", format!("Bearer {}", passport.token.access_token)))
            .to_request();
        let user: AuthorizedUser = test::call_and_read_body_json(&app, req).await;
        assert_eq!(user, AuthorizedUser::new("u1", CUSTOMER_ROLE));

        let req = test::TestRequest::get().uri("/me").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 401);
    }

    #[actix_web::test]
    async fn test_role_mismatch_is_unauthorized() {
        let (gate, passports) = services();
        let passport = passports
            .issue_passport(&UserProfile::new("u1", CUSTOMER_ROLE))
            .await
            .unwrap();

        let app = test::init_service(
            App::new().app_data(gate).service(
                web::scope("/admin")
                    .wrap(AuthMiddleware::bearer_with_roles(&[ADMIN_ROLE]))
                    .route("", web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/admin")
            .insert_header(("Authorization", passport.token.access_token.clone()))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 401);
    }

    #[actix_web::test]
    async fn test_api_key_mode() {
        let (gate, passports) = services();
        let api_key = passports.mint_machine_key().unwrap();

        let app = test::init_service(
            App::new().app_data(gate).service(
                web::scope("/machine")
                    .wrap(AuthMiddleware::api_key())
                    .route("", web::get().to(ok)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/machine")
            .insert_header(("X-Api-Key", api_key))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 200);

        let req = test::TestRequest::get()
            .uri("/machine")
            .insert_header(("X-Api-Key", "not-a-token"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 401);
    }
}
