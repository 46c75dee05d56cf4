use std::sync::Arc;

use actix_web::{test, web, App};
use chrono::Duration;
use serde_json::json;

use passport_auth::config::KeyConfig;
use passport_auth::core::ManualClock;
use passport_auth::domain::entities::{UserProfile, ADMIN_ROLE, CUSTOMER_ROLE};
use passport_auth::domain::models::auth::AuthorizedUser;
use passport_auth::domain::models::token::{Passport, TokenClass};
use passport_auth::errors::AuthError;
use passport_auth::repositories::{InMemoryCredentialStore, InMemoryUserDirectory, RoleCatalog, UserProfileStore};
use passport_auth::routes::configure_all_routes;
use passport_auth::services::auth::{AccessGate, PassportService, RoleService, TokenService};

const START: i64 = 1_700_000_000;

struct Harness {
    clock: Arc<ManualClock>,
    tokens: Arc<TokenService>,
    directory: Arc<InMemoryUserDirectory>,
    store: Arc<InMemoryCredentialStore>,
    passports: Arc<PassportService>,
    gate: Arc<AccessGate>,
}

fn harness() -> Harness {
    let clock = Arc::new(ManualClock::at_timestamp(START));
    let keys = Arc::new(KeyConfig::new("standard-secret", "admin-secret", "api-secret", 900, 3600));
    let tokens = Arc::new(TokenService::new(keys, clock.clone()));
    let store = Arc::new(InMemoryCredentialStore::new(clock.clone()));
    let directory = Arc::new(InMemoryUserDirectory::new());
    directory.upsert(UserProfile::new("u1", CUSTOMER_ROLE));
    directory.upsert(UserProfile::new("a1", ADMIN_ROLE));

    let roles = Arc::new(RoleService::new(directory.clone()));
    let gate = Arc::new(AccessGate::new(tokens.clone(), store.clone(), roles));
    let passports = Arc::new(PassportService::new(
        tokens.clone(),
        store.clone(),
        directory.clone(),
        clock.clone(),
    ));

    Harness {
        clock,
        tokens,
        directory,
        store,
        passports,
        gate,
    }
}

fn denied() -> AuthError {
    AuthError::Unauthorized("no permission to access".to_string())
}

#[actix_web::test]
async fn test_issued_passport_grants_access_by_role() {
    let h = harness();
    let passport = h.passports.issue_passport(&UserProfile::new("u1", CUSTOMER_ROLE)).await.unwrap();
    let bearer = format!("Bearer {}", passport.token.access_token);

    let user = h.gate.check_access(&bearer, &[CUSTOMER_ROLE]).await.unwrap();
    assert_eq!(user, AuthorizedUser::new("u1", CUSTOMER_ROLE));
    assert!(h.gate.check_access(&bearer, &[CUSTOMER_ROLE, ADMIN_ROLE]).await.is_ok());
    assert_eq!(h.gate.check_access(&bearer, &[ADMIN_ROLE]).await, Err(denied()));
}

#[actix_web::test]
async fn test_access_token_expires_at_configured_lifetime() {
    let h = harness();
    let passport = h.passports.issue_passport(&UserProfile::new("u1", CUSTOMER_ROLE)).await.unwrap();

    h.clock.advance(Duration::seconds(900));
    assert!(h.gate.check_access(&passport.token.access_token, &[]).await.is_ok());

    h.clock.advance(Duration::seconds(1));
    assert_eq!(
        h.tokens.verify(TokenClass::StandardAccess, &passport.token.access_token),
        Err(AuthError::TokenExpired)
    );
    assert_eq!(
        h.gate.check_access(&passport.token.access_token, &[]).await,
        Err(denied())
    );
}

#[actix_web::test]
async fn test_refresh_token_is_not_an_access_token() {
    let h = harness();
    let passport = h.passports.issue_passport(&UserProfile::new("u1", CUSTOMER_ROLE)).await.unwrap();

    assert_eq!(
        h.gate.check_access(&passport.token.refresh_token, &[]).await,
        Err(denied())
    );
    assert!(matches!(
        h.passports.refresh_passport(&passport.token.access_token).await,
        Err(AuthError::TokenClassMismatch)
    ));
}

#[actix_web::test]
async fn test_refresh_keeps_session_deadline() {
    let h = harness();
    let first = h.passports.issue_passport(&UserProfile::new("u1", CUSTOMER_ROLE)).await.unwrap();

    h.clock.advance(Duration::seconds(600));
    let second = h.passports.refresh_passport(&first.token.refresh_token).await.unwrap();

    let access = h.tokens.verify(TokenClass::StandardAccess, &second.token.access_token).unwrap();
    let refresh = h.tokens.verify(TokenClass::StandardRefresh, &second.token.refresh_token).unwrap();
    assert_eq!(access.exp, START + 600 + 900);
    assert_eq!(refresh.exp, START + 3600);
    assert_eq!(second.token.id, first.token.id);
    assert_eq!(h.store.session_count(), 1);

    // 교체된 액세스 토큰은 더 이상 세션에 없다
    assert_eq!(h.gate.check_access(&first.token.access_token, &[]).await, Err(denied()));
    assert!(h.gate.check_access(&second.token.access_token, &[]).await.is_ok());
}

#[actix_web::test]
async fn test_second_refresh_with_same_token_fails() {
    let h = harness();
    let passport = h.passports.issue_passport(&UserProfile::new("u1", CUSTOMER_ROLE)).await.unwrap();

    assert!(h.passports.refresh_passport(&passport.token.refresh_token).await.is_ok());
    assert!(matches!(
        h.passports.refresh_passport(&passport.token.refresh_token).await,
        Err(AuthError::SessionNotFound)
    ));
}

#[actix_web::test]
async fn test_refresh_picks_up_role_change() {
    let h = harness();
    let passport = h.passports.issue_passport(&UserProfile::new("u1", CUSTOMER_ROLE)).await.unwrap();
    assert!(h.directory.set_role("u1", ADMIN_ROLE));

    let refreshed = h.passports.refresh_passport(&passport.token.refresh_token).await.unwrap();
    assert_eq!(refreshed.user.role, ADMIN_ROLE);

    let user = h.gate.check_access(&refreshed.token.access_token, &[ADMIN_ROLE]).await.unwrap();
    assert!(user.is_admin());
}

#[actix_web::test]
async fn test_revoked_session_rejects_unexpired_token() {
    let h = harness();
    let passport = h.passports.issue_passport(&UserProfile::new("u1", CUSTOMER_ROLE)).await.unwrap();
    let session_id = passport.token.id.clone().unwrap();

    h.passports.revoke(&session_id).await.unwrap();

    assert!(h.tokens.verify(TokenClass::StandardAccess, &passport.token.access_token).is_ok());
    assert_eq!(
        h.gate.check_access(&passport.token.access_token, &[]).await,
        Err(denied())
    );
    assert!(matches!(
        h.passports.refresh_passport(&passport.token.refresh_token).await,
        Err(AuthError::SessionNotFound)
    ));
    assert_eq!(
        h.passports.revoke(&session_id).await,
        Err(AuthError::NotFound("session".to_string()))
    );
}

#[actix_web::test]
async fn test_store_outage_fails_issue() {
    let h = harness();
    h.store.set_unavailable(true);

    let result = h.passports.issue_passport(&UserProfile::new("u1", CUSTOMER_ROLE)).await;
    assert!(matches!(result, Err(AuthError::PersistenceError(_))));
}

macro_rules! app {
    ($h:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::from($h.gate.clone()))
                .app_data(web::Data::from($h.passports.clone()))
                .app_data(web::Data::from($h.directory.clone() as Arc<dyn UserProfileStore>))
                .app_data(web::Data::from($h.directory.clone() as Arc<dyn RoleCatalog>))
                .configure(configure_all_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_http_refresh_and_sign_out() {
    let h = harness();
    let app = app!(h);
    let api_key = h.passports.mint_machine_key().unwrap();
    let passport = h.passports.issue_passport(&UserProfile::new("u1", CUSTOMER_ROLE)).await.unwrap();

    let req = test::TestRequest::post()
        .uri("/api/v1/users/refresh")
        .insert_header(("X-Api-Key", api_key.clone()))
        .set_json(json!({ "refresh_token": passport.token.refresh_token }))
        .to_request();
    let refreshed: Passport = test::call_and_read_body_json(&app, req).await;
    assert_eq!(refreshed.user.id, "u1");

    // 머신 키 없이 호출
    let req = test::TestRequest::post()
        .uri("/api/v1/users/refresh")
        .set_json(json!({ "refresh_token": refreshed.token.refresh_token }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);

    let req = test::TestRequest::post()
        .uri("/api/v1/users/refresh")
        .insert_header(("X-Api-Key", api_key.clone()))
        .set_json(json!({ "refresh_token": "" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);

    let req = test::TestRequest::post()
        .uri("/api/v1/users/signout")
        .insert_header(("X-Api-Key", api_key))
        .set_json(json!({ "oauth_id": refreshed.token.id }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);
    assert_eq!(h.store.session_count(), 0);
}

#[actix_web::test]
async fn test_http_admin_routes_and_owner_check() {
    let h = harness();
    let app = app!(h);
    let customer = h.passports.issue_passport(&UserProfile::new("u1", CUSTOMER_ROLE)).await.unwrap();
    let admin = h.passports.issue_passport(&UserProfile::new("a1", ADMIN_ROLE)).await.unwrap();
    let customer_bearer = format!("Bearer {}", customer.token.access_token);
    let admin_bearer = format!("Bearer {}", admin.token.access_token);

    let req = test::TestRequest::get()
        .uri("/api/v1/users/admin/secret")
        .insert_header(("Authorization", customer_bearer.clone()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);

    let req = test::TestRequest::get()
        .uri("/api/v1/users/admin/secret")
        .insert_header(("Authorization", admin_bearer.clone()))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let elevated = body["token"].as_str().unwrap();
    assert!(h.gate.check_elevated(elevated).is_ok());

    let req = test::TestRequest::get()
        .uri("/api/v1/appinfo/apikey")
        .insert_header(("Authorization", admin_bearer.clone()))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert!(h.gate.check_api_key(body["key"].as_str().unwrap()).is_ok());

    let req = test::TestRequest::get()
        .uri("/api/v1/users/u1")
        .insert_header(("Authorization", customer_bearer.clone()))
        .to_request();
    let profile: UserProfile = test::call_and_read_body_json(&app, req).await;
    assert_eq!(profile.id, "u1");

    let req = test::TestRequest::get()
        .uri("/api/v1/users/a1")
        .insert_header(("Authorization", customer_bearer))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);

    let req = test::TestRequest::get()
        .uri("/api/v1/users/u1")
        .insert_header(("Authorization", admin_bearer))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);
}

#[actix_web::test]
async fn test_http_roles_and_health() {
    let h = harness();
    let app = app!(h);
    let api_key = h.passports.mint_machine_key().unwrap();

    let req = test::TestRequest::get()
        .uri("/api/v1/appinfo/roles")
        .insert_header(("X-Api-Key", api_key))
        .to_request();
    let roles: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(roles, json!([{ "id": 1, "title": "customer" }, { "id": 2, "title": "admin" }]));

    let req = test::TestRequest::get().uri("/health").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);
}
