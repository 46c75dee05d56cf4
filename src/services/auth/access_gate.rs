//! 요청 단위 Access Gate
//!
//! 보호된 요청마다 한 번 호출되어 토큰 검증, 세션 존재 확인(폐기 여부), 역할 판정을 수행합니다.
//! 토큰/세션/역할 실패는 모두 불투명한 `Unauthorized`로 합쳐지고, 원인은 로그에만 남습니다.
//! 저장소 장애(`PersistenceError`)는 서버 오류로 그대로 전달됩니다.
//!
//! 검증과 세션 조회 사이, 조회와 이후 사용 사이에 세션이 폐기될 수 있습니다.
//! 이 경합은 허용되며 Gate에서 막지 않습니다.

use std::sync::Arc;

use crate::caching::SessionCache;
use crate::domain::models::auth::AuthorizedUser;
use crate::domain::models::token::{Claims, TokenClass};
use crate::errors::{AuthError, AuthResult};
use crate::repositories::ports::CredentialStore;
use crate::services::auth::role_service::RoleService;
use crate::services::auth::token_service::TokenService;
use crate::utils::string_utils::strip_bearer_prefix;

const DENIED: &str = "no permission to access";

/// 요청 단위 인증/인가 진입점
pub struct AccessGate {
    tokens: Arc<TokenService>,
    sessions: Arc<dyn CredentialStore>,
    roles: Arc<RoleService>,
    cache: Option<SessionCache>,
}

impl AccessGate {
    pub fn new(
        tokens: Arc<TokenService>,
        sessions: Arc<dyn CredentialStore>,
        roles: Arc<RoleService>,
    ) -> Self {
        Self {
            tokens,
            sessions,
            roles,
            cache: None,
        }
    }

    /// 세션 조회 앞에 TTL 캐시를 둡니다. 폐기는 최대 캐시 TTL 뒤에 반영됩니다.
    pub fn with_session_cache(mut self, cache: SessionCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Bearer 액세스 토큰을 검증하고 호출자 정보를 반환합니다.
    ///
    /// # Arguments
    ///
    /// * `bearer` - `Authorization` 헤더 값. `"Bearer "` 접두사는 있으면 제거됩니다.
    /// * `required_roles` - 허용 역할 목록. 비어 있으면 인증만 확인합니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::Unauthorized` - 토큰 검증 실패, 세션 없음, 역할 불일치
    /// * `AuthError::PersistenceError` - 저장소 장애
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let user = access_gate.check_access("Bearer eyJ...", &[ADMIN_ROLE]).await?;
    /// println!("caller: {} (role {})", user.subject_id, user.role);
    /// ```
    pub async fn check_access(&self, bearer: &str, required_roles: &[i64]) -> AuthResult<AuthorizedUser> {
        let token = strip_bearer_prefix(bearer);
        let claims = self
            .tokens
            .verify(TokenClass::StandardAccess, token)
            .map_err(Self::deny)?;
        let subject_id = claims.subject_id();

        if !self.session_exists(subject_id, token).await? {
            log::warn!("세션 없음 (폐기된 토큰) - subject: {}", subject_id);
            return Err(AuthError::Unauthorized(DENIED.to_string()));
        }

        if !required_roles.is_empty() {
            let allowed = self
                .roles
                .authorize_with_catalog(claims.role(), required_roles)
                .await
                .map_err(Self::deny)?;
            if !allowed {
                log::warn!(
                    "역할 불일치 - subject: {}, role: {}, required: {:?}",
                    subject_id,
                    claims.role(),
                    required_roles
                );
                return Err(AuthError::Unauthorized(DENIED.to_string()));
            }
        }

        log::debug!("접근 허용 - subject: {}", subject_id);
        Ok(AuthorizedUser::new(subject_id, claims.role()))
    }

    /// `X-Api-Key` 머신 키를 검증합니다.
    pub fn check_api_key(&self, api_key: &str) -> AuthResult<Claims> {
        self.tokens
            .verify(TokenClass::MachineKey, api_key)
            .map_err(Self::deny)
    }

    /// 권한 상승(Elevated) 토큰을 검증합니다.
    pub fn check_elevated(&self, token: &str) -> AuthResult<Claims> {
        self.tokens
            .verify(TokenClass::Elevated, strip_bearer_prefix(token))
            .map_err(Self::deny)
    }

    /// 경로의 사용자 ID가 호출자 본인인지 확인합니다. 관리자는 통과합니다.
    pub fn check_owner(&self, user: &AuthorizedUser, path_user_id: &str) -> AuthResult<()> {
        if user.is_admin() || user.subject_id == path_user_id {
            return Ok(());
        }

        log::warn!(
            "다른 사용자 리소스 접근 거부 - caller: {}, target: {}",
            user.subject_id,
            path_user_id
        );
        Err(AuthError::Unauthorized(DENIED.to_string()))
    }

    async fn session_exists(&self, subject_id: &str, token: &str) -> AuthResult<bool> {
        if let Some(cache) = &self.cache {
            if cache.contains(subject_id, token) {
                return Ok(true);
            }
        }

        let exists = self.sessions.has_access_token(subject_id, token).await?;
        if exists {
            if let Some(cache) = &self.cache {
                cache.remember(subject_id, token);
            }
        }
        Ok(exists)
    }

    /// 서버 장애가 아닌 실패를 불투명한 `Unauthorized`로 바꿉니다.
    fn deny(err: AuthError) -> AuthError {
        if err.is_server_fault() {
            return err;
        }
        log::warn!("인증 거부: {}", err);
        AuthError::Unauthorized(DENIED.to_string())
    }
}
