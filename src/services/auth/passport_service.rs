//! 패스포트(액세스 + 리프레시 토큰 쌍) 생명주기 관리
//!
//! 세션 상태 전이:
//!
//! ```text
//! Issued ─▶ Active ─▶ Rotated ─▶ ... ─▶ Revoked
//!              │                          ▲
//!              └──────── Expired ─────────┘ (리프레시 없이 만료)
//! ```
//!
//! 리프레시는 세션의 절대 만료 시각을 연장하지 않습니다. 새 리프레시 토큰은
//! 이전 리프레시 토큰의 `exp`를 그대로 이어받습니다.

use std::sync::Arc;

use crate::core::Clock;
use crate::domain::entities::{SessionRecord, UserProfile};
use crate::domain::models::token::{Passport, PassportToken, SignedToken, TokenClass, UserClaims};
use crate::errors::{AuthError, AuthResult};
use crate::repositories::ports::{CredentialStore, UserProfileStore};
use crate::services::auth::token_service::TokenService;
use crate::utils::bit_utils::is_single_bit;

/// 토큰 생명주기 관리 서비스
pub struct PassportService {
    tokens: Arc<TokenService>,
    sessions: Arc<dyn CredentialStore>,
    profiles: Arc<dyn UserProfileStore>,
    clock: Arc<dyn Clock>,
}

impl PassportService {
    pub fn new(
        tokens: Arc<TokenService>,
        sessions: Arc<dyn CredentialStore>,
        profiles: Arc<dyn UserProfileStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            tokens,
            sessions,
            profiles,
            clock,
        }
    }

    /// 로그인/가입에 성공한 사용자에게 패스포트를 발급합니다.
    ///
    /// 액세스/리프레시 토큰을 같은 신원으로 서명하고 세션 레코드를 저장합니다.
    /// 저장에 실패하면 두 토큰 모두 버려지고 에러가 반환됩니다.
    ///
    /// # Arguments
    ///
    /// * `profile` - 인증된 사용자 신원. `role`은 단일 비트여야 합니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::MalformedRole` - 역할이 단일 비트가 아님
    /// * `AuthError::PersistenceError` - 세션 저장 실패
    /// * `AuthError::SigningFailed` - 서명 실패
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let passport = passport_service.issue_passport(&UserProfile::new("u1", 1)).await?;
    /// println!("session: {:?}", passport.token.id);
    /// ```
    pub async fn issue_passport(&self, profile: &UserProfile) -> AuthResult<Passport> {
        Self::ensure_single_bit(profile)?;

        let identity = UserClaims::from(profile);
        let now = self.clock.now();
        let refresh_expires_at = self.tokens.expires_at(TokenClass::StandardRefresh, now);

        let access_token = self.tokens.sign(TokenClass::StandardAccess, Some(&identity))?;
        let refresh_token = self.tokens.sign_with_expiry(
            TokenClass::StandardRefresh,
            Some(&identity),
            refresh_expires_at,
        )?;

        let record = SessionRecord::new(
            &profile.id,
            access_token.clone(),
            refresh_token.clone(),
            refresh_expires_at,
            now,
        );
        self.sessions.put_session(&record).await.map_err(|e| {
            log::error!("세션 저장 실패, 발급 토큰 폐기 - subject: {}: {}", profile.id, e);
            e
        })?;

        log::info!("패스포트 발급 - subject: {}, session_id: {}", profile.id, record.id);

        Ok(Passport {
            user: profile.clone(),
            token: PassportToken {
                id: Some(record.id),
                access_token,
                refresh_token,
            },
        })
    }

    /// 리프레시 토큰으로 새 패스포트를 발급합니다.
    ///
    /// 1. 리프레시 토큰 검증
    /// 2. 세션 레코드 조회 (없으면 폐기되었거나 이미 교체된 토큰)
    /// 3. 현재 사용자 프로필 재조회 (역할 변경 반영)
    /// 4. 새 액세스 토큰과 원래 만료 시각을 유지한 리프레시 토큰 서명
    /// 5. 세션 레코드를 같은 id로 교체
    ///
    /// # Errors
    ///
    /// * 검증 에러 - [`TokenService::verify`] 참고
    /// * `AuthError::SessionNotFound` - 세션 레코드 없음
    /// * `AuthError::NotFound` - 사용자 프로필 없음
    /// * `AuthError::PersistenceError` - 저장소 장애
    pub async fn refresh_passport(&self, refresh_token: &str) -> AuthResult<Passport> {
        let claims = self.tokens.verify(TokenClass::StandardRefresh, refresh_token)?;

        let record = self
            .sessions
            .find_by_refresh_token(refresh_token)
            .await?
            .ok_or(AuthError::SessionNotFound)?;
        if record.subject_id != claims.subject_id() {
            log::warn!(
                "세션 주체 불일치 - session_id: {}, token subject: {}",
                record.id,
                claims.subject_id()
            );
            return Err(AuthError::SessionNotFound);
        }

        let profile = self
            .profiles
            .get_profile(claims.subject_id())
            .await?
            .ok_or_else(|| AuthError::NotFound("user profile".to_string()))?;
        Self::ensure_single_bit(&profile)?;

        let identity = UserClaims::from(&profile);
        let access_token = self.tokens.sign(TokenClass::StandardAccess, Some(&identity))?;
        let new_refresh_token =
            self.tokens
                .sign_with_expiry(TokenClass::StandardRefresh, Some(&identity), claims.exp)?;

        let rotated = record.rotated(access_token.clone(), new_refresh_token.clone(), self.clock.now());
        if !self.sessions.update_session(&rotated).await? {
            // 조회와 교체 사이에 폐기됨
            return Err(AuthError::SessionNotFound);
        }

        log::info!("패스포트 갱신 - subject: {}, session_id: {}", profile.id, rotated.id);

        Ok(Passport {
            user: profile,
            token: PassportToken {
                id: Some(rotated.id),
                access_token,
                refresh_token: new_refresh_token,
            },
        })
    }

    /// 세션 레코드를 삭제합니다. (로그아웃)
    ///
    /// # Errors
    ///
    /// * `AuthError::NotFound` - 이미 삭제되었거나 존재하지 않는 세션
    /// * `AuthError::PersistenceError` - 저장소 장애
    pub async fn revoke(&self, session_id: &str) -> AuthResult<()> {
        if !self.sessions.delete_session(session_id).await? {
            log::warn!("폐기할 세션 없음 - session_id: {}", session_id);
            return Err(AuthError::NotFound("session".to_string()));
        }

        log::info!("세션 폐기 - session_id: {}", session_id);
        Ok(())
    }

    /// 5분짜리 권한 상승(Elevated) 토큰을 발급합니다.
    pub fn mint_elevated_token(&self) -> AuthResult<SignedToken> {
        self.tokens.sign(TokenClass::Elevated, None)
    }

    /// 2년짜리 머신 키(API Key) 토큰을 발급합니다.
    pub fn mint_machine_key(&self) -> AuthResult<SignedToken> {
        self.tokens.sign(TokenClass::MachineKey, None)
    }

    fn ensure_single_bit(profile: &UserProfile) -> AuthResult<()> {
        if is_single_bit(profile.role) {
            Ok(())
        } else {
            log::warn!("단일 비트가 아닌 역할 - subject: {}, role: {}", profile.id, profile.role);
            Err(AuthError::MalformedRole(profile.role))
        }
    }
}
