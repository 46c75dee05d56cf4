//! JWT 토큰 서명/검증 서비스 구현
//!
//! 네 가지 토큰 클래스(액세스, 리프레시, Elevated, MachineKey)를 하나의 서명 함수로 처리합니다.
//! 클래스 태그가 서명 키와 클레임 템플릿을 결정하며, 시간은 주입된 [`Clock`]을 따릅니다.

use std::sync::Arc;

use chrono::{DateTime, Months, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::config::KeyConfig;
use crate::core::Clock;
use crate::domain::models::token::{
    Claims, SignedToken, TokenClass, UserClaims, ELEVATED_TOKEN_LIFETIME_SECS,
    MACHINE_KEY_LIFETIME_YEARS, TOKEN_ISSUER,
};
use crate::errors::{AuthError, AuthResult};

/// JWT 토큰 서명/검증 서비스
///
/// 토큰은 항상 HS256으로 서명되며, 검증 시에는 HMAC 계열(HS256/384/512)만 허용합니다.
/// 부수 효과가 없는 순수 함수 집합입니다. (키, 클레임, 시계)
pub struct TokenService {
    keys: Arc<KeyConfig>,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    pub fn new(keys: Arc<KeyConfig>, clock: Arc<dyn Clock>) -> Self {
        Self { keys, clock }
    }

    /// 클래스별 서명 키
    fn key_for(&self, class: TokenClass) -> &[u8] {
        match class {
            TokenClass::StandardAccess => self.keys.secret_key(),
            TokenClass::StandardRefresh => self.keys.refresh_key(),
            TokenClass::Elevated => self.keys.admin_key(),
            TokenClass::MachineKey => self.keys.api_key(),
        }
    }

    /// `issued_at`에 발급된 `class` 토큰의 만료 시각 (Unix timestamp)
    pub fn expires_at(&self, class: TokenClass, issued_at: DateTime<Utc>) -> i64 {
        let issued = issued_at.timestamp();
        match class {
            TokenClass::StandardAccess => issued.saturating_add(self.keys.access_expires_secs()),
            TokenClass::StandardRefresh => issued.saturating_add(self.keys.refresh_expires_secs()),
            TokenClass::Elevated => issued + ELEVATED_TOKEN_LIFETIME_SECS,
            TokenClass::MachineKey => issued_at
                .checked_add_months(Months::new(MACHINE_KEY_LIFETIME_YEARS * 12))
                .map(|at| at.timestamp())
                .unwrap_or(issued + i64::from(MACHINE_KEY_LIFETIME_YEARS) * 365 * 24 * 3600),
        }
    }

    /// 클래스 기본 수명으로 토큰을 서명합니다.
    ///
    /// # Arguments
    ///
    /// * `class` - 토큰 클래스
    /// * `identity` - 사용자 신원. 액세스/리프레시 토큰에는 필수이고, 그 외 클래스에서는 무시됩니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::ClaimsTypeInvalid` - 액세스/리프레시 토큰에 신원이 없음
    /// * `AuthError::SigningFailed` - 서명 실패 (키 설정 오류)
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let identity = UserClaims::new("u1", 1);
    /// let access_token = token_service.sign(TokenClass::StandardAccess, Some(&identity))?;
    /// let api_key = token_service.sign(TokenClass::MachineKey, None)?;
    /// ```
    pub fn sign(&self, class: TokenClass, identity: Option<&UserClaims>) -> AuthResult<SignedToken> {
        let expires_at = self.expires_at(class, self.clock.now());
        self.sign_with_expiry(class, identity, expires_at)
    }

    /// 지정된 만료 시각으로 토큰을 서명합니다.
    ///
    /// 리프레시 토큰 교체 시 원래 세션의 만료 시각을 유지하는 데 사용합니다.
    pub fn sign_with_expiry(
        &self,
        class: TokenClass,
        identity: Option<&UserClaims>,
        expires_at: i64,
    ) -> AuthResult<SignedToken> {
        let identity = if class.carries_identity() {
            Some(identity.ok_or(AuthError::ClaimsTypeInvalid)?)
        } else {
            None
        };

        let claims = Claims::for_class(class, identity, self.clock.timestamp(), expires_at);
        let encoding_key = EncodingKey::from_secret(self.key_for(class));

        encode(&Header::new(Algorithm::HS256), &claims, &encoding_key).map_err(|e| {
            log::error!("{} 토큰 서명 실패: {}", class, e);
            AuthError::SigningFailed(e.to_string())
        })
    }

    /// 토큰을 검증하고 클레임을 반환합니다.
    ///
    /// 서명 키, 알고리즘, `iss`/`aud`/`sub` 라벨을 확인한 뒤 `exp`/`nbf`를
    /// 주입된 시계와 leeway 없이 비교합니다.
    ///
    /// # Errors
    ///
    /// * `TokenMalformed` - 세그먼트, base64, 헤더 JSON 구조 오류
    /// * `SigningMethodMismatch` - 헤더의 alg가 HMAC 계열이 아님
    /// * `SignatureInvalid` - 다른 키로 서명됨
    /// * `TokenClassMismatch` - 다른 클래스의 토큰
    /// * `ClaimsTypeInvalid` - 페이로드가 클레임 형태가 아니거나 필요한 신원이 없음
    /// * `TokenExpired` - `now > exp`
    /// * `TokenNotYetValid` - `now < nbf`
    pub fn verify(&self, class: TokenClass, token: &str) -> AuthResult<Claims> {
        // 헤더 오류를 페이로드 오류와 구분하기 위해 먼저 확인
        decode_header(token).map_err(|e| {
            log::debug!("토큰 헤더 해석 실패: {}", e);
            AuthError::TokenMalformed
        })?;

        let decoding_key = DecodingKey::from_secret(self.key_for(class));
        let claims = decode::<Claims>(token, &decoding_key, &Self::validation_for(class))
            .map(|data| data.claims)
            .map_err(|e| Self::map_decode_error(e.kind()))?;

        let now = self.clock.timestamp();
        if now > claims.exp {
            return Err(AuthError::TokenExpired);
        }
        if now < claims.nbf {
            return Err(AuthError::TokenNotYetValid);
        }
        if class.carries_identity() && claims.claims.is_none() {
            return Err(AuthError::ClaimsTypeInvalid);
        }

        Ok(claims)
    }

    fn validation_for(class: TokenClass) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "sub", "aud"]);
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.set_audience(class.audience());
        validation.sub = Some(class.subject_label().to_string());
        validation
    }

    fn map_decode_error(kind: &ErrorKind) -> AuthError {
        match kind {
            ErrorKind::InvalidSignature => AuthError::SignatureInvalid,
            ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidAlgorithmName
            | ErrorKind::MissingAlgorithm => AuthError::SigningMethodMismatch,
            ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience | ErrorKind::InvalidSubject => {
                AuthError::TokenClassMismatch
            }
            ErrorKind::Json(_) | ErrorKind::MissingRequiredClaim(_) => AuthError::ClaimsTypeInvalid,
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            ErrorKind::ImmatureSignature => AuthError::TokenNotYetValid,
            _ => AuthError::TokenMalformed,
        }
    }
}
