//! 비트 위치 기반 역할 인가 엔진
//!
//! 허용 역할 목록을 하나의 정수(비트마스크)로 합산한 뒤, 호출자 역할과 함께
//! 역할 개수 N 자리의 이진 자릿수 배열로 변환하여 위치별로 AND 비교합니다.
//!
//! ```text
//! required = [1, 2]  → sum 3 → [1, 1]
//! user     = 2              → [1, 0]
//!                              ^ 일치 → 허용
//! ```

use std::sync::Arc;

use crate::errors::{AuthError, AuthResult};
use crate::repositories::ports::RoleCatalog;
use crate::utils::bit_utils::{binary_digits, fits_width, is_single_bit};

/// 역할 인가 서비스
///
/// 자릿수 N은 역할 카탈로그의 역할 개수로 결정됩니다.
pub struct RoleService {
    catalog: Arc<dyn RoleCatalog>,
}

impl RoleService {
    pub fn new(catalog: Arc<dyn RoleCatalog>) -> Self {
        Self { catalog }
    }

    /// 호출자 역할이 허용 역할 중 하나인지 판정합니다.
    ///
    /// # Arguments
    ///
    /// * `user_role` - 호출자의 단일 비트 역할
    /// * `required_roles` - 허용 역할 목록. 중복은 한 번만 합산합니다.
    ///   값은 순번(0, 1, 2, …)이 아닌 비트 값(1, 2, 4, …)입니다.
    /// * `role_count` - 알려진 역할 개수 (자릿수 N)
    ///
    /// # Returns
    ///
    /// 일치하는 비트 위치가 있으면 `true`, 없으면 `false`. 빈 목록은 항상 `false`입니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::MalformedRole` - 역할 값이 단일 비트가 아니거나 N 자리를 벗어남
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// assert!(RoleService::authorize(1, &[1, 2], 2)?);
    /// assert!(!RoleService::authorize(1, &[2], 2)?);
    /// ```
    pub fn authorize(user_role: i64, required_roles: &[i64], role_count: usize) -> AuthResult<bool> {
        Self::ensure_role(user_role, role_count)?;

        let mut required = required_roles.to_vec();
        required.sort_unstable();
        required.dedup();

        let mut expected_sum = 0_i64;
        for role in required {
            Self::ensure_role(role, role_count)?;
            expected_sum += role;
        }

        let expected = binary_digits(expected_sum, role_count);
        let user = binary_digits(user_role, role_count);

        Ok(user
            .iter()
            .zip(expected.iter())
            .any(|(u, e)| u & e == 1))
    }

    /// 역할 카탈로그의 역할 개수를 자릿수로 사용하여 판정합니다.
    pub async fn authorize_with_catalog(&self, user_role: i64, required_roles: &[i64]) -> AuthResult<bool> {
        let role_count = self.role_count().await?;
        Self::authorize(user_role, required_roles, role_count)
    }

    /// 현재 역할 개수
    pub async fn role_count(&self) -> AuthResult<usize> {
        Ok(self.catalog.list_roles().await?.len())
    }

    /// 단일 비트이고 N 자리 안에 표현되는 역할인지 확인합니다.
    pub fn ensure_role(role: i64, role_count: usize) -> AuthResult<()> {
        if is_single_bit(role) && fits_width(role, role_count) {
            Ok(())
        } else {
            Err(AuthError::MalformedRole(role))
        }
    }
}
