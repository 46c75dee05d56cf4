//! 인증 코어가 사용하는 외부 협력자 인터페이스
//!
//! 코어는 이 trait들만 알고, 구체 저장소는 `main`에서 `Arc<dyn ...>`로 주입됩니다.
//! 모든 호출은 원격 작업일 수 있으므로 실패하면 `AuthError::PersistenceError`를 반환합니다.

use async_trait::async_trait;

use crate::domain::entities::{Role, SessionRecord, UserProfile};
use crate::errors::AuthResult;

/// 세션 레코드 저장소
///
/// 하나의 레코드는 주체와 현재 유효한 토큰 쌍을 연결합니다.
/// 저장소의 일관성(잠금, 트랜잭션)은 구현체의 책임입니다.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// 새 세션 레코드를 저장합니다.
    async fn put_session(&self, record: &SessionRecord) -> AuthResult<()>;

    /// 리프레시 토큰 문자열로 세션 레코드를 조회합니다.
    async fn find_by_refresh_token(&self, refresh_token: &str) -> AuthResult<Option<SessionRecord>>;

    /// 주체의 세션 중 해당 액세스 토큰을 가진 레코드가 있는지 확인합니다.
    async fn has_access_token(&self, subject_id: &str, access_token: &str) -> AuthResult<bool>;

    /// 같은 id의 레코드를 교체합니다. 레코드가 없으면 `false`를 반환합니다.
    async fn update_session(&self, record: &SessionRecord) -> AuthResult<bool>;

    /// 레코드를 삭제합니다. 레코드가 없었으면 `false`를 반환합니다.
    async fn delete_session(&self, session_id: &str) -> AuthResult<bool>;
}

/// 사용자 프로필 저장소
#[async_trait]
pub trait UserProfileStore: Send + Sync {
    async fn get_profile(&self, subject_id: &str) -> AuthResult<Option<UserProfile>>;
}

/// 역할 카탈로그
///
/// 역할 개수가 역할 비트 검사의 자릿수가 됩니다.
#[async_trait]
pub trait RoleCatalog: Send + Sync {
    /// id 오름차순으로 정렬된 역할 목록
    async fn list_roles(&self) -> AuthResult<Vec<Role>>;
}
