//! 프로세스 메모리 기반 저장소
//!
//! 로컬 실행(`AUTH_STORE=memory`)과 테스트에서 외부 저장소 대신 사용합니다.
//! 프로세스가 종료되면 모든 세션이 사라집니다.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, RwLockWriteGuard};

use async_trait::async_trait;

use crate::core::Clock;
use crate::domain::entities::{Role, SessionRecord, UserProfile};
use crate::errors::{AuthError, AuthResult};
use crate::repositories::ports::{CredentialStore, RoleCatalog, UserProfileStore};

#[derive(Default)]
struct SessionTable {
    by_id: HashMap<String, SessionRecord>,
    /// refresh token → session id
    by_refresh: HashMap<String, String>,
    /// (subject id, access token) → session id
    by_access: HashMap<(String, String), String>,
}

impl SessionTable {
    fn insert(&mut self, record: SessionRecord) {
        self.by_refresh.insert(record.refresh_token.clone(), record.id.clone());
        self.by_access.insert(
            (record.subject_id.clone(), record.access_token.clone()),
            record.id.clone(),
        );
        self.by_id.insert(record.id.clone(), record);
    }

    fn remove(&mut self, session_id: &str) -> Option<SessionRecord> {
        let record = self.by_id.remove(session_id)?;
        self.by_refresh.remove(&record.refresh_token);
        self.by_access
            .remove(&(record.subject_id.clone(), record.access_token.clone()));
        Some(record)
    }

    /// 세션을 찾되, 만료된 세션은 제거하고 없는 것으로 취급합니다.
    fn live(&mut self, session_id: &str, now: i64) -> Option<&SessionRecord> {
        let expired = self.by_id.get(session_id)?.expires_at < now;
        if expired {
            self.remove(session_id);
            return None;
        }
        self.by_id.get(session_id)
    }

    fn prune(&mut self, now: i64) {
        let expired: Vec<String> = self
            .by_id
            .values()
            .filter(|r| r.expires_at < now)
            .map(|r| r.id.clone())
            .collect();
        for id in expired {
            self.remove(&id);
        }
    }
}

/// 메모리 세션 저장소
///
/// 리프레시 토큰 만료 시각(`expires_at`)이 지난 세션은 조회되지 않으며,
/// 새 세션을 저장할 때 일괄 정리됩니다.
pub struct InMemoryCredentialStore {
    table: RwLock<SessionTable>,
    clock: Arc<dyn Clock>,
    unavailable: AtomicBool,
}

impl InMemoryCredentialStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            table: RwLock::new(SessionTable::default()),
            clock,
            unavailable: AtomicBool::new(false),
        }
    }

    /// 저장소 장애를 흉내 냅니다. 이후 모든 호출이 `PersistenceError`로 실패합니다.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// 저장된 세션 수 (정리되지 않은 만료 세션 포함)
    pub fn session_count(&self) -> usize {
        self.table.read().unwrap_or_else(|e| e.into_inner()).by_id.len()
    }

    fn ensure_available(&self) -> AuthResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AuthError::PersistenceError("credential store unavailable".to_string()));
        }
        Ok(())
    }

    fn write_table(&self) -> RwLockWriteGuard<'_, SessionTable> {
        self.table.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn put_session(&self, record: &SessionRecord) -> AuthResult<()> {
        self.ensure_available()?;
        let mut table = self.write_table();
        table.prune(self.clock.timestamp());
        table.insert(record.clone());
        Ok(())
    }

    async fn find_by_refresh_token(&self, refresh_token: &str) -> AuthResult<Option<SessionRecord>> {
        self.ensure_available()?;
        let mut table = self.write_table();
        let Some(id) = table.by_refresh.get(refresh_token).cloned() else {
            return Ok(None);
        };
        Ok(table.live(&id, self.clock.timestamp()).cloned())
    }

    async fn has_access_token(&self, subject_id: &str, access_token: &str) -> AuthResult<bool> {
        self.ensure_available()?;
        let mut table = self.write_table();
        let key = (subject_id.to_string(), access_token.to_string());
        let Some(id) = table.by_access.get(&key).cloned() else {
            return Ok(false);
        };
        Ok(table.live(&id, self.clock.timestamp()).is_some())
    }

    async fn update_session(&self, record: &SessionRecord) -> AuthResult<bool> {
        self.ensure_available()?;
        let mut table = self.write_table();
        if table.live(&record.id, self.clock.timestamp()).is_none() {
            return Ok(false);
        }
        table.remove(&record.id);
        table.insert(record.clone());
        Ok(true)
    }

    async fn delete_session(&self, session_id: &str) -> AuthResult<bool> {
        self.ensure_available()?;
        let mut table = self.write_table();
        if table.live(session_id, self.clock.timestamp()).is_none() {
            return Ok(false);
        }
        Ok(table.remove(session_id).is_some())
    }
}

/// 메모리 사용자 디렉터리 (프로필 저장소 + 역할 카탈로그)
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<String, UserProfile>>,
    roles: RwLock<Vec<Role>>,
}

impl Default for InMemoryUserDirectory {
    fn default() -> Self {
        Self::with_roles(Role::defaults())
    }
}

impl InMemoryUserDirectory {
    /// 기본 역할(customer, admin)을 가진 빈 디렉터리
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_roles(roles: Vec<Role>) -> Self {
        let mut roles = roles;
        roles.sort_by_key(|r| r.id);
        Self {
            users: RwLock::new(HashMap::new()),
            roles: RwLock::new(roles),
        }
    }

    /// 사용자 프로필을 추가하거나 교체합니다.
    pub fn upsert(&self, profile: UserProfile) {
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());
        users.insert(profile.id.clone(), profile);
    }

    /// 사용자 역할을 변경합니다. 사용자가 없으면 `false`를 반환합니다.
    pub fn set_role(&self, subject_id: &str, role: i64) -> bool {
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());
        match users.get_mut(subject_id) {
            Some(profile) => {
                profile.role = role;
                true
            }
            None => false,
        }
    }

    pub fn remove(&self, subject_id: &str) -> Option<UserProfile> {
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());
        users.remove(subject_id)
    }
}

#[async_trait]
impl UserProfileStore for InMemoryUserDirectory {
    async fn get_profile(&self, subject_id: &str) -> AuthResult<Option<UserProfile>> {
        let users = self.users.read().unwrap_or_else(|e| e.into_inner());
        Ok(users.get(subject_id).cloned())
    }
}

#[async_trait]
impl RoleCatalog for InMemoryUserDirectory {
    async fn list_roles(&self) -> AuthResult<Vec<Role>> {
        Ok(self.roles.read().unwrap_or_else(|e| e.into_inner()).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ManualClock;
    use chrono::{Duration, Utc};

    fn record(subject: &str, access: &str, refresh: &str) -> SessionRecord {
        SessionRecord::new(subject, access, refresh, 2_000, Utc::now())
    }

    fn store() -> (InMemoryCredentialStore, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::at_timestamp(1_000));
        (InMemoryCredentialStore::new(clock.clone()), clock)
    }

    #[actix_web::test]
    async fn test_session_lifecycle() {
        let (store, _clock) = store();
        let original = record("u1", "a1", "r1");
        store.put_session(&original).await.unwrap();

        assert!(store.has_access_token("u1", "a1").await.unwrap());
        assert!(!store.has_access_token("u2", "a1").await.unwrap());
        assert_eq!(
            store.find_by_refresh_token("r1").await.unwrap().map(|r| r.id),
            Some(original.id.clone())
        );

        let rotated = original.rotated("a2", "r2", Utc::now());
        assert!(store.update_session(&rotated).await.unwrap());
        assert!(store.find_by_refresh_token("r1").await.unwrap().is_none());
        assert!(!store.has_access_token("u1", "a1").await.unwrap());
        assert!(store.has_access_token("u1", "a2").await.unwrap());

        assert!(store.delete_session(&original.id).await.unwrap());
        assert!(!store.delete_session(&original.id).await.unwrap());
        assert!(!store.update_session(&rotated).await.unwrap());
        assert_eq!(store.session_count(), 0);
    }

    #[actix_web::test]
    async fn test_expired_sessions_are_dropped() {
        let (store, clock) = store();
        let stale = record("u1", "a1", "r1");
        store.put_session(&stale).await.unwrap();

        // 만료 시각까지는 유효
        clock.advance(Duration::seconds(1_000));
        assert!(store.has_access_token("u1", "a1").await.unwrap());

        clock.advance(Duration::seconds(1));
        assert!(!store.has_access_token("u1", "a1").await.unwrap());
        assert!(store.find_by_refresh_token("r1").await.unwrap().is_none());
        assert!(!store.update_session(&stale.rotated("a2", "r2", Utc::now())).await.unwrap());
        assert_eq!(store.session_count(), 0);

        // 조회되지 않은 만료 세션은 다음 저장 때 정리된다
        let short = SessionRecord::new("u2", "b1", "s1", 2_001, Utc::now());
        store.put_session(&short).await.unwrap();
        clock.advance(Duration::seconds(1));
        let fresh = SessionRecord::new("u3", "c1", "t1", 9_000, Utc::now());
        store.put_session(&fresh).await.unwrap();
        assert_eq!(store.session_count(), 1);
        assert!(store.has_access_token("u3", "c1").await.unwrap());
    }

    #[actix_web::test]
    async fn test_unavailable_store_fails() {
        let (store, _clock) = store();
        store.set_unavailable(true);

        let result = store.put_session(&record("u1", "a", "r")).await;
        assert!(matches!(result, Err(AuthError::PersistenceError(_))));
    }

    #[actix_web::test]
    async fn test_user_directory() {
        let directory = InMemoryUserDirectory::with_roles(vec![
            Role::new(4, "staff"),
            Role::new(1, "customer"),
            Role::new(2, "admin"),
        ]);
        directory.upsert(UserProfile::new("u1", 1));

        let ids: Vec<i64> = directory.list_roles().await.unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 4]);

        assert!(directory.set_role("u1", 2));
        assert_eq!(directory.get_profile("u1").await.unwrap().map(|p| p.role), Some(2));
        assert!(directory.get_profile("missing").await.unwrap().is_none());
    }
}
