//! # 사용자 리포지토리 구현
//!
//! MongoDB의 `users`, `roles` 컬렉션에서 사용자 프로필과 역할 카탈로그를 읽습니다.
//! 사용자 레코드의 생성과 수정은 이 서비스의 범위 밖이므로 읽기 연산만 제공합니다.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use serde::{Deserialize, Serialize};

use crate::db::Database;
use crate::domain::entities::{Role, UserProfile};
use crate::errors::{AuthResult, ErrorContext};
use crate::repositories::ports::{RoleCatalog, UserProfileStore};

/// `users` 컬렉션 문서
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub role: i64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl From<UserDocument> for UserProfile {
    fn from(doc: UserDocument) -> Self {
        Self {
            id: doc.id.to_hex(),
            role: doc.role,
            email: doc.email,
            username: doc.username,
        }
    }
}

/// `roles` 컬렉션 문서. `_id`가 역할 비트 값입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleDocument {
    #[serde(rename = "_id")]
    pub id: i64,
    pub title: String,
}

impl From<RoleDocument> for Role {
    fn from(doc: RoleDocument) -> Self {
        Role::new(doc.id, doc.title)
    }
}

/// 사용자 데이터 액세스 리포지토리
///
/// ## 컬렉션
///
/// - `users` - `{ _id: ObjectId, role: i64, email?, username? }`
/// - `roles` - `{ _id: i64, title: String }`
///
/// ## 사용 예제
///
/// ```rust,ignore
/// let repo = MongoUserRepository::new(Arc::new(database));
/// let profile = repo.get_profile("65f1c0...").await?;
/// let roles = repo.list_roles().await?;
/// ```
pub struct MongoUserRepository {
    db: Arc<Database>,
}

impl MongoUserRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn users(&self) -> mongodb::Collection<UserDocument> {
        self.db.get_database().collection::<UserDocument>("users")
    }

    fn roles(&self) -> mongodb::Collection<RoleDocument> {
        self.db.get_database().collection::<RoleDocument>("roles")
    }
}

#[async_trait]
impl UserProfileStore for MongoUserRepository {
    /// ObjectId 형식이 아닌 ID는 존재하지 않는 사용자로 취급합니다.
    async fn get_profile(&self, subject_id: &str) -> AuthResult<Option<UserProfile>> {
        let Ok(object_id) = ObjectId::parse_str(subject_id) else {
            log::debug!("ObjectId 형식이 아닌 사용자 ID: {}", subject_id);
            return Ok(None);
        };

        let user = self
            .users()
            .find_one(doc! { "_id": object_id })
            .await
            .context("사용자 조회 실패")?;

        Ok(user.map(UserProfile::from))
    }
}

#[async_trait]
impl RoleCatalog for MongoUserRepository {
    async fn list_roles(&self) -> AuthResult<Vec<Role>> {
        let cursor = self
            .roles()
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .await
            .context("역할 목록 조회 실패")?;

        let roles: Vec<RoleDocument> = cursor
            .try_collect()
            .await
            .context("역할 목록 읽기 실패")?;

        Ok(roles.into_iter().map(Role::from).collect())
    }
}
