//! 테스트용 인메모리 사용자 저장소.
//!
//! Postgres 구현과 동일한 계약(이메일 유일성, NotFound 처리)을
//! 따르므로 라우트 테스트를 데이터베이스 없이 실행할 수 있습니다.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use auth_core::{AuthError, AuthResult, NewUserAccount, UserAccount, UserRepository};

/// 인메모리 사용자 저장소.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, UserAccount>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> AuthResult<Option<UserAccount>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AuthResult<Option<UserAccount>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn create(&self, new_user: NewUserAccount) -> AuthResult<UserAccount> {
        let mut users = self.users.write().await;

        // Postgres unique 제약과 동일한 충돌 계약
        if users.values().any(|u| u.email == new_user.email) {
            return Err(AuthError::Conflict(
                "User with this email already exists".to_string(),
            ));
        }

        let now = Utc::now();
        let account = UserAccount {
            id: Uuid::new_v4(),
            email: new_user.email,
            password_hash: new_user.password_hash,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            role: new_user.role,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        users.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(&self, user: UserAccount) -> AuthResult<UserAccount> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(AuthError::NotFound("User not found".to_string()));
        }

        let updated = UserAccount {
            updated_at: Utc::now(),
            ..user
        };
        users.insert(updated.id, updated.clone());
        Ok(updated)
    }

    async fn list(&self) -> AuthResult<Vec<UserAccount>> {
        let users = self.users.read().await;
        let mut all: Vec<UserAccount> = users.values().cloned().collect();
        all.sort_by_key(|u| u.created_at);
        Ok(all)
    }
}
