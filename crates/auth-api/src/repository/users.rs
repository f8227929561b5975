//! 사용자 저장소 (Postgres).
//!
//! 모든 쿼리는 정규화된 이메일을 전제로 합니다. 이메일 유일성의
//! 최종 보증은 `users` 테이블의 unique 제약이며, 충돌은
//! `AuthError::Conflict`로 변환됩니다.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use auth_core::{AuthError, AuthResult, NewUserAccount, Role, UserAccount, UserRepository};

/// DB에서 조회한 사용자 row.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    role: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for UserAccount {
    type Error = AuthError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        // 저장소의 역할 문자열이 닫힌 열거형에 속하지 않으면 데이터 결함
        let role = Role::parse(&row.role)
            .ok_or_else(|| AuthError::Database(format!("알 수 없는 역할: {}", row.role)))?;

        Ok(UserAccount {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            first_name: row.first_name,
            last_name: row.last_name,
            role,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const USER_COLUMNS: &str =
    "id, email, password_hash, first_name, last_name, role, is_active, created_at, updated_at";

/// Postgres 기반 사용자 저장소.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// 연결 풀에서 저장소 생성.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_db_err(e: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AuthError::Conflict("User with this email already exists".to_string());
        }
    }
    AuthError::Database(e.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> AuthResult<Option<UserAccount>> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_err)?;

        row.map(UserAccount::try_from).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> AuthResult<Option<UserAccount>> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_err)?;

        row.map(UserAccount::try_from).transpose()
    }

    async fn create(&self, new_user: NewUserAccount) -> AuthResult<UserAccount> {
        let now = Utc::now();

        let row: UserRow = sqlx::query_as(&format!(
            "INSERT INTO users ({USER_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(new_user.role.as_str())
        .bind(true)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_err)?;

        row.try_into()
    }

    async fn update(&self, user: UserAccount) -> AuthResult<UserAccount> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "UPDATE users \
             SET email = $2, password_hash = $3, first_name = $4, last_name = $5, \
                 role = $6, is_active = $7, updated_at = $8 \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.role.as_str())
        .bind(user.is_active)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_err)?;

        row.ok_or_else(|| AuthError::NotFound("User not found".to_string()))?
            .try_into()
    }

    async fn list(&self) -> AuthResult<Vec<UserAccount>> {
        let rows: Vec<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        rows.into_iter().map(UserAccount::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_role_in_row_is_rejected() {
        let now = Utc::now();
        let row = UserRow {
            id: Uuid::new_v4(),
            email: "a@b.com".to_string(),
            password_hash: "hash".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            role: "root".to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        assert!(matches!(
            UserAccount::try_from(row),
            Err(AuthError::Database(_))
        ));
    }

    #[test]
    fn test_known_role_roundtrip() {
        let now = Utc::now();
        let row = UserRow {
            id: Uuid::new_v4(),
            email: "a@b.com".to_string(),
            password_hash: "hash".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            role: "admin".to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let account = UserAccount::try_from(row).unwrap();
        assert_eq!(account.role, Role::Admin);
    }
}
