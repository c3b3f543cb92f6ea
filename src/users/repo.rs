use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::StoreError;
use crate::users::model::{NewUser, User, UserChanges};

/// Persistence contract for the `users` table.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;
    /// One page ordered by id ascending.
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, StoreError>;
    async fn count(&self) -> Result<i64, StoreError>;
    /// Applies `changes` and refreshes `updated_at`. `None` if the row is gone.
    async fn update(&self, id: i64, changes: UserChanges) -> Result<Option<User>, StoreError>;
    async fn deactivate(&self, id: i64) -> Result<(), StoreError>;
}

const USER_COLUMNS: &str = "id, email, username, password_hash, role, is_active, \
                            is_email_verified, created_at, updated_at";

pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(StoreError::from_sqlx)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 LIMIT 1"
        ))
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .map_err(StoreError::from_sqlx)
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (email, username, password_hash, role, is_active, is_email_verified)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&user.email)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.is_active)
        .bind(user.is_email_verified)
        .fetch_one(&self.db)
        .await
        .map_err(StoreError::from_sqlx)
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, StoreError> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            ORDER BY id ASC
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .map_err(StoreError::from_sqlx)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(id) FROM users")
            .fetch_one(&self.db)
            .await
            .map_err(StoreError::from_sqlx)?;
        Ok(total)
    }

    async fn update(&self, id: i64, changes: UserChanges) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
               SET username   = COALESCE($2, username),
                   email      = COALESCE($3, email),
                   is_active  = COALESCE($4, is_active),
                   updated_at = now()
             WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(changes.username)
        .bind(changes.email)
        .bind(changes.is_active)
        .fetch_optional(&self.db)
        .await
        .map_err(StoreError::from_sqlx)
    }

    async fn deactivate(&self, id: i64) -> Result<(), StoreError> {
        sqlx::query("UPDATE users SET is_active = FALSE, updated_at = now() WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(StoreError::from_sqlx)?;
        Ok(())
    }
}
