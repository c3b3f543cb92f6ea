//! In-process [`UserStore`] used by unit and router tests.

use std::sync::Mutex;

use async_trait::async_trait;
use lazy_static::lazy_static;
use time::OffsetDateTime;

use crate::error::StoreError;
use crate::users::model::{NewUser, Role, User, UserChanges};
use crate::users::repo::UserStore;

/// Plaintext behind every seeded row's hash.
pub const SEED_PASSWORD: &str = "correct-horse-battery";

lazy_static! {
    static ref SEED_HASH: String =
        crate::auth::password::hash_password(SEED_PASSWORD).expect("hash seed password");
}

#[derive(Default)]
pub struct MemoryUserStore {
    rows: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a row directly, bypassing the admin rules. Returns its id.
    pub fn seed(&self, email: &str, role: Role, is_active: bool) -> i64 {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.len() as i64 + 1;
        let now = OffsetDateTime::now_utc();
        rows.push(User {
            id,
            email: email.to_string(),
            username: email.split('@').next().unwrap_or(email).to_string(),
            password_hash: SEED_HASH.clone(),
            role,
            is_active,
            is_email_verified: true,
            created_at: now,
            updated_at: now,
        });
        id
    }

    pub fn snapshot(&self, id: i64) -> Option<User> {
        self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(self.snapshot(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.email == user.email) {
            return Err(StoreError::UniqueViolation("users_email_key".into()));
        }
        let now = OffsetDateTime::now_utc();
        let row = User {
            id: rows.len() as i64 + 1,
            email: user.email,
            username: user.username,
            password_hash: user.password_hash,
            role: user.role,
            is_active: user.is_active,
            is_email_verified: user.is_email_verified,
            created_at: now,
            updated_at: now,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, StoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.rows.lock().unwrap().len() as i64)
    }

    async fn update(&self, id: i64, changes: UserChanges) -> Result<Option<User>, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(email) = &changes.email {
            if rows.iter().any(|u| &u.email == email && u.id != id) {
                return Err(StoreError::UniqueViolation("users_email_key".into()));
            }
        }
        let Some(row) = rows.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(username) = changes.username {
            row.username = username;
        }
        if let Some(email) = changes.email {
            row.email = email;
        }
        if let Some(is_active) = changes.is_active {
            row.is_active = is_active;
        }
        row.updated_at = OffsetDateTime::now_utc();
        Ok(Some(row.clone()))
    }

    async fn deactivate(&self, id: i64) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|u| u.id == id) {
            row.is_active = false;
            row.updated_at = OffsetDateTime::now_utc();
        }
        Ok(())
    }
}

/// Store whose every call fails, for exercising error paths.
pub struct BrokenUserStore;

#[async_trait]
impl UserStore for BrokenUserStore {
    async fn find_by_id(&self, _id: i64) -> Result<Option<User>, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
    async fn insert(&self, _user: NewUser) -> Result<User, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
    async fn list(&self, _limit: i64, _offset: i64) -> Result<Vec<User>, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
    async fn count(&self) -> Result<i64, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
    async fn update(&self, _id: i64, _changes: UserChanges) -> Result<Option<User>, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
    async fn deactivate(&self, _id: i64) -> Result<(), StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
}
