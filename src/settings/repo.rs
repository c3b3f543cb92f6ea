use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::StoreError;
use crate::settings::model::{NewSiteSetting, SiteSetting};

#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn find_by_key(&self, key: &str) -> Result<Option<SiteSetting>, StoreError>;
    async fn insert(&self, setting: NewSiteSetting) -> Result<SiteSetting, StoreError>;
    /// All settings ordered by category then key; private ones only on request.
    async fn list(&self, include_private: bool) -> Result<Vec<SiteSetting>, StoreError>;
}

const SETTING_COLUMNS: &str =
    "id, key, category, value, is_public, description, created_at, updated_at";

pub struct PgSettingsStore {
    db: PgPool,
}

impl PgSettingsStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SettingsStore for PgSettingsStore {
    async fn find_by_key(&self, key: &str) -> Result<Option<SiteSetting>, StoreError> {
        sqlx::query_as::<_, SiteSetting>(&format!(
            "SELECT {SETTING_COLUMNS} FROM site_settings WHERE key = $1 LIMIT 1"
        ))
        .bind(key)
        .fetch_optional(&self.db)
        .await
        .map_err(StoreError::from_sqlx)
    }

    async fn insert(&self, setting: NewSiteSetting) -> Result<SiteSetting, StoreError> {
        sqlx::query_as::<_, SiteSetting>(&format!(
            r#"
            INSERT INTO site_settings (key, category, value, is_public, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {SETTING_COLUMNS}
            "#
        ))
        .bind(&setting.key)
        .bind(&setting.category)
        .bind(&setting.value)
        .bind(setting.is_public)
        .bind(&setting.description)
        .fetch_one(&self.db)
        .await
        .map_err(StoreError::from_sqlx)
    }

    async fn list(&self, include_private: bool) -> Result<Vec<SiteSetting>, StoreError> {
        sqlx::query_as::<_, SiteSetting>(&format!(
            r#"
            SELECT {SETTING_COLUMNS}
            FROM site_settings
            WHERE is_public OR $1
            ORDER BY category ASC, key ASC
            "#
        ))
        .bind(include_private)
        .fetch_all(&self.db)
        .await
        .map_err(StoreError::from_sqlx)
    }
}
