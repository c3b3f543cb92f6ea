//! In-process [`SettingsStore`] for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::error::StoreError;
use crate::settings::model::{NewSiteSetting, SiteSetting};
use crate::settings::repo::SettingsStore;

#[derive(Default)]
pub struct MemorySettingsStore {
    rows: Mutex<Vec<SiteSetting>>,
    /// Insert calls fail once this many rows exist.
    fail_after: Option<usize>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_after(rows: usize) -> Self {
        Self { fail_after: Some(rows), ..Self::default() }
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn value_of(&self, key: &str) -> Option<serde_json::Value> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.key == key)
            .map(|s| s.value.clone())
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn find_by_key(&self, key: &str) -> Result<Option<SiteSetting>, StoreError> {
        Ok(self.rows.lock().unwrap().iter().find(|s| s.key == key).cloned())
    }

    async fn insert(&self, setting: NewSiteSetting) -> Result<SiteSetting, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        if self.fail_after.is_some_and(|n| rows.len() >= n) {
            return Err(StoreError::Database(sqlx::Error::PoolClosed));
        }
        if rows.iter().any(|s| s.key == setting.key) {
            return Err(StoreError::UniqueViolation("site_settings_key_key".into()));
        }
        let now = OffsetDateTime::now_utc();
        let row = SiteSetting {
            id: rows.len() as i64 + 1,
            key: setting.key,
            category: setting.category,
            value: setting.value,
            is_public: setting.is_public,
            description: setting.description,
            created_at: now,
            updated_at: now,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn list(&self, include_private: bool) -> Result<Vec<SiteSetting>, StoreError> {
        let mut out: Vec<SiteSetting> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.is_public || include_private)
            .cloned()
            .collect();
        out.sort_by(|a, b| (&a.category, &a.key).cmp(&(&b.category, &b.key)));
        Ok(out)
    }
}
