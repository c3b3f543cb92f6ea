use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

/// Named configuration blob read by the public site.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SiteSetting {
    pub id: i64,
    pub key: String,
    pub category: String,
    pub value: serde_json::Value,
    pub is_public: bool,
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSiteSetting {
    pub key: String,
    pub category: String,
    pub value: serde_json::Value,
    pub is_public: bool,
    pub description: Option<String>,
}
