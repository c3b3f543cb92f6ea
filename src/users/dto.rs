use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::AdminError;
use crate::users::model::{AssignableRole, PublicUser, UserChanges};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn check_username(username: &str) -> Result<(), AdminError> {
    let len = username.chars().count();
    if !(3..=50).contains(&len) {
        return Err(AdminError::validation(
            "username must be between 3 and 50 characters",
        ));
    }
    Ok(())
}

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<AssignableRole>,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), AdminError> {
        if !is_valid_email(&self.email) {
            return Err(AdminError::validation("invalid email format"));
        }
        check_username(&self.username)?;
        if self.password.chars().count() < 8 {
            return Err(AdminError::validation(
                "password must be at least 8 characters",
            ));
        }
        Ok(())
    }
}

/// Request body for `PATCH /admin/users/:id`. Role is deliberately absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), AdminError> {
        if let Some(username) = &self.username {
            check_username(username)?;
        }
        if let Some(email) = &self.email {
            if !is_valid_email(email) {
                return Err(AdminError::validation("invalid email format"));
            }
        }
        Ok(())
    }
}

impl From<UpdateUserRequest> for UserChanges {
    fn from(r: UpdateUserRequest) -> Self {
        Self {
            username: r.username,
            email: r.email,
            is_active: r.is_active,
        }
    }
}

/// Query string for `GET /admin/users`. Out-of-range values are clamped, not rejected.
#[derive(Debug, Default, Deserialize)]
pub struct ListUsersQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// One page of users.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPage {
    pub users: Vec<PublicUser>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}
