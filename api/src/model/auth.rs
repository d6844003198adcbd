use garde::Validate;
use kernel::model::user::User;
use serde::{Deserialize, Serialize};

use crate::model::user::UserResponse;

// Absent fields deserialize to their defaults and fail validation, so a
// missing credential reports as a field error instead of a decode error.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    #[garde(length(min = 1))]
    pub email: String,
    #[garde(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
}

impl LoginResponse {
    pub fn logged_in() -> Self {
        Self {
            success: true,
            message: "Login successful".into(),
        }
    }

    pub fn logged_out() -> Self {
        Self {
            success: true,
            message: "Logged out".into(),
        }
    }
}

// Session introspection never errors; an unusable token simply reads as
// an anonymous caller.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

impl SessionResponse {
    pub fn authenticated(user: User) -> Self {
        Self {
            authenticated: true,
            user: Some(user.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            user: None,
        }
    }
}
