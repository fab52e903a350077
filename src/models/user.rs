// src/models/user.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// The authenticated user's profile, as returned by the login endpoint
/// and persisted alongside the access token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: String,
    #[serde(default)]
    pub preferences: Preferences,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications: Option<bool>,
}

/// An authenticated session: the opaque access token plus the profile it
/// belongs to. Both are always present together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Wire shape of a successful `POST /token` response.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub created_at: String,
    #[serde(default)]
    pub preferences: Preferences,
}

impl From<LoginResponse> for Session {
    fn from(response: LoginResponse) -> Self {
        Session {
            token: response.access_token,
            user: User {
                id: response.user_id,
                username: response.username,
                email: response.email,
                created_at: response.created_at,
                preferences: response.preferences,
            },
        }
    }
}

/// DTO for creating a new account (Registration).
#[derive(Debug, Serialize, Validate)]
pub struct SignupRequest {
    #[validate(length(
        min = 3,
        max = 50,
        message = "Username length must be between 3 and 50 characters."
    ))]
    pub username: String,
    #[validate(email(message = "Please enter a valid email address."))]
    pub email: String,
    #[validate(length(
        min = 8,
        max = 128,
        message = "Password length must be between 8 and 128 characters."
    ))]
    pub password: String,
}

/// DTO for `PUT /users/{username}`. Only the populated fields change;
/// a password change requires the current password as well.
#[derive(Debug, Default, Serialize, Validate)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 3, max = 50))]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Preferences>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 8, max = 128))]
    pub new_password: Option<String>,
}

/// DTO for user login.
#[derive(Debug, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}
