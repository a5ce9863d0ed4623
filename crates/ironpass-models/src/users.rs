//! Member models and authentication DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Access level of a member.
///
/// Stored and serialized as its integer discriminant (`0` regular, `1` admin),
/// which is also what the web client expects to read back.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type,
)]
#[serde(into = "i16", try_from = "i16")]
#[repr(i16)]
pub enum Role {
    #[default]
    Regular = 0,
    Admin = 1,
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Interprets the loosely-typed `role` field of a registration payload.
    ///
    /// `1`, `"1"` and `"admin"` select [`Role::Admin`]; anything else, including
    /// a missing field, yields [`Role::Regular`].
    pub fn from_input(value: Option<&serde_json::Value>) -> Role {
        match value {
            Some(serde_json::Value::Number(n)) if n.as_i64() == Some(1) => Role::Admin,
            Some(serde_json::Value::String(s)) => match s.trim() {
                "1" | "admin" => Role::Admin,
                _ => Role::Regular,
            },
            _ => Role::Regular,
        }
    }
}

impl From<Role> for i16 {
    fn from(role: Role) -> i16 {
        role as i16
    }
}

impl TryFrom<i16> for Role {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Role::Regular),
            1 => Ok(Role::Admin),
            other => Err(format!("unknown role {other}")),
        }
    }
}

/// A member record without its credential secret.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub city: String,
    pub contact: String,
    #[schema(value_type = i16)]
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            city: self.city.clone(),
            contact: self.contact.clone(),
            role: self.role,
            is_admin: self.role.is_admin(),
            created_at: self.created_at,
        }
    }
}

/// The fields needed to check a login attempt.
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub city: String,
    pub contact: String,
    pub role: Role,
}

/// Partial profile update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub password_hash: Option<String>,
    pub city: Option<String>,
    pub contact: Option<String>,
}

/// Public view of a member, as returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub city: String,
    pub contact: String,
    #[schema(value_type = i16)]
    pub role: Role,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "Contact is required"))]
    pub contact: String,
    #[schema(value_type = Option<String>)]
    #[serde(default)]
    pub role: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub user: UserSummary,
    pub token: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub new_password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(length(min = 6, message = "Password is required and 6 character long"))]
    pub password: Option<String>,
    #[validate(length(min = 1))]
    pub city: Option<String>,
    pub contact: Option<String>,
}

/// Contact numbers are exactly ten ASCII digits.
pub fn is_valid_contact(contact: &str) -> bool {
    contact.len() == 10 && contact.bytes().all(|b| b.is_ascii_digit())
}
