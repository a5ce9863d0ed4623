//! Operator commands that run outside the HTTP server.

use anyhow::anyhow;
use ironpass_core::{AppError, hash_password};
use ironpass_db::{StoreError, UserStore};
use ironpass_models::{NewUser, Role, UserSummary, is_valid_contact};
use tracing::info;

/// Details for a new administrator account.
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub name: String,
    pub email: String,
    pub password: String,
    pub city: String,
    pub contact: String,
}

/// Creates an administrator, refusing duplicates by email.
pub async fn create_admin(
    users: &dyn UserStore,
    account: AdminAccount,
) -> Result<UserSummary, AppError> {
    if account.password.len() < 6 {
        return Err(AppError::bad_request(anyhow!(
            "Password must be at least 6 characters"
        )));
    }
    if !is_valid_contact(&account.contact) {
        return Err(AppError::bad_request(anyhow!(
            "Contact must be a 10 digit number"
        )));
    }

    let email = account.email.trim().to_lowercase();
    if users.find_by_email(&email).await?.is_some() {
        return Err(AppError::conflict(anyhow!(
            "User with this email already exists"
        )));
    }

    let user = users
        .create(NewUser {
            name: account.name.trim().to_string(),
            email,
            password_hash: hash_password(&account.password)?,
            city: account.city.trim().to_string(),
            contact: account.contact,
            role: Role::Admin,
        })
        .await
        .map_err(|e| match e {
            StoreError::Conflict(msg) => AppError::conflict(anyhow!(msg)),
            other => AppError::internal(other),
        })?;

    info!(user_id = %user.id, "Admin account created");
    Ok(user.summary())
}
