use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub city: String,
    pub phone: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub city: String,
    pub phone: String,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateContactRequest {
    #[validate(length(min = 1, message = "name is Required"))]
    pub name: String,
    #[validate(email(message = "email is Required"))]
    pub email: String,
    #[validate(length(min = 1, message = "city is Required"))]
    pub city: String,
    #[validate(length(min = 1, message = "phone is Required"))]
    pub phone: String,
    #[validate(length(min = 1, message = "message is Required"))]
    pub message: String,
}

impl From<CreateContactRequest> for NewContact {
    fn from(dto: CreateContactRequest) -> Self {
        Self {
            name: dto.name,
            email: dto.email,
            city: dto.city,
            phone: dto.phone,
            message: dto.message,
        }
    }
}
