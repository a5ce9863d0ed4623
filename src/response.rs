//! Response bodies shared across modules.

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CountResponse {
    pub success: bool,
    pub count: i64,
}

impl CountResponse {
    pub fn ok(count: i64) -> Self {
        Self {
            success: true,
            count,
        }
    }
}

/// Body of every rejected request.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}
