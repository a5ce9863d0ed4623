use axum::{Json, extract::State, http::StatusCode};
use ironpass_core::AppError;
use ironpass_models::CreateContactRequest;
use tracing::instrument;

use super::model::{ContactListResponse, ContactResponse};
use super::service::ContactService;
use crate::response::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Submit the contact form
#[utoipa::path(
    post,
    path = "/api/v1/contact/create-contact",
    request_body = CreateContactRequest,
    responses(
        (status = 201, description = "Contact request saved", body = ContactResponse),
        (status = 400, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Contact"
)]
#[instrument(skip(state, dto))]
pub async fn create_contact(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateContactRequest>,
) -> Result<(StatusCode, Json<ContactResponse>), AppError> {
    let contact = ContactService::create(&state, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            success: true,
            message: "Contact created successfully".to_string(),
            contact,
        }),
    ))
}

/// List every contact request
#[utoipa::path(
    get,
    path = "/api/v1/contact/getall-contact",
    responses(
        (status = 200, description = "Contact requests", body = ContactListResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Contact"
)]
pub async fn get_all_contacts(
    State(state): State<AppState>,
) -> Result<Json<ContactListResponse>, AppError> {
    let contacts = ContactService::list(&state).await?;
    Ok(Json(ContactListResponse {
        success: true,
        contacts,
    }))
}
