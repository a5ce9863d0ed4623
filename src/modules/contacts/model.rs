use ironpass_models::Contact;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
    pub contact: Contact,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ContactListResponse {
    pub success: bool,
    pub contacts: Vec<Contact>,
}
