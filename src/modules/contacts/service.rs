use anyhow::Context;
use ironpass_core::AppError;
use ironpass_models::{Contact, CreateContactRequest};
use tracing::{info, instrument};

use crate::state::AppState;

pub struct ContactService;

impl ContactService {
    #[instrument(skip(state, dto), fields(email = %dto.email))]
    pub async fn create(state: &AppState, dto: CreateContactRequest) -> Result<Contact, AppError> {
        let contact = state
            .contacts
            .create(dto.into())
            .await
            .context("Failed to save contact request")?;

        info!(contact_id = %contact.id, "Contact request received");
        Ok(contact)
    }

    pub async fn list(state: &AppState) -> Result<Vec<Contact>, AppError> {
        let contacts = state
            .contacts
            .list()
            .await
            .context("Failed to list contacts")?;
        Ok(contacts)
    }
}
