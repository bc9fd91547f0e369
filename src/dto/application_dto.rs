use crate::models::application::ApplicationStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusInput {
    pub application_id: String,
    pub status: ApplicationStatus,
}

impl UpdateStatusInput {
    pub fn new(application_id: impl Into<String>, status: ApplicationStatus) -> Self {
        Self {
            application_id: application_id.into(),
            status,
        }
    }
}
