use crate::cache::SharedCache;
use crate::error::{Error, Result};
use crate::graphql::api::JobBoardApi;
use crate::models::application::ApplicationStatus;
use crate::models::offer::Offer;
use crate::models::user::Role;
use crate::services::application_service::ApplicationService;
use crate::services::offer_service::OfferService;
use std::sync::Arc;

pub const MSG_OFFER_NOT_FOUND: &str = "No se encontró la oferta solicitada.";
pub const MSG_ALREADY_APPLIED: &str = "Ya has postulado a esta oferta.";

/// What the apply button turns into for the current user.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyAffordance {
    /// Student who has not applied yet.
    Apply,
    /// Student who already applied: the form downgrades to a read-only
    /// viewer of the submitted message, with no submit control.
    View {
        message: String,
        status: ApplicationStatus,
    },
    /// Heads of career do not apply.
    Hidden,
}

pub struct OfferInfoScreen {
    offers: OfferService,
    applications: ApplicationService,
    cache: SharedCache,
    offer_id: String,
}

impl OfferInfoScreen {
    pub fn new(api: Arc<dyn JobBoardApi>, cache: SharedCache, offer_id: impl Into<String>) -> Self {
        Self {
            offers: OfferService::new(api.clone(), cache.clone()),
            applications: ApplicationService::new(api, cache.clone()),
            cache,
            offer_id: offer_id.into(),
        }
    }

    pub async fn load(&self) -> Result<Offer> {
        self.offers.get(&self.offer_id).await
    }

    pub async fn affordance(&self) -> Result<ApplyAffordance> {
        let Some(profile) = self.cache.profile() else {
            return Ok(ApplyAffordance::Hidden);
        };
        if profile.role != Role::Student {
            return Ok(ApplyAffordance::Hidden);
        }
        match self.applications.my_application_for(&self.offer_id).await? {
            Some(existing) => Ok(ApplyAffordance::View {
                message: existing.message,
                status: existing.status,
            }),
            None => Ok(ApplyAffordance::Apply),
        }
    }

    /// Submits the application, then refetches the caller's applications
    /// (done by the service). Double-applying is rejected locally.
    pub async fn apply(&self, message: &str) -> Result<()> {
        match self.affordance().await? {
            ApplyAffordance::Apply => self.applications.apply(&self.offer_id, message).await,
            ApplyAffordance::View { .. } => Err(Error::api(MSG_ALREADY_APPLIED)),
            ApplyAffordance::Hidden => Err(Error::Unauthorized(
                "Solo un estudiante puede postular.".to_string(),
            )),
        }
    }
}
