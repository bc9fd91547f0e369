use crate::cache::SharedCache;
use crate::dto::offer_dto::ApplyInput;
use crate::error::Result;
use crate::graphql::api::JobBoardApi;
use crate::models::application::Application;
use std::sync::Arc;

#[derive(Clone)]
pub struct ApplicationService {
    api: Arc<dyn JobBoardApi>,
    cache: SharedCache,
}

impl ApplicationService {
    pub fn new(api: Arc<dyn JobBoardApi>, cache: SharedCache) -> Self {
        Self { api, cache }
    }

    /// Cache-first view of the caller's own applications.
    pub async fn my_applications(&self) -> Result<Vec<Application>> {
        if let Some(applications) = self.cache.my_applications() {
            return Ok(applications);
        }
        self.refresh_mine().await
    }

    pub async fn refresh_mine(&self) -> Result<Vec<Application>> {
        let applications = self.api.my_applications().await?;
        self.cache.store_my_applications(applications.clone());
        Ok(applications)
    }

    /// The caller's application to one offer, if any. Drives the
    /// apply-vs-view downgrade on the offer screen.
    pub async fn my_application_for(&self, offer_id: &str) -> Result<Option<Application>> {
        let applications = self.my_applications().await?;
        Ok(applications.into_iter().find(|a| a.offer_id == offer_id))
    }

    /// Submits an application, then refetches the caller's applications.
    pub async fn apply(&self, offer_id: &str, message: &str) -> Result<()> {
        self.api
            .apply_to_offer(ApplyInput {
                offer_id: offer_id.to_string(),
                message: message.to_string(),
            })
            .await?;
        tracing::info!(offer_id, "application submitted");
        self.refresh_mine().await?;
        Ok(())
    }

    /// Applicants for an offer. Always hits the network: this feeds the
    /// approval screen, where staleness causes wrong decisions.
    pub async fn applicants(&self, offer_id: &str) -> Result<Vec<Application>> {
        let applicants = self.api.applicants_by_offer(offer_id).await?;
        self.cache.store_applicants(offer_id, applicants.clone());
        Ok(applicants)
    }
}
