use crate::cache::SharedCache;
use crate::error::Result;
use crate::graphql::api::JobBoardApi;
use crate::models::application::Application;
use crate::models::offer::Offer;
use crate::services::application_service::ApplicationService;
use crate::services::offer_service::OfferService;
use std::sync::Arc;

/// One row of the "Mis Postulaciones" listing: the application joined with
/// its offer when the offer is still listed.
#[derive(Debug, Clone)]
pub struct ApplicationRow {
    pub application: Application,
    pub offer: Option<Offer>,
}

pub struct ApplicationsScreen {
    applications: ApplicationService,
    offers: OfferService,
}

impl ApplicationsScreen {
    pub fn new(api: Arc<dyn JobBoardApi>, cache: SharedCache) -> Self {
        Self {
            applications: ApplicationService::new(api.clone(), cache.clone()),
            offers: OfferService::new(api, cache),
        }
    }

    pub async fn load(&self) -> Result<Vec<ApplicationRow>> {
        let applications = self.applications.my_applications().await?;
        let offers = self.offers.list().await?;
        Ok(applications
            .into_iter()
            .map(|application| {
                let offer = offers.iter().find(|o| o.id == application.offer_id).cloned();
                ApplicationRow { application, offer }
            })
            .collect())
    }
}
