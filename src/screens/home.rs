use crate::cache::SharedCache;
use crate::dto::offer_dto::CreateOfferInput;
use crate::error::{Error, Result};
use crate::graphql::api::JobBoardApi;
use crate::models::offer::Offer;
use crate::models::user::Role;
use crate::services::offer_service::{parse_salary, OfferService};
use std::sync::Arc;

pub const MSG_CREATE_FORBIDDEN: &str = "Solo un Jefe de Carrera puede crear ofertas.";

/// Raw create-offer form values as typed by the user. Salary stays a string
/// until submission, where it is parsed leniently.
#[derive(Debug, Clone, Default)]
pub struct OfferForm {
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    pub is_internship: bool,
}

/// Offer listing plus the head-of-career create form.
pub struct HomeScreen {
    offers: OfferService,
    cache: SharedCache,
}

impl HomeScreen {
    pub fn new(api: Arc<dyn JobBoardApi>, cache: SharedCache) -> Self {
        Self {
            offers: OfferService::new(api, cache.clone()),
            cache,
        }
    }

    pub async fn load(&self) -> Result<Vec<Offer>> {
        self.offers.list().await
    }

    /// The create form is only shown to heads of career.
    pub fn can_create(&self) -> bool {
        matches!(
            self.cache.profile().map(|u| u.role),
            Some(Role::HeadOfCareer)
        )
    }

    /// Creates the offer and refetches the listing (the service does the
    /// refetch; no direct cache patch here).
    pub async fn create_offer(&self, form: OfferForm) -> Result<Offer> {
        if !self.can_create() {
            return Err(Error::Unauthorized(MSG_CREATE_FORBIDDEN.to_string()));
        }
        let input = CreateOfferInput {
            title: form.title,
            description: form.description,
            company: form.company,
            location: form.location,
            salary: parse_salary(&form.salary),
            is_internship: form.is_internship,
        };
        self.offers.create(input).await
    }
}
