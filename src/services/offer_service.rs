use crate::cache::SharedCache;
use crate::dto::offer_dto::CreateOfferInput;
use crate::error::Result;
use crate::graphql::api::JobBoardApi;
use crate::models::offer::Offer;
use crate::utils::validation::validate;
use std::sync::Arc;

#[derive(Clone)]
pub struct OfferService {
    api: Arc<dyn JobBoardApi>,
    cache: SharedCache,
}

impl OfferService {
    pub fn new(api: Arc<dyn JobBoardApi>, cache: SharedCache) -> Self {
        Self { api, cache }
    }

    /// Cache-first listing.
    pub async fn list(&self) -> Result<Vec<Offer>> {
        if let Some(offers) = self.cache.offers() {
            return Ok(offers);
        }
        self.refresh().await
    }

    /// Forced refetch, replacing the cached list.
    pub async fn refresh(&self) -> Result<Vec<Offer>> {
        let offers = self.api.offers().await?;
        self.cache.store_offers(offers.clone());
        Ok(offers)
    }

    pub async fn get(&self, id: &str) -> Result<Offer> {
        if let Some(offer) = self.cache.offer(id) {
            return Ok(offer);
        }
        let offer = self.api.offer(id).await?;
        self.cache.store_offer(offer.clone());
        Ok(offer)
    }

    /// Creates an offer, then refetches the listing instead of patching it.
    pub async fn create(&self, input: CreateOfferInput) -> Result<Offer> {
        validate(&input)?;
        let offer = self.api.create_offer(input).await?;
        tracing::info!(offer_id = %offer.id, title = %offer.title, "offer created");
        self.refresh().await?;
        Ok(offer)
    }
}

/// Lenient salary parsing carried over from the offer creation form: a value
/// that does not parse becomes 0.
pub fn parse_salary(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(0.0)
}
