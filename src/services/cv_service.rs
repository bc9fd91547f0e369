use crate::cache::SharedCache;
use crate::dto::cv_dto::CvInput;
use crate::error::Result;
use crate::graphql::api::JobBoardApi;
use crate::models::cv::Cv;
use std::sync::Arc;

#[derive(Clone)]
pub struct CvService {
    api: Arc<dyn JobBoardApi>,
    cache: SharedCache,
}

impl CvService {
    pub fn new(api: Arc<dyn JobBoardApi>, cache: SharedCache) -> Self {
        Self { api, cache }
    }

    /// Fetches the user's CV. A missing CV surfaces as
    /// `ErrorKind::NotFound`, which the screen turns into the no-CV state.
    pub async fn get(&self, user_id: &str) -> Result<Cv> {
        let cv = self.api.cv(user_id).await?;
        self.cache.store_cv(cv.clone());
        Ok(cv)
    }

    pub fn cached(&self) -> Option<Cv> {
        self.cache.cv()
    }

    pub async fn update(&self, input: CvInput) -> Result<Cv> {
        let cv = self.api.update_cv(input).await?;
        self.cache.store_cv(cv.clone());
        tracing::info!(user_id = %cv.user_id, "CV updated");
        Ok(cv)
    }

    pub async fn create(&self, input: CvInput) -> Result<Cv> {
        let cv = self.api.create_cv(input).await?;
        self.cache.store_cv(cv.clone());
        tracing::info!(user_id = %cv.user_id, "CV created");
        Ok(cv)
    }
}
