use crate::cache::SharedCache;
use crate::graphql::api::JobBoardApi;
use crate::models::application::Application;
use crate::models::user::User;
use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;

/// Resolves applicant student ids to profiles.
///
/// Lookups fan out concurrently and a failed lookup leaves the student
/// unresolved instead of failing the batch. `requested` records every id a
/// lookup was ever issued for, separately from the resolved profiles in the
/// cache, so repeated invocations for the same applicant list do not
/// re-trigger lookups.
pub struct StudentDirectory {
    api: Arc<dyn JobBoardApi>,
    cache: SharedCache,
    requested: HashSet<String>,
}

impl StudentDirectory {
    pub fn new(api: Arc<dyn JobBoardApi>, cache: SharedCache) -> Self {
        Self {
            api,
            cache,
            requested: HashSet::new(),
        }
    }

    /// Issues at most one lookup per unseen student id. Returns how many
    /// profiles were newly resolved.
    pub async fn resolve(&mut self, applicants: &[Application]) -> usize {
        let mut pending: Vec<String> = Vec::new();
        for applicant in applicants {
            if self.cache.user(&applicant.student_id).is_some() {
                continue;
            }
            if self.requested.insert(applicant.student_id.clone()) {
                pending.push(applicant.student_id.clone());
            }
        }
        if pending.is_empty() {
            return 0;
        }

        let api = self.api.clone();
        let lookups = pending.iter().map(|id| {
            let api = api.clone();
            async move {
                let result = api.user(id).await;
                (id.clone(), result)
            }
        });

        let mut resolved = 0;
        for (id, result) in join_all(lookups).await {
            match result {
                Ok(user) => {
                    self.cache.store_user(user);
                    resolved += 1;
                }
                Err(e) => {
                    tracing::warn!(student_id = %id, error = %e, "student lookup failed");
                }
            }
        }
        resolved
    }

    pub fn resolved(&self, student_id: &str) -> Option<User> {
        self.cache.user(student_id)
    }
}
