use crate::models::application::Application;
use crate::models::cv::Cv;
use crate::models::offer::Offer;
use crate::models::user::User;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

pub type SharedCache = Arc<Cache>;

#[derive(Debug, Default)]
struct CacheState {
    profile: Option<User>,
    offers: Option<Vec<Offer>>,
    offers_by_id: HashMap<String, Offer>,
    applicants_by_offer: HashMap<String, Vec<Application>>,
    my_applications: Option<Vec<Application>>,
    users: HashMap<String, User>,
    cv: Option<Cv>,
}

/// In-memory normalized store for query responses.
///
/// Mutation call sites never rewrite whole areas; individual status changes
/// go through [`Cache::patch_applicant`], the single patch entry point, and
/// whole areas are only replaced by refetches. A workflow must finish its
/// patches before issuing its reconciling refetch so the refetch cannot be
/// overwritten by a late patch.
#[derive(Debug, Default)]
pub struct Cache {
    state: Mutex<CacheState>,
}

impl Cache {
    pub fn new() -> SharedCache {
        Arc::new(Cache::default())
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().expect("cache lock poisoned")
    }

    pub fn store_profile(&self, user: User) {
        self.lock().profile = Some(user);
    }

    pub fn profile(&self) -> Option<User> {
        self.lock().profile.clone()
    }

    pub fn store_offers(&self, offers: Vec<Offer>) {
        let mut state = self.lock();
        for offer in &offers {
            state.offers_by_id.insert(offer.id.clone(), offer.clone());
        }
        state.offers = Some(offers);
    }

    pub fn offers(&self) -> Option<Vec<Offer>> {
        self.lock().offers.clone()
    }

    pub fn store_offer(&self, offer: Offer) {
        self.lock().offers_by_id.insert(offer.id.clone(), offer);
    }

    pub fn offer(&self, id: &str) -> Option<Offer> {
        self.lock().offers_by_id.get(id).cloned()
    }

    pub fn store_applicants(&self, offer_id: &str, applicants: Vec<Application>) {
        self.lock()
            .applicants_by_offer
            .insert(offer_id.to_string(), applicants);
    }

    pub fn applicants(&self, offer_id: &str) -> Option<Vec<Application>> {
        self.lock().applicants_by_offer.get(offer_id).cloned()
    }

    pub fn store_my_applications(&self, applications: Vec<Application>) {
        self.lock().my_applications = Some(applications);
    }

    pub fn my_applications(&self) -> Option<Vec<Application>> {
        self.lock().my_applications.clone()
    }

    pub fn store_user(&self, user: User) {
        self.lock().users.insert(user.id.clone(), user);
    }

    pub fn user(&self, id: &str) -> Option<User> {
        self.lock().users.get(id).cloned()
    }

    pub fn store_cv(&self, cv: Cv) {
        self.lock().cv = Some(cv);
    }

    pub fn cv(&self) -> Option<Cv> {
        self.lock().cv.clone()
    }

    /// Applies an in-place update to one cached application of one offer.
    /// Returns false when the offer's applicant list is not cached or the
    /// application is not in it, which callers treat as "nothing to patch";
    /// the reconciling refetch will converge the view.
    pub fn patch_applicant<F>(&self, offer_id: &str, application_id: &str, update: F) -> bool
    where
        F: FnOnce(&mut Application),
    {
        let mut state = self.lock();
        let Some(applicants) = state.applicants_by_offer.get_mut(offer_id) else {
            return false;
        };
        match applicants.iter_mut().find(|a| a.id == application_id) {
            Some(application) => {
                update(application);
                true
            }
            None => false,
        }
    }

    /// Full invalidation. Logout is the only caller.
    pub fn clear(&self) {
        *self.lock() = CacheState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::application::ApplicationStatus;
    use chrono::Utc;

    fn application(id: &str, offer_id: &str) -> Application {
        Application {
            id: id.to_string(),
            offer_id: offer_id.to_string(),
            student_id: "s1".to_string(),
            message: "hola".to_string(),
            status: ApplicationStatus::Pending,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn patch_updates_single_entry() {
        let cache = Cache::new();
        cache.store_applicants("o1", vec![application("a1", "o1"), application("a2", "o1")]);

        let patched = cache.patch_applicant("o1", "a1", |a| {
            a.status = ApplicationStatus::Accepted;
        });
        assert!(patched);

        let applicants = cache.applicants("o1").unwrap();
        assert_eq!(applicants[0].status, ApplicationStatus::Accepted);
        assert_eq!(applicants[1].status, ApplicationStatus::Pending);
    }

    #[test]
    fn patch_misses_are_reported() {
        let cache = Cache::new();
        assert!(!cache.patch_applicant("o1", "a1", |_| {}));

        cache.store_applicants("o1", vec![application("a1", "o1")]);
        assert!(!cache.patch_applicant("o1", "zz", |_| {}));
    }

    #[test]
    fn clear_empties_every_area() {
        let cache = Cache::new();
        cache.store_applicants("o1", vec![application("a1", "o1")]);
        cache.store_my_applications(vec![application("a1", "o1")]);
        cache.clear();
        assert!(cache.applicants("o1").is_none());
        assert!(cache.my_applications().is_none());
    }
}
