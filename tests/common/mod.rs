#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use linkedicci::dto::application_dto::UpdateStatusInput;
use linkedicci::dto::auth_dto::{AccessToken, LoginInput, RegisterInput, RegisteredUser};
use linkedicci::dto::cv_dto::CvInput;
use linkedicci::dto::offer_dto::{ApplyInput, CreateOfferInput};
use linkedicci::error::{Error, Result};
use linkedicci::graphql::api::JobBoardApi;
use linkedicci::models::application::{Application, ApplicationStatus};
use linkedicci::models::cv::{Cv, Project, Skill};
use linkedicci::models::offer::Offer;
use linkedicci::models::user::{Role, User};
use linkedicci::session::SessionStore;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

pub fn test_session(tag: &str) -> SessionStore {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    SessionStore::new(std::env::temp_dir().join(format!(
        "linkedicci-test-{}-{}-{}",
        std::process::id(),
        tag,
        n
    )))
}

pub fn student(id: &str, name: &str) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@mail.com", id),
        role: Role::Student,
    }
}

pub fn head(id: &str, name: &str) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@mail.com", id),
        role: Role::HeadOfCareer,
    }
}

pub fn offer(id: &str, title: &str) -> Offer {
    Offer {
        id: id.to_string(),
        title: title.to_string(),
        description: "Descripción".to_string(),
        company: "ICCI".to_string(),
        location: "Santiago".to_string(),
        salary: 1000.0,
        is_internship: false,
        created_by_head_of_career_id: "h1".to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn application(
    id: &str,
    offer_id: &str,
    student_id: &str,
    status: ApplicationStatus,
) -> Application {
    Application {
        id: id.to_string(),
        offer_id: offer_id.to_string(),
        student_id: student_id.to_string(),
        message: "Interesado".to_string(),
        status,
        created_at: Utc::now(),
    }
}

/// In-memory stand-in for the remote GraphQL backend. Records every call so
/// tests can assert that an action did (or did not) reach the network, and
/// can be told to fail specific operations.
#[derive(Default)]
pub struct FakeBackend {
    pub users: Mutex<HashMap<String, User>>,
    pub offers: Mutex<Vec<Offer>>,
    pub applications: Mutex<HashMap<String, Application>>,
    pub cv: Mutex<Option<Cv>>,
    pub profile: Mutex<Option<User>>,
    pub calls: Mutex<Vec<String>>,
    pub failing_status_updates: Mutex<HashSet<String>>,
    pub failing_user_lookups: Mutex<HashSet<String>>,
    pub fail_login: Mutex<bool>,
    /// Identity the backend attributes caller-scoped operations to.
    pub caller_student: Mutex<Option<String>>,
    next_id: AtomicU64,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_user(&self, user: User) {
        self.users.lock().unwrap().insert(user.id.clone(), user);
    }

    pub fn seed_offer(&self, offer: Offer) {
        self.offers.lock().unwrap().push(offer);
    }

    pub fn seed_application(&self, application: Application) {
        self.applications
            .lock()
            .unwrap()
            .insert(application.id.clone(), application);
    }

    pub fn set_profile(&self, user: User) {
        *self.profile.lock().unwrap() = Some(user);
    }

    pub fn set_caller_student(&self, id: &str) {
        *self.caller_student.lock().unwrap() = Some(id.to_string());
    }

    pub fn fail_status_update(&self, application_id: &str) {
        self.failing_status_updates
            .lock()
            .unwrap()
            .insert(application_id.to_string());
    }

    pub fn clear_status_failures(&self) {
        self.failing_status_updates.lock().unwrap().clear();
    }

    pub fn fail_user_lookup(&self, user_id: &str) {
        self.failing_user_lookups
            .lock()
            .unwrap()
            .insert(user_id.to_string());
    }

    pub fn status_of(&self, application_id: &str) -> ApplicationStatus {
        self.applications
            .lock()
            .unwrap()
            .get(application_id)
            .expect("application seeded")
            .status
    }

    pub fn call_count(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn next_id(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.next_id.fetch_add(1, Ordering::Relaxed))
    }
}

#[async_trait]
impl JobBoardApi for FakeBackend {
    async fn register(&self, input: RegisterInput) -> Result<RegisteredUser> {
        self.record(format!("register:{}", input.email));
        let id = self.next_id("u");
        self.seed_user(User {
            id: id.clone(),
            name: input.name,
            email: input.email,
            role: Role::Student,
        });
        Ok(RegisteredUser { user_id: id })
    }

    async fn login(&self, input: LoginInput) -> Result<AccessToken> {
        self.record(format!("login:{}", input.email));
        if *self.fail_login.lock().unwrap() {
            return Err(Error::api("Credenciales inválidas"));
        }
        Ok(AccessToken {
            access_token: format!("token-{}", input.email),
        })
    }

    async fn get_user_profile(&self) -> Result<User> {
        self.record("get_user_profile".to_string());
        self.profile
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Error::api("Unauthorized"))
    }

    async fn offers(&self) -> Result<Vec<Offer>> {
        self.record("offers".to_string());
        Ok(self.offers.lock().unwrap().clone())
    }

    async fn offer(&self, id: &str) -> Result<Offer> {
        self.record(format!("offer:{}", id));
        self.offers
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or_else(|| Error::api("Offer record not found"))
    }

    async fn create_offer(&self, input: CreateOfferInput) -> Result<Offer> {
        self.record(format!("create_offer:{}", input.title));
        let offer = Offer {
            id: self.next_id("o"),
            title: input.title,
            description: input.description,
            company: input.company,
            location: input.location,
            salary: input.salary,
            is_internship: input.is_internship,
            created_by_head_of_career_id: "h1".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.offers.lock().unwrap().push(offer.clone());
        Ok(offer)
    }

    async fn apply_to_offer(&self, input: ApplyInput) -> Result<Offer> {
        self.record(format!("apply:{}", input.offer_id));
        let student_id = self
            .caller_student
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Error::api("Unauthorized"))?;
        let application = Application {
            id: self.next_id("a"),
            offer_id: input.offer_id.clone(),
            student_id,
            message: input.message,
            status: ApplicationStatus::Pending,
            created_at: Utc::now(),
        };
        self.applications
            .lock()
            .unwrap()
            .insert(application.id.clone(), application);
        self.offers
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id == input.offer_id)
            .cloned()
            .ok_or_else(|| Error::api("Offer record not found"))
    }

    async fn update_status(&self, input: UpdateStatusInput) -> Result<()> {
        self.record(format!(
            "update_status:{}:{}",
            input.application_id, input.status
        ));
        if self
            .failing_status_updates
            .lock()
            .unwrap()
            .contains(&input.application_id)
        {
            return Err(Error::api("No se pudo actualizar la postulación"));
        }
        let mut applications = self.applications.lock().unwrap();
        let application = applications
            .get_mut(&input.application_id)
            .ok_or_else(|| Error::api("Application record not found"))?;
        application.status = input.status;
        Ok(())
    }

    async fn applicants_by_offer(&self, offer_id: &str) -> Result<Vec<Application>> {
        self.record(format!("applicants:{}", offer_id));
        let mut applicants: Vec<Application> = self
            .applications
            .lock()
            .unwrap()
            .values()
            .filter(|a| a.offer_id == offer_id)
            .cloned()
            .collect();
        applicants.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(applicants)
    }

    async fn my_applications(&self) -> Result<Vec<Application>> {
        self.record("my_applications".to_string());
        let student_id = self
            .caller_student
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Error::api("Unauthorized"))?;
        self.applications_of_student(&student_id).await
    }

    async fn applications_of_student(&self, student_id: &str) -> Result<Vec<Application>> {
        self.record(format!("applications_of:{}", student_id));
        let mut applications: Vec<Application> = self
            .applications
            .lock()
            .unwrap()
            .values()
            .filter(|a| a.student_id == student_id)
            .cloned()
            .collect();
        applications.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(applications)
    }

    async fn user(&self, id: &str) -> Result<User> {
        self.record(format!("get_user:{}", id));
        if self.failing_user_lookups.lock().unwrap().contains(id) {
            return Err(Error::api("No se pudo obtener el usuario"));
        }
        self.users
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| Error::api("User record not found"))
    }

    async fn cv(&self, user_id: &str) -> Result<Cv> {
        self.record(format!("get_cv:{}", user_id));
        self.cv
            .lock()
            .unwrap()
            .clone()
            .filter(|cv| cv.user_id == user_id)
            .ok_or_else(|| Error::api("Cv record not found"))
    }

    async fn create_cv(&self, input: CvInput) -> Result<Cv> {
        self.record(format!("create_cv:{}", input.user_id));
        let cv = self.materialize_cv(input);
        *self.cv.lock().unwrap() = Some(cv.clone());
        Ok(cv)
    }

    async fn update_cv(&self, input: CvInput) -> Result<Cv> {
        self.record(format!("update_cv:{}", input.user_id));
        let cv = self.materialize_cv(input);
        *self.cv.lock().unwrap() = Some(cv.clone());
        Ok(cv)
    }
}

impl FakeBackend {
    /// Builds the stored CV the way the backend would: server-assigned ids
    /// for projects and skills.
    fn materialize_cv(&self, input: CvInput) -> Cv {
        Cv {
            user_id: input.user_id,
            name: input.name,
            description: input.description,
            career: input.career,
            email: input.email,
            phone: input.phone,
            projects: input
                .projects
                .into_iter()
                .map(|p| Project {
                    id: self.next_id("p"),
                    name: p.name,
                    url: p.url,
                    description: p.description,
                })
                .collect(),
            skills: input
                .skills
                .into_iter()
                .map(|s| Skill {
                    id: self.next_id("s"),
                    name: s.name,
                    rate: s.rate,
                })
                .collect(),
        }
    }
}
