use crate::dto::application_dto::UpdateStatusInput;
use crate::dto::auth_dto::{AccessToken, LoginInput, RegisterInput, RegisteredUser};
use crate::dto::cv_dto::CvInput;
use crate::dto::offer_dto::{ApplyInput, CreateOfferInput};
use crate::error::Result;
use crate::graphql::client::GraphqlClient;
use crate::graphql::operations as ops;
use crate::models::application::Application;
use crate::models::cv::Cv;
use crate::models::offer::Offer;
use crate::models::user::User;
use async_trait::async_trait;
use serde_json::json;

#[cfg(test)]
use mockall::automock;

/// Typed surface over the remote GraphQL operations. Everything the
/// application knows about the backend goes through this trait, which keeps
/// services and screens testable against in-memory fakes.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait JobBoardApi: Send + Sync {
    async fn register(&self, input: RegisterInput) -> Result<RegisteredUser>;
    async fn login(&self, input: LoginInput) -> Result<AccessToken>;
    async fn get_user_profile(&self) -> Result<User>;
    async fn offers(&self) -> Result<Vec<Offer>>;
    async fn offer(&self, id: &str) -> Result<Offer>;
    async fn create_offer(&self, input: CreateOfferInput) -> Result<Offer>;
    async fn apply_to_offer(&self, input: ApplyInput) -> Result<Offer>;
    async fn update_status(&self, input: UpdateStatusInput) -> Result<()>;
    async fn applicants_by_offer(&self, offer_id: &str) -> Result<Vec<Application>>;
    /// Applications of the caller, scoped server-side by the bearer token.
    async fn my_applications(&self) -> Result<Vec<Application>>;
    /// Applications of an arbitrary student, used by the approval workflow.
    async fn applications_of_student(&self, student_id: &str) -> Result<Vec<Application>>;
    async fn user(&self, id: &str) -> Result<User>;
    async fn cv(&self, user_id: &str) -> Result<Cv>;
    async fn create_cv(&self, input: CvInput) -> Result<Cv>;
    async fn update_cv(&self, input: CvInput) -> Result<Cv>;
}

#[async_trait]
impl JobBoardApi for GraphqlClient {
    async fn register(&self, input: RegisterInput) -> Result<RegisteredUser> {
        self.request(&ops::REGISTER_USER, json!({ "input": input }))
            .await
    }

    async fn login(&self, input: LoginInput) -> Result<AccessToken> {
        self.request(&ops::LOGIN, json!({ "input": input })).await
    }

    async fn get_user_profile(&self) -> Result<User> {
        self.request(&ops::GET_USER_PROFILE, json!({})).await
    }

    async fn offers(&self) -> Result<Vec<Offer>> {
        self.request(&ops::OFFERS, json!({})).await
    }

    async fn offer(&self, id: &str) -> Result<Offer> {
        self.request(&ops::GET_OFFER, json!({ "id": id })).await
    }

    async fn create_offer(&self, input: CreateOfferInput) -> Result<Offer> {
        self.request(&ops::CREATE_OFFER, json!({ "input": input }))
            .await
    }

    async fn apply_to_offer(&self, input: ApplyInput) -> Result<Offer> {
        self.request(&ops::APPLY_TO_OFFER, json!({ "input": input }))
            .await
    }

    async fn update_status(&self, input: UpdateStatusInput) -> Result<()> {
        self.acknowledge(&ops::UPDATE_STATUS, json!({ "input": input }))
            .await?;
        Ok(())
    }

    async fn applicants_by_offer(&self, offer_id: &str) -> Result<Vec<Application>> {
        self.request(&ops::GET_APPLICANTS, json!({ "offerId": offer_id }))
            .await
    }

    async fn my_applications(&self) -> Result<Vec<Application>> {
        self.request(&ops::GET_USER_APPLICATIONS, json!({})).await
    }

    async fn applications_of_student(&self, student_id: &str) -> Result<Vec<Application>> {
        self.request(&ops::GET_USER_APPLICATIONS, json!({ "studentId": student_id }))
            .await
    }

    async fn user(&self, id: &str) -> Result<User> {
        self.request(&ops::GET_USER, json!({ "id": id })).await
    }

    async fn cv(&self, user_id: &str) -> Result<Cv> {
        self.request(&ops::GET_CV, json!({ "userId": user_id }))
            .await
    }

    async fn create_cv(&self, input: CvInput) -> Result<Cv> {
        self.request(&ops::CREATE_CV, json!({ "input": input }))
            .await
    }

    async fn update_cv(&self, input: CvInput) -> Result<Cv> {
        self.request(&ops::UPDATE_CV, json!({ "input": input }))
            .await
    }
}
