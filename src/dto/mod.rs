pub mod application_dto;
pub mod auth_dto;
pub mod cv_dto;
pub mod offer_dto;
