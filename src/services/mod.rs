pub mod application_service;
pub mod approval_service;
pub mod auth_service;
pub mod cv_service;
pub mod offer_service;
pub mod student_directory;
