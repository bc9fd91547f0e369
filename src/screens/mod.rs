//! Screen controllers: per-screen state and user-visible strings, decoupled
//! from rendering. The CLI drives them one action at a time.

pub mod applicants;
pub mod applications;
pub mod cv;
pub mod home;
pub mod offer_info;

/// Placeholder shown while any screen waits on a query.
pub const LOADING: &str = "Cargando...";

pub fn user_load_error(message: &str) -> String {
    format!("Error al cargar los datos del usuario: {}", message)
}

pub fn offer_load_error(message: &str) -> String {
    format!("Error al cargar la oferta: {}", message)
}

pub fn offers_load_error(message: &str) -> String {
    format!("Error al cargar las ofertas: {}", message)
}

pub fn applications_load_error(message: &str) -> String {
    format!("Error al cargar las postulaciones: {}", message)
}

pub fn cv_load_error(message: &str) -> String {
    format!("Error al cargar el CV: {}", message)
}
