mod common;

use common::*;
use linkedicci::cache::Cache;
use linkedicci::models::application::ApplicationStatus;
use linkedicci::screens::applicants::ApplicantsScreen;
use linkedicci::screens::offer_info::{ApplyAffordance, OfferInfoScreen, MSG_ALREADY_APPLIED};
use std::sync::Arc;

#[tokio::test]
async fn a_students_application_shows_up_pending_on_the_applicants_screen() {
    let backend = Arc::new(FakeBackend::new());
    backend.seed_offer(offer("o1", "Oficial de Datos"));
    backend.seed_user(student("s1", "Ana Rojas"));
    backend.set_caller_student("s1");

    // Student side: the offer screen offers the apply form.
    let student_cache = Cache::new();
    student_cache.store_profile(student("s1", "Ana Rojas"));
    let offer_screen = OfferInfoScreen::new(backend.clone(), student_cache, "o1");

    let loaded = offer_screen.load().await.unwrap();
    assert_eq!(loaded.title, "Oficial de Datos");
    assert_eq!(offer_screen.affordance().await.unwrap(), ApplyAffordance::Apply);

    offer_screen.apply("Interesado").await.unwrap();

    // The form downgrades to a read-only view of the submitted message.
    match offer_screen.affordance().await.unwrap() {
        ApplyAffordance::View { message, status } => {
            assert_eq!(message, "Interesado");
            assert_eq!(status, ApplicationStatus::Pending);
        }
        other => panic!("expected the view affordance, got {:?}", other),
    }
    let err = offer_screen.apply("de nuevo").await.unwrap_err();
    assert_eq!(err.to_string(), MSG_ALREADY_APPLIED);
    assert_eq!(backend.call_count("apply:o1"), 1);

    // Head-of-career side, in a separate session with its own cache.
    let mut applicants_screen = ApplicantsScreen::new(backend.clone(), Cache::new(), "o1");
    applicants_screen.load().await.unwrap();

    let applicants = applicants_screen.applicants();
    assert_eq!(applicants.len(), 1);
    assert_eq!(applicants[0].message, "Interesado");
    assert_eq!(applicants[0].status, ApplicationStatus::Pending);
    assert_eq!(
        applicants_screen.student_label(&applicants[0].student_id),
        "Ana Rojas"
    );
}

#[tokio::test]
async fn heads_of_career_never_see_the_apply_form() {
    let backend = Arc::new(FakeBackend::new());
    backend.seed_offer(offer("o1", "Oficial de Datos"));

    let cache = Cache::new();
    cache.store_profile(head("h1", "Carla Díaz"));
    let screen = OfferInfoScreen::new(backend.clone(), cache, "o1");

    assert_eq!(screen.affordance().await.unwrap(), ApplyAffordance::Hidden);
    assert!(screen.apply("Interesado").await.is_err());
    assert_eq!(backend.call_count("apply:"), 0);
}
