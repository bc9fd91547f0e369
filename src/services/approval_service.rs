use crate::cache::SharedCache;
use crate::dto::application_dto::UpdateStatusInput;
use crate::error::Result;
use crate::graphql::api::JobBoardApi;
use crate::models::application::{Application, ApplicationStatus};
use futures::future::join_all;
use std::sync::Arc;

/// Outcome of one status-update call inside a fan-out batch.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub application_id: String,
    pub error: Option<String>,
}

impl StatusChange {
    fn ok(application_id: String) -> Self {
        Self {
            application_id,
            error: None,
        }
    }

    fn failed(application_id: String, error: String) -> Self {
        Self {
            application_id,
            error: Some(error),
        }
    }
}

/// What happened to the accepted student's applications on other offers.
#[derive(Debug, Clone, PartialEq)]
pub enum CrossOfferCleanup {
    /// Not attempted because an earlier step failed.
    Skipped { reason: String },
    /// The student's application list could not be fetched.
    FetchFailed { message: String },
    Attempted { rejections: Vec<StatusChange> },
}

/// Structured result of the accept workflow. Every step's per-call outcome
/// is recorded so callers decide what to surface; nothing is silently
/// swallowed beyond a diagnostic log.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionReport {
    pub accepted_id: String,
    pub peer_rejections: Vec<StatusChange>,
    pub cross_offer: CrossOfferCleanup,
}

impl DecisionReport {
    pub fn peer_failures(&self) -> usize {
        self.peer_rejections
            .iter()
            .filter(|c| c.error.is_some())
            .count()
    }

    pub fn cross_offer_failures(&self) -> usize {
        match &self.cross_offer {
            CrossOfferCleanup::Attempted { rejections } => {
                rejections.iter().filter(|c| c.error.is_some()).count()
            }
            CrossOfferCleanup::FetchFailed { .. } => 1,
            CrossOfferCleanup::Skipped { .. } => 0,
        }
    }

    pub fn fully_applied(&self) -> bool {
        self.peer_failures() == 0
            && matches!(&self.cross_offer, CrossOfferCleanup::Attempted { .. })
            && self.cross_offer_failures() == 0
    }
}

/// Coordinates the decision mutations a head of career triggers from the
/// applicants screen, keeping the cached applicant lists consistent through
/// the single patch entry point while the calls are in flight.
#[derive(Clone)]
pub struct ApprovalService {
    api: Arc<dyn JobBoardApi>,
    cache: SharedCache,
}

impl ApprovalService {
    pub fn new(api: Arc<dyn JobBoardApi>, cache: SharedCache) -> Self {
        Self { api, cache }
    }

    /// Accepts one applicant. Strict three-step sequence:
    ///
    /// 1. mark the selected application accepted, patch it into the cache;
    /// 2. reject every other pending application on the same offer,
    ///    concurrently, patching each individual success;
    /// 3. reject the student's pending/accepted applications on other
    ///    offers, concurrently.
    ///
    /// A step 1 failure aborts with `Err`. Step 2 failures are recorded in
    /// the report and step 3 is then skipped. The caller is expected to
    /// refetch the applicant list afterwards regardless of the outcome.
    pub async fn accept(
        &self,
        selected: &Application,
        applicants: &[Application],
    ) -> Result<DecisionReport> {
        self.api
            .update_status(UpdateStatusInput::new(
                &selected.id,
                ApplicationStatus::Accepted,
            ))
            .await?;
        self.cache
            .patch_applicant(&selected.offer_id, &selected.id, |a| {
                a.status = ApplicationStatus::Accepted;
            });
        tracing::info!(application_id = %selected.id, "application accepted");

        let peer_rejections = self.reject_peers(selected, applicants).await;
        let peer_failures = peer_rejections.iter().filter(|c| c.error.is_some()).count();
        if peer_failures > 0 {
            tracing::warn!(
                offer_id = %selected.offer_id,
                failed = peer_failures,
                "peer rejections failed; skipping cross-offer cleanup"
            );
            return Ok(DecisionReport {
                accepted_id: selected.id.clone(),
                peer_rejections,
                cross_offer: CrossOfferCleanup::Skipped {
                    reason: format!("{} rechazos pendientes fallaron", peer_failures),
                },
            });
        }

        let cross_offer = self.reject_other_offers(selected).await;

        Ok(DecisionReport {
            accepted_id: selected.id.clone(),
            peer_rejections,
            cross_offer,
        })
    }

    /// Rejects one applicant: a single status update plus a single cache
    /// patch.
    pub async fn reject(&self, selected: &Application) -> Result<()> {
        self.api
            .update_status(UpdateStatusInput::new(
                &selected.id,
                ApplicationStatus::Rejected,
            ))
            .await?;
        self.cache
            .patch_applicant(&selected.offer_id, &selected.id, |a| {
                a.status = ApplicationStatus::Rejected;
            });
        tracing::info!(application_id = %selected.id, "application rejected");
        Ok(())
    }

    /// Step 2: fan out one reject per remaining pending application of the
    /// offer; completion order across the batch is unspecified.
    async fn reject_peers(
        &self,
        selected: &Application,
        applicants: &[Application],
    ) -> Vec<StatusChange> {
        let peers: Vec<&Application> = applicants
            .iter()
            .filter(|a| a.id != selected.id && a.is_pending())
            .collect();

        let calls = peers.iter().map(|peer| {
            let peer = *peer;
            async move {
                let result = self
                    .api
                    .update_status(UpdateStatusInput::new(&peer.id, ApplicationStatus::Rejected))
                    .await;
                (peer, result)
            }
        });

        join_all(calls)
            .await
            .into_iter()
            .map(|(peer, result)| match result {
                Ok(()) => {
                    self.cache.patch_applicant(&peer.offer_id, &peer.id, |a| {
                        a.status = ApplicationStatus::Rejected;
                    });
                    StatusChange::ok(peer.id.clone())
                }
                Err(e) => {
                    tracing::warn!(application_id = %peer.id, error = %e, "peer rejection failed");
                    StatusChange::failed(peer.id.clone(), e.to_string())
                }
            })
            .collect()
    }

    /// Step 3: best-effort cleanup of the accepted student's applications on
    /// other offers. Failures are logged and recorded in the report, never
    /// raised.
    async fn reject_other_offers(&self, selected: &Application) -> CrossOfferCleanup {
        let applications = match self.api.applications_of_student(&selected.student_id).await {
            Ok(applications) => applications,
            Err(e) => {
                tracing::error!(
                    student_id = %selected.student_id,
                    error = %e,
                    "could not fetch the accepted student's applications"
                );
                return CrossOfferCleanup::FetchFailed {
                    message: e.to_string(),
                };
            }
        };

        let to_reject: Vec<Application> = applications
            .into_iter()
            .filter(|a| {
                a.offer_id != selected.offer_id
                    && matches!(
                        a.status,
                        ApplicationStatus::Pending | ApplicationStatus::Accepted
                    )
            })
            .collect();

        let calls = to_reject.iter().map(|app| async move {
            let result = self
                .api
                .update_status(UpdateStatusInput::new(&app.id, ApplicationStatus::Rejected))
                .await;
            (app, result)
        });

        let rejections = join_all(calls)
            .await
            .into_iter()
            .map(|(app, result)| match result {
                Ok(()) => {
                    self.cache.patch_applicant(&app.offer_id, &app.id, |a| {
                        a.status = ApplicationStatus::Rejected;
                    });
                    StatusChange::ok(app.id.clone())
                }
                Err(e) => {
                    tracing::error!(
                        application_id = %app.id,
                        error = %e,
                        "cross-offer rejection failed"
                    );
                    StatusChange::failed(app.id.clone(), e.to_string())
                }
            })
            .collect();

        CrossOfferCleanup::Attempted { rejections }
    }
}
