use crate::cache::SharedCache;
use crate::graphql::api::JobBoardApi;
use crate::models::application::Application;
use crate::services::application_service::ApplicationService;
use crate::services::approval_service::{ApprovalService, DecisionReport};
use crate::services::student_directory::StudentDirectory;
use std::sync::Arc;

pub const ACCEPT_WARNING: &str =
    "Al aceptar esta postulación, todas las demás serán rechazadas automáticamente.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionAction {
    Accept,
    Reject,
}

impl DecisionAction {
    pub fn verb(&self) -> &'static str {
        match self {
            DecisionAction::Accept => "aceptar",
            DecisionAction::Reject => "rechazar",
        }
    }
}

/// Confirmation dialog state machine:
/// `Closed → Open → Processing → Closed`, or `Open → Closed` on cancel.
/// While `Processing` both confirm and cancel are ignored; a failure puts
/// the dialog back to `Open` with the error message inside so the user can
/// retry.
#[derive(Debug, Clone)]
pub enum ConfirmDialog {
    Closed,
    Open {
        applicant: Application,
        action: DecisionAction,
        error: Option<String>,
    },
    Processing {
        applicant: Application,
        action: DecisionAction,
    },
}

impl ConfirmDialog {
    pub fn is_open(&self) -> bool {
        matches!(self, ConfirmDialog::Open { .. })
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, ConfirmDialog::Closed)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ConfirmDialog::Open { error, .. } => error.as_deref(),
            _ => None,
        }
    }
}

/// What a confirmed decision produced.
#[derive(Debug)]
pub enum ConfirmOutcome {
    /// Confirm was ignored: the dialog was not open.
    Ignored,
    Accepted(DecisionReport),
    Rejected { application_id: String },
    /// The decision mutation failed; the dialog stays open with the message.
    Failed { message: String },
}

/// Controller for the applicants screen of one offer: the approval
/// workflow, lazy student resolution and the confirmation dialog.
pub struct ApplicantsScreen {
    applications: ApplicationService,
    approvals: ApprovalService,
    directory: StudentDirectory,
    cache: SharedCache,
    offer_id: String,
    dialog: ConfirmDialog,
}

impl ApplicantsScreen {
    pub fn new(api: Arc<dyn JobBoardApi>, cache: SharedCache, offer_id: impl Into<String>) -> Self {
        Self {
            applications: ApplicationService::new(api.clone(), cache.clone()),
            approvals: ApprovalService::new(api.clone(), cache.clone()),
            directory: StudentDirectory::new(api, cache.clone()),
            cache,
            offer_id: offer_id.into(),
            dialog: ConfirmDialog::Closed,
        }
    }

    /// Loads the applicant list (always from the network: this screen is a
    /// control surface where staleness causes wrong decisions) and resolves
    /// the student profiles it references.
    pub async fn load(&mut self) -> crate::error::Result<()> {
        let applicants = self.applications.applicants(&self.offer_id).await?;
        self.directory.resolve(&applicants).await;
        Ok(())
    }

    pub fn applicants(&self) -> Vec<Application> {
        self.cache.applicants(&self.offer_id).unwrap_or_default()
    }

    pub fn dialog(&self) -> &ConfirmDialog {
        &self.dialog
    }

    /// Display name for an applicant's student, or the unresolved
    /// placeholder when the lookup failed or has not landed.
    pub fn student_label(&self, student_id: &str) -> String {
        match self.directory.resolved(student_id) {
            Some(user) => user.name,
            None => format!("Cargando datos del estudiante (ID: {})...", student_id),
        }
    }

    /// Opens the confirmation dialog for a pending applicant. Returns false
    /// when the dialog is already open or the applicant cannot be decided.
    pub fn request_decision(&mut self, application_id: &str, action: DecisionAction) -> bool {
        if !self.dialog.is_closed() {
            return false;
        }
        let Some(applicant) = self
            .applicants()
            .into_iter()
            .find(|a| a.id == application_id && a.is_pending())
        else {
            return false;
        };
        self.dialog = ConfirmDialog::Open {
            applicant,
            action,
            error: None,
        };
        true
    }

    /// Discards the pending selection without any network call.
    pub fn cancel(&mut self) -> bool {
        if self.dialog.is_open() {
            self.dialog = ConfirmDialog::Closed;
            true
        } else {
            false
        }
    }

    pub fn prompt(&self) -> Option<String> {
        let (applicant, action) = match &self.dialog {
            ConfirmDialog::Open {
                applicant, action, ..
            }
            | ConfirmDialog::Processing { applicant, action } => (applicant, action),
            ConfirmDialog::Closed => return None,
        };
        let name = self
            .directory
            .resolved(&applicant.student_id)
            .map(|u| u.name)
            .unwrap_or_else(|| "este estudiante".to_string());
        Some(format!(
            "¿Estás seguro de {} la postulación de {}?",
            action.verb(),
            name
        ))
    }

    /// Runs the confirmed decision. After the mutations settle (fully or
    /// partially) the applicant list is refetched to reconcile any
    /// cache-patch drift against server truth.
    pub async fn confirm(&mut self) -> ConfirmOutcome {
        let ConfirmDialog::Open {
            applicant, action, ..
        } = std::mem::replace(&mut self.dialog, ConfirmDialog::Closed)
        else {
            // Closed, or Processing: confirm is disabled.
            return ConfirmOutcome::Ignored;
        };
        self.dialog = ConfirmDialog::Processing {
            applicant: applicant.clone(),
            action,
        };

        let outcome = match action {
            DecisionAction::Accept => {
                let applicants = self.applicants();
                match self.approvals.accept(&applicant, &applicants).await {
                    Ok(report) => {
                        if report.peer_failures() > 0 {
                            self.dialog = ConfirmDialog::Open {
                                applicant,
                                action,
                                error: Some(format!(
                                    "No se pudieron rechazar {} postulaciones pendientes.",
                                    report.peer_failures()
                                )),
                            };
                        } else {
                            self.dialog = ConfirmDialog::Closed;
                        }
                        ConfirmOutcome::Accepted(report)
                    }
                    Err(e) => {
                        let message = e.to_string();
                        self.dialog = ConfirmDialog::Open {
                            applicant,
                            action,
                            error: Some(message.clone()),
                        };
                        ConfirmOutcome::Failed { message }
                    }
                }
            }
            DecisionAction::Reject => match self.approvals.reject(&applicant).await {
                Ok(()) => {
                    self.dialog = ConfirmDialog::Closed;
                    ConfirmOutcome::Rejected {
                        application_id: applicant.id,
                    }
                }
                Err(e) => {
                    let message = e.to_string();
                    self.dialog = ConfirmDialog::Open {
                        applicant,
                        action,
                        error: Some(message.clone()),
                    };
                    ConfirmOutcome::Failed { message }
                }
            },
        };

        // Reconciling refetch, attempted regardless of the decision outcome.
        if let Err(e) = self.applications.applicants(&self.offer_id).await {
            tracing::warn!(offer_id = %self.offer_id, error = %e, "applicant refetch failed");
        }

        outcome
    }
}
