use crate::cache::SharedCache;
use crate::dto::cv_dto::{CvInput, ProjectInput, SkillInput};
use crate::error::{ErrorKind, Result};
use crate::graphql::api::JobBoardApi;
use crate::models::cv::{Cv, Project, Skill};
use crate::services::cv_service::CvService;
use std::sync::Arc;
use std::time::Duration;

pub const NO_CV_MESSAGE: &str = "No se encontró información de CV para este usuario.";
pub const UPDATE_FAILED: &str = "Error al actualizar el CV";
/// Fixed delay before the one-shot redirect to Home when no CV exists.
pub const NO_CV_REDIRECT_DELAY: Duration = Duration::from_secs(2);

/// Local editable copy of the CV. New projects and skills get a
/// timestamp-derived temporary id that never reaches the wire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CvDraft {
    pub name: String,
    pub description: String,
    pub career: String,
    pub email: String,
    pub phone: String,
    pub projects: Vec<Project>,
    pub skills: Vec<Skill>,
}

fn temp_id() -> String {
    chrono::Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_default()
        .to_string()
}

impl CvDraft {
    pub fn from_cv(cv: &Cv) -> Self {
        Self {
            name: cv.name.clone(),
            description: cv.description.clone(),
            career: cv.career.clone(),
            email: cv.email.clone(),
            phone: cv.phone.clone(),
            projects: cv.projects.clone(),
            skills: cv.skills.clone(),
        }
    }

    pub fn add_project(&mut self) -> &mut Project {
        self.projects.push(Project {
            id: temp_id(),
            name: String::new(),
            url: String::new(),
            description: String::new(),
        });
        self.projects.last_mut().expect("just pushed")
    }

    pub fn remove_project(&mut self, index: usize) -> bool {
        if index < self.projects.len() {
            self.projects.remove(index);
            true
        } else {
            false
        }
    }

    pub fn add_skill(&mut self) -> &mut Skill {
        self.skills.push(Skill {
            id: temp_id(),
            name: String::new(),
            rate: 1,
        });
        self.skills.last_mut().expect("just pushed")
    }

    pub fn remove_skill(&mut self, index: usize) -> bool {
        if index < self.skills.len() {
            self.skills.remove(index);
            true
        } else {
            false
        }
    }

    /// Wire payload: client-only ids are stripped here, nowhere else.
    pub fn to_input(&self, user_id: &str) -> CvInput {
        CvInput {
            user_id: user_id.to_string(),
            name: self.name.clone(),
            description: self.description.clone(),
            career: self.career.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            projects: self
                .projects
                .iter()
                .map(|p| ProjectInput {
                    name: p.name.clone(),
                    url: p.url.clone(),
                    description: p.description.clone(),
                })
                .collect(),
            skills: self
                .skills
                .iter()
                .map(|s| SkillInput {
                    name: s.name.clone(),
                    rate: s.rate,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CvView {
    Reading,
    Editing,
    /// The backend has no CV for this user; the screen shows the no-CV
    /// message and redirects to Home once.
    Missing,
}

pub struct CvScreen {
    service: CvService,
    user_id: String,
    view: CvView,
    draft: Option<CvDraft>,
    redirected: bool,
}

impl CvScreen {
    pub fn new(api: Arc<dyn JobBoardApi>, cache: SharedCache, user_id: impl Into<String>) -> Self {
        Self {
            service: CvService::new(api, cache),
            user_id: user_id.into(),
            view: CvView::Reading,
            draft: None,
            redirected: false,
        }
    }

    /// Fetches the CV. A NotFound answer flips the screen to the missing
    /// state instead of erroring; any other failure propagates.
    pub async fn load(&mut self) -> Result<Option<Cv>> {
        match self.service.get(&self.user_id).await {
            Ok(cv) => {
                if self.view == CvView::Missing {
                    self.view = CvView::Reading;
                }
                Ok(Some(cv))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.view = CvView::Missing;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub fn view(&self) -> CvView {
        self.view
    }

    /// One-shot redirect guard for the missing-CV state. The first call
    /// after entering the state returns true; every later call returns
    /// false, so the redirect can never loop.
    pub fn take_missing_redirect(&mut self) -> bool {
        if self.view == CvView::Missing && !self.redirected {
            self.redirected = true;
            true
        } else {
            false
        }
    }

    /// Starts an empty draft for a user whose CV does not exist yet. Only
    /// valid in the missing state; submission goes through CreateCv.
    pub fn begin_create(&mut self) -> bool {
        if self.view != CvView::Missing || self.service.cached().is_some() {
            return false;
        }
        self.draft = Some(CvDraft::default());
        self.view = CvView::Editing;
        true
    }

    pub fn begin_edit(&mut self) -> bool {
        let Some(cv) = self.service.cached() else {
            return false;
        };
        self.draft = Some(CvDraft::from_cv(&cv));
        self.view = CvView::Editing;
        true
    }

    pub fn draft_mut(&mut self) -> Option<&mut CvDraft> {
        self.draft.as_mut()
    }

    pub fn cancel_edit(&mut self) {
        self.draft = None;
        if self.view == CvView::Editing {
            self.view = CvView::Reading;
        }
    }

    /// Sends the draft (minus temporary ids), exits edit mode and refetches.
    /// A first-time draft goes through CreateCv, an existing one through
    /// UpdateCv.
    pub async fn submit(&mut self) -> Result<Cv> {
        let Some(draft) = self.draft.as_ref() else {
            return Err(crate::error::Error::Internal(
                "no hay borrador de CV en edición".to_string(),
            ));
        };
        let input = draft.to_input(&self.user_id);
        if self.service.cached().is_some() {
            self.service.update(input).await?;
        } else {
            self.service.create(input).await?;
        }
        self.draft = None;
        self.view = CvView::Reading;
        let cv = self.service.get(&self.user_id).await?;
        Ok(cv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> CvDraft {
        CvDraft {
            name: "Ana".into(),
            description: "desc".into(),
            career: "ICCI".into(),
            email: "ana@mail.com".into(),
            phone: "+56 9".into(),
            projects: vec![],
            skills: vec![],
        }
    }

    #[test]
    fn new_entries_get_temporary_ids() {
        let mut d = draft();
        d.add_project().name = "Portal".into();
        d.add_skill().name = "Rust".into();
        assert!(!d.projects[0].id.is_empty());
        assert!(!d.skills[0].id.is_empty());
    }

    #[test]
    fn to_input_strips_ids() {
        let mut d = draft();
        d.add_project().name = "Portal".into();
        d.add_skill().name = "Rust".into();
        let input = d.to_input("u1");
        assert_eq!(input.projects.len(), 1);
        assert_eq!(input.projects[0].name, "Portal");
        assert_eq!(input.skills[0].rate, 1);
        // ProjectInput/SkillInput carry no id field at all; nothing
        // client-generated can leak to the wire.
    }

    #[test]
    fn remove_by_index_is_bounds_checked() {
        let mut d = draft();
        d.add_project();
        assert!(!d.remove_project(5));
        assert!(d.remove_project(0));
        assert!(d.projects.is_empty());
    }
}
