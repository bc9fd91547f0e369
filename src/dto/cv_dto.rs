use serde::{Deserialize, Serialize};

/// Wire payload for CreateCv/UpdateCv. Projects and skills travel without
/// ids: the backend assigns them, and drafts carry only client-side
/// temporary ids that are stripped before submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvInput {
    pub user_id: String,
    pub name: String,
    pub description: String,
    pub career: String,
    pub email: String,
    pub phone: String,
    pub projects: Vec<ProjectInput>,
    pub skills: Vec<SkillInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    pub name: String,
    pub url: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillInput {
    pub name: String,
    pub rate: u8,
}
