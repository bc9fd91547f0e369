use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: String,
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    pub salary: f64,
    pub is_internship: bool,
    pub created_by_head_of_career_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Offer {
    pub fn kind_label(&self) -> &'static str {
        if self.is_internship {
            "Práctica"
        } else {
            "Trabajo"
        }
    }
}
