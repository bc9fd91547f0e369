use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    HeadOfCareer,
}

impl Role {
    /// Label shown in the sidebar of every screen.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Student => "Estudiante",
            Role::HeadOfCareer => "Jefe de Carrera",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}
