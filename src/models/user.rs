//! Club member model. Users are referenced by `username` everywhere else.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub name: String,
    pub surname: String,
    pub email: String,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

/// Request body for creating a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub name: String,
    pub surname: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}
