//! Session token and login payloads.

use serde::{Deserialize, Serialize};

/// Session issued by `POST /login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub token: String,
    pub username: String,
    pub role: String,
}

impl Token {
    /// A bearer token obtained out of band, with no known user or role.
    pub fn preset(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            username: String::new(),
            role: String::new(),
        }
    }

    /// Who the session belongs to, for log lines.
    pub fn holder(&self) -> Option<String> {
        if self.username.is_empty() {
            None
        } else if self.role.is_empty() {
            Some(self.username.clone())
        } else {
            Some(format!("{} ({})", self.username, self.role))
        }
    }
}

/// Request body for `POST /login`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

// Keep the password out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}
