//! News post model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A news post. `comments_count` is only present on the list view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct News {
    pub id: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub title: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments_count: Option<u64>,
}

/// Request body for creating or updating a news post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewNews {
    pub title: String,
    pub text: String,
}
