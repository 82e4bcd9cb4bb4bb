//! Activity models and the user/activity score table.

use serde::{Deserialize, Serialize};

use super::User;

/// A scored activity. `name` is the natural key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub name: String,
    pub weight: f64,
    pub description: String,
}

/// Request body for creating an activity.
pub type NewActivity = Activity;

/// Assignment of an activity to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserActivity {
    pub username: String,
    pub activity: String,
}

/// Everything needed to render the user × activity matrix.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserActivityTable {
    pub users: Vec<User>,
    pub activities: Vec<Activity>,
    pub done: Vec<UserActivity>,
}

/// One rendered row of the matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserActivityRow {
    pub user: User,
    /// One flag per activity, in `UserActivityTable::activities` order.
    pub done: Vec<bool>,
    pub score: f64,
}

impl UserActivityTable {
    pub fn has_done(&self, username: &str, activity: &str) -> bool {
        self.done
            .iter()
            .any(|d| d.username == username && d.activity == activity)
    }

    /// Sum of weights of the activities `username` has done. Assignments to
    /// unknown activities count for nothing.
    pub fn score(&self, username: &str) -> f64 {
        self.activities
            .iter()
            .filter(|a| self.has_done(username, &a.name))
            .map(|a| a.weight)
            .sum()
    }

    pub fn rows(&self) -> Vec<UserActivityRow> {
        self.users
            .iter()
            .map(|user| {
                let done: Vec<bool> = self
                    .activities
                    .iter()
                    .map(|a| self.has_done(&user.username, &a.name))
                    .collect();
                let score = self
                    .activities
                    .iter()
                    .zip(&done)
                    .filter(|(_, done)| **done)
                    .map(|(a, _)| a.weight)
                    .sum();
                UserActivityRow {
                    user: user.clone(),
                    done,
                    score,
                }
            })
            .collect()
    }
}
