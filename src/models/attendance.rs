//! Attendance models and the user × day attendance matrix.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::User;

/// A day on which attendance was taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceDay {
    pub id: u64,
    pub date: NaiveDate,
}

/// Request body for opening an attendance day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAttendanceDay {
    pub date: NaiveDate,
}

/// A user present on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    pub attendance_day_id: u64,
    pub username: String,
}

/// Everything needed to render the attendance matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceUserTable {
    pub users: Vec<User>,
    #[serde(rename = "attendanceDays")]
    pub attendance_days: Vec<AttendanceDay>,
    pub attendance: Vec<Attendance>,
}

/// One rendered row of the matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceRow {
    pub user: User,
    /// One flag per day, in `AttendanceUserTable::attendance_days` order.
    pub present: Vec<bool>,
    pub total: usize,
}

impl AttendanceUserTable {
    pub fn attended(&self, username: &str, day_id: u64) -> bool {
        self.attendance
            .iter()
            .any(|a| a.attendance_day_id == day_id && a.username == username)
    }

    pub fn rows(&self) -> Vec<AttendanceRow> {
        self.users
            .iter()
            .map(|user| {
                let present: Vec<bool> = self
                    .attendance_days
                    .iter()
                    .map(|day| self.attended(&user.username, day.id))
                    .collect();
                let total = present.iter().filter(|p| **p).count();
                AttendanceRow {
                    user: user.clone(),
                    present,
                    total,
                }
            })
            .collect()
    }
}
