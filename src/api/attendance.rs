//! Attendance client: attendance days and who was present.

use serde::Serialize;

use super::{record, Api, ApiRequest, Mutation};
use crate::errors::{ClientError, ValidationErrors};
use crate::models::{AttendanceUserTable, NewAttendanceDay};
use crate::state::StateCell;

const PATH: &str = "/attendance";

#[derive(Serialize)]
struct MarkPresent<'a> {
    username: &'a str,
}

/// `GET/POST /attendance`, `DELETE /attendance/:day_id`,
/// `POST /attendance/:day_id/users`, `DELETE /attendance/:day_id/users/:username`.
///
/// Every write re-reads the whole matrix.
#[derive(Clone)]
pub struct AttendanceClient {
    api: Api,
    table: StateCell<Option<AttendanceUserTable>>,
    errors: StateCell<Option<ClientError>>,
}

impl AttendanceClient {
    pub fn new(api: Api) -> Self {
        Self {
            api,
            table: StateCell::new(None),
            errors: StateCell::new(None),
        }
    }

    pub fn table(&self) -> &StateCell<Option<AttendanceUserTable>> {
        &self.table
    }

    pub fn errors(&self) -> &StateCell<Option<ClientError>> {
        &self.errors
    }

    pub fn validation_errors(&self) -> Option<ValidationErrors> {
        self.errors
            .with(|e| e.as_ref().and_then(ClientError::validation).cloned())
    }

    pub async fn load(&self) -> Result<(), ClientError> {
        self.api
            .load(ApiRequest::get(PATH), &self.table, &self.errors)
            .await
    }

    /// Open a new attendance day.
    pub async fn create_day(&self, payload: &NewAttendanceDay) -> Result<(), ClientError> {
        let request = ApiRequest::post(PATH).json(payload);
        self.api.write(request, &self.errors).await?;
        self.load().await
    }

    pub async fn destroy_day(&self, day_id: u64) -> Result<Mutation, ClientError> {
        self.gated(Ok(ApiRequest::delete(PATH).id(day_id))).await
    }

    pub async fn mark(&self, day_id: u64, username: &str) -> Result<(), ClientError> {
        let request = ApiRequest::post(PATH)
            .id(day_id)
            .join("users")
            .json(&MarkPresent { username });
        self.api.write(request, &self.errors).await?;
        self.load().await
    }

    pub async fn unmark(&self, day_id: u64, username: &str) -> Result<Mutation, ClientError> {
        let request = ApiRequest::delete(PATH)
            .id(day_id)
            .join("users")
            .key(username);
        self.gated(request).await
    }

    async fn gated(
        &self,
        request: Result<ApiRequest, ClientError>,
    ) -> Result<Mutation, ClientError> {
        let request = record(&self.errors, request)?;
        if !self.api.confirm() {
            return Ok(Mutation::Cancelled);
        }
        self.api.write(Ok(request), &self.errors).await?;
        self.load().await?;
        Ok(Mutation::Applied)
    }
}
