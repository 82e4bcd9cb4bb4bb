//! Activities client: the activity catalogue and the user/activity matrix.

use super::{record, Api, ApiRequest, Mutation, ResourceClient};
use crate::errors::{ClientError, ValidationErrors};
use crate::models::{Activity, NewActivity, UserActivity, UserActivityTable};
use crate::state::StateCell;

const TABLE_PATH: &str = "/user-activities";

/// `GET/POST /activities`, `DELETE /activities/:name`, and the assignment
/// matrix under `/user-activities`.
#[derive(Clone)]
pub struct ActivitiesClient {
    resource: ResourceClient<Activity>,
    table: StateCell<Option<UserActivityTable>>,
}

impl ActivitiesClient {
    pub fn new(api: Api) -> Self {
        Self {
            resource: ResourceClient::new(api, "/activities"),
            table: StateCell::new(None),
        }
    }

    pub fn activities(&self) -> &StateCell<Option<Vec<Activity>>> {
        self.resource.items()
    }

    pub fn table(&self) -> &StateCell<Option<UserActivityTable>> {
        &self.table
    }

    pub fn errors(&self) -> &StateCell<Option<ClientError>> {
        self.resource.errors()
    }

    pub fn validation_errors(&self) -> Option<ValidationErrors> {
        self.resource.validation_errors()
    }

    pub async fn list(&self) -> Result<(), ClientError> {
        self.resource.list().await
    }

    /// Fetch users, activities and assignments in one read.
    pub async fn load_table(&self) -> Result<(), ClientError> {
        self.resource
            .api()
            .load(ApiRequest::get(TABLE_PATH), &self.table, self.resource.errors())
            .await
    }

    pub async fn create(&self, payload: &NewActivity) -> Result<(), ClientError> {
        self.resource.create(payload).await?;
        self.refresh_table_if_loaded().await
    }

    pub async fn destroy(&self, name: &str) -> Result<Mutation, ClientError> {
        let outcome = self.resource.destroy(name).await?;
        if outcome == Mutation::Applied {
            self.refresh_table_if_loaded().await?;
        }
        Ok(outcome)
    }

    /// Record that `assignment.username` has done `assignment.activity`.
    pub async fn assign(&self, assignment: &UserActivity) -> Result<(), ClientError> {
        let request = ApiRequest::post(TABLE_PATH).json(assignment);
        self.resource
            .api()
            .write(request, self.resource.errors())
            .await?;
        self.load_table().await
    }

    /// `DELETE /user-activities/:username/:activity`, gated.
    pub async fn unassign(&self, username: &str, activity: &str) -> Result<Mutation, ClientError> {
        let api = self.resource.api();
        let request = ApiRequest::delete(TABLE_PATH)
            .key(username)
            .and_then(|request| request.key(activity));
        let request = record(self.resource.errors(), request)?;
        if !api.confirm() {
            return Ok(Mutation::Cancelled);
        }
        api.write(Ok(request), self.resource.errors()).await?;
        self.load_table().await?;
        Ok(Mutation::Applied)
    }

    /// Score for `username` in the held table, if one is loaded.
    pub fn score(&self, username: &str) -> Option<f64> {
        self.table.with(|t| t.as_ref().map(|t| t.score(username)))
    }

    async fn refresh_table_if_loaded(&self) -> Result<(), ClientError> {
        if self.table.is_some() {
            self.load_table().await
        } else {
            Ok(())
        }
    }
}
