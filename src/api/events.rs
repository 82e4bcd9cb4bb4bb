//! Events client.

use super::{Api, ListParams, Mutation, ResourceClient};
use crate::errors::{ClientError, ValidationErrors};
use crate::models::{Event, NewEvent};
use crate::state::StateCell;

/// `GET/POST /events`, `DELETE /events/:id`.
#[derive(Clone)]
pub struct EventsClient {
    resource: ResourceClient<Event>,
}

impl EventsClient {
    pub fn new(api: Api) -> Self {
        Self {
            resource: ResourceClient::new(api, "/events"),
        }
    }

    pub fn events(&self) -> &StateCell<Option<Vec<Event>>> {
        self.resource.items()
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

    pub async fn list_with(&self, params: ListParams) -> Result<(), ClientError> {
        self.resource.list_with(params).await
    }

    pub async fn create(&self, payload: &NewEvent) -> Result<(), ClientError> {
        self.resource.create(payload).await
    }

    pub async fn destroy(&self, id: u64) -> Result<Mutation, ClientError> {
        self.resource.destroy(&id.to_string()).await
    }
}
