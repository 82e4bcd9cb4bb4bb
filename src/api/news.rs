//! News client.

use super::{Api, ListParams, Mutation, ResourceClient};
use crate::errors::{ClientError, ValidationErrors};
use crate::models::{NewNews, News};
use crate::state::StateCell;

/// `GET/POST /news`, `GET/PUT/DELETE /news/:id`.
#[derive(Clone)]
pub struct NewsClient {
    resource: ResourceClient<News>,
    current: StateCell<Option<News>>,
}

impl NewsClient {
    pub fn new(api: Api) -> Self {
        Self {
            resource: ResourceClient::new(api, "/news"),
            current: StateCell::new(None),
        }
    }

    /// News list with comment counts.
    pub fn news(&self) -> &StateCell<Option<Vec<News>>> {
        self.resource.items()
    }

    /// Post opened by [`NewsClient::show`], for the edit view.
    pub fn current(&self) -> &StateCell<Option<News>> {
        &self.current
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

    pub async fn show(&self, id: u64) -> Result<(), ClientError> {
        self.resource.show_into(&id.to_string(), &self.current).await
    }

    pub async fn create(&self, payload: &NewNews) -> Result<(), ClientError> {
        tracing::debug!("Creating news {:?}", payload.title);
        self.resource.create(payload).await
    }

    /// Update, refresh the list, then re-open the post if it is the current one.
    pub async fn update(&self, id: u64, payload: &NewNews) -> Result<(), ClientError> {
        self.resource.update(&id.to_string(), payload).await?;
        if self.current_id() == Some(id) {
            self.show(id).await?;
        }
        Ok(())
    }

    /// Delete, drop the post from `current` if it is open, then list. The
    /// open post is dropped even when the refresh fails.
    pub async fn destroy(&self, id: u64) -> Result<Mutation, ClientError> {
        let outcome = self.resource.delete(&id.to_string()).await?;
        if outcome == Mutation::Applied {
            if self.current_id() == Some(id) {
                self.current.clear();
            }
            self.resource.list().await?;
        }
        Ok(outcome)
    }

    fn current_id(&self) -> Option<u64> {
        self.current.with(|n| n.as_ref().map(|n| n.id))
    }
}
