//! Generic resource client: one server collection bridged to state cells.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{record, Api, ApiRequest, ListParams, Mutation};
use crate::errors::{ClientError, ValidationErrors};
use crate::state::StateCell;

/// Client for a collection at `path` (`GET path`, `POST path`,
/// `PUT path/:key`, `DELETE path/:key`).
///
/// `items` is `None` until the first successful list. Writes never touch
/// `items` directly; a successful write is always followed by a fresh list.
pub struct ResourceClient<T> {
    api: Api,
    path: String,
    params: StateCell<ListParams>,
    items: StateCell<Option<Vec<T>>>,
    errors: StateCell<Option<ClientError>>,
}

impl<T> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            path: self.path.clone(),
            params: self.params.clone(),
            items: self.items.clone(),
            errors: self.errors.clone(),
        }
    }
}

impl<T: DeserializeOwned> ResourceClient<T> {
    pub fn new(api: Api, path: impl Into<String>) -> Self {
        Self {
            api,
            path: path.into(),
            params: StateCell::default(),
            items: StateCell::new(None),
            errors: StateCell::new(None),
        }
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Request on a single member. The key is always exactly one segment.
    pub fn member(&self, method: Method, key: &str) -> Result<ApiRequest, ClientError> {
        ApiRequest::new(method, &self.path).key(key)
    }

    pub fn items(&self) -> &StateCell<Option<Vec<T>>> {
        &self.items
    }

    pub fn errors(&self) -> &StateCell<Option<ClientError>> {
        &self.errors
    }

    /// Field errors from the last rejected write, if any.
    pub fn validation_errors(&self) -> Option<ValidationErrors> {
        self.errors
            .with(|e| e.as_ref().and_then(ClientError::validation).cloned())
    }

    pub fn params(&self) -> ListParams {
        self.params.get()
    }

    /// Fetch the collection with the last used list parameters.
    pub async fn list(&self) -> Result<(), ClientError> {
        let query = self.params.with(ListParams::to_query);
        let request = ApiRequest::get(&self.path).with_query(query);
        self.api.load(request, &self.items, &self.errors).await
    }

    /// Remember `params` for subsequent refreshes, then list.
    pub async fn list_with(&self, params: ListParams) -> Result<(), ClientError> {
        self.params.set(params);
        self.list().await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, payload: &B) -> Result<(), ClientError> {
        let request = ApiRequest::post(&self.path).json(payload);
        self.api.write(request, &self.errors).await?;
        self.list().await
    }

    pub async fn update<B: Serialize + ?Sized>(
        &self,
        key: &str,
        payload: &B,
    ) -> Result<(), ClientError> {
        let request = self
            .member(Method::PUT, key)
            .and_then(|request| request.json(payload));
        self.api.write(request, &self.errors).await?;
        self.list().await
    }

    /// Delete after confirmation, without the follow-up list. An invalid key
    /// fails before the gate; a declined gate sends nothing. `Applied` means
    /// the server accepted the delete.
    pub async fn delete(&self, key: &str) -> Result<Mutation, ClientError> {
        let request = record(&self.errors, self.member(Method::DELETE, key))?;
        if !self.api.confirm() {
            return Ok(Mutation::Cancelled);
        }
        self.api.write(Ok(request), &self.errors).await?;
        Ok(Mutation::Applied)
    }

    /// [`ResourceClient::delete`], then list.
    pub async fn destroy(&self, key: &str) -> Result<Mutation, ClientError> {
        let outcome = self.delete(key).await?;
        if outcome == Mutation::Applied {
            self.list().await?;
        }
        Ok(outcome)
    }

    /// Fetch one member into `cell`, sharing this client's error cell.
    pub async fn show_into(
        &self,
        key: &str,
        cell: &StateCell<Option<T>>,
    ) -> Result<(), ClientError> {
        let request = record(&self.errors, self.member(Method::GET, key))?;
        self.api.load(request, cell, &self.errors).await
    }
}
