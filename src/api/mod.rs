//! Resource clients for the club administration REST API.
//!
//! Every client follows the same contract: reads replace a state cell
//! wholesale, writes are followed by a full refresh of the affected view, and
//! deletes pass through the confirmation gate first. Errors land in the
//! client's error cell as well as being returned to the caller.

mod activities;
mod attendance;
mod comments;
mod events;
mod news;
mod resource;
mod session;
mod tournaments;
mod transport;
mod users;

#[cfg(test)]
pub(crate) mod mock;

pub use activities::*;
pub use attendance::*;
pub use comments::*;
pub use events::*;
pub use news::*;
pub use resource::*;
pub use session::*;
pub use tournaments::*;
pub use transport::*;
pub use users::*;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::auth::AuthContext;
use crate::confirm::{Confirm, DEFAULT_PROMPT};
use crate::errors::ClientError;
use crate::routes::{LogNavigator, Navigator};
use crate::state::StateCell;

/// Success response envelope: `{"data": ...}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Result of a gated mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Applied,
    /// Declined at the confirmation gate; nothing was sent.
    Cancelled,
}

/// Optional filter and pagination for list reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
}

impl ListParams {
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(page) = self.page {
            query.push(("page".to_string(), page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            query.push(("per_page".to_string(), per_page.to_string()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            query.push(("search".to_string(), search.trim().to_string()));
        }
        query
    }
}

/// Collaborators shared by every resource client.
#[derive(Clone)]
pub struct Api {
    transport: Arc<dyn Transport>,
    confirm: Arc<dyn Confirm>,
    navigator: Arc<dyn Navigator>,
    auth: AuthContext,
}

impl Api {
    /// Build against the process-wide auth context, logging redirects.
    pub fn new(transport: Arc<dyn Transport>, confirm: Arc<dyn Confirm>) -> Self {
        Self {
            transport,
            confirm,
            navigator: Arc::new(LogNavigator),
            auth: AuthContext::global(),
        }
    }

    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    pub fn with_auth(mut self, auth: AuthContext) -> Self {
        self.auth = auth;
        self
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    /// Ask the confirmation gate with the standard prompt.
    pub(crate) fn confirm(&self) -> bool {
        let confirmed = self.confirm.confirm(DEFAULT_PROMPT);
        if !confirmed {
            tracing::debug!("Destructive request cancelled at confirmation");
        }
        confirmed
    }

    /// Send a request with the session token attached. Auth failures are
    /// forwarded to the navigator; a 401 also ends the local session.
    pub(crate) async fn send(&self, mut request: ApiRequest) -> Result<Value, ClientError> {
        request.authorization = self.auth.authorization_header();
        let label = request.to_string();

        let result = self.transport.send(request).await;
        if let Err(err) = &result {
            match err {
                ClientError::Unauthenticated(_) => {
                    tracing::warn!("{} rejected: not signed in", label);
                    self.auth.clear();
                }
                ClientError::Forbidden(_) => {
                    tracing::warn!("{} rejected: permission denied", label);
                }
                ClientError::Validation { errors, .. } => {
                    tracing::debug!("{} rejected: {:?}", label, errors.errors);
                }
                other => {
                    tracing::warn!("{} failed: {}", label, other);
                }
            }
            if let Some(route) = err.redirect() {
                self.navigator.navigate(route);
            }
        }
        result
    }

    /// Send and unwrap the `data` envelope.
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, ClientError> {
        let value = self.send(request).await?;
        let envelope: Envelope<T> = serde_json::from_value(value)?;
        Ok(envelope.data)
    }

    /// Read into `cell`. The cell is only written on success; the error cell
    /// is cleared on success and set on failure.
    pub(crate) async fn load<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        cell: &StateCell<Option<T>>,
        errors: &StateCell<Option<ClientError>>,
    ) -> Result<(), ClientError> {
        let data = record(errors, self.fetch(request).await)?;
        cell.set(Some(data));
        errors.clear();
        Ok(())
    }

    /// Issue a mutating request, recording any failure in `errors`.
    pub(crate) async fn write(
        &self,
        request: Result<ApiRequest, ClientError>,
        errors: &StateCell<Option<ClientError>>,
    ) -> Result<Value, ClientError> {
        let request = record(errors, request)?;
        record(errors, self.send(request).await)
    }
}

/// Copy a failure into the error cell and pass the result through.
pub(crate) fn record<T>(
    errors: &StateCell<Option<ClientError>>,
    result: Result<T, ClientError>,
) -> Result<T, ClientError> {
    if let Err(err) = &result {
        errors.set(Some(err.clone()));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{MockTransport, RecordingNavigator};
    use crate::confirm::AlwaysConfirm;
    use crate::models::Token;
    use crate::routes::Route;

    #[test]
    fn test_list_params_query() {
        assert!(ListParams::default().to_query().is_empty());

        let params = ListParams {
            page: Some(2),
            per_page: Some(25),
            search: Some("  open ".to_string()),
        };
        assert_eq!(
            params.to_query(),
            vec![
                ("page".to_string(), "2".to_string()),
                ("per_page".to_string(), "25".to_string()),
                ("search".to_string(), "open".to_string()),
            ]
        );

        let blank = ListParams {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(blank.to_query().is_empty());
    }

    #[tokio::test]
    async fn test_send_attaches_bearer_token() {
        let transport = MockTransport::new();
        transport.respond("GET", "/news", serde_json::json!({"data": []}));
        let auth = AuthContext::new();
        auth.set(Token {
            token: "t0k3n".to_string(),
            username: "admin".to_string(),
            role: "admin".to_string(),
        });
        let api = Api::new(transport.clone(), Arc::new(AlwaysConfirm)).with_auth(auth);

        let news: Vec<Value> = api.fetch(ApiRequest::get("/news")).await.unwrap();
        assert!(news.is_empty());
        assert_eq!(
            transport.requests()[0].authorization.as_deref(),
            Some("Bearer t0k3n")
        );
    }

    #[tokio::test]
    async fn test_unauthenticated_clears_session_and_redirects() {
        let transport = MockTransport::new();
        transport.fail("GET", "/users", ClientError::Unauthenticated("expired".into()));
        let navigator = RecordingNavigator::new();
        let auth = AuthContext::new();
        auth.set(Token {
            token: "old".to_string(),
            username: "admin".to_string(),
            role: "admin".to_string(),
        });
        let api = Api::new(transport.clone(), Arc::new(AlwaysConfirm))
            .with_auth(auth.clone())
            .with_navigator(navigator.clone());

        let err = api.send(ApiRequest::get("/users")).await.unwrap_err();
        assert_eq!(err, ClientError::Unauthenticated("expired".into()));
        assert!(!auth.is_authenticated());
        assert_eq!(navigator.routes(), vec![Route::Login]);
    }

    #[tokio::test]
    async fn test_forbidden_keeps_session() {
        let transport = MockTransport::new();
        transport.fail("GET", "/users", ClientError::Forbidden("admins only".into()));
        let navigator = RecordingNavigator::new();
        let auth = AuthContext::new();
        auth.set(Token {
            token: "t".to_string(),
            username: "member".to_string(),
            role: "member".to_string(),
        });
        let api = Api::new(transport, Arc::new(AlwaysConfirm))
            .with_auth(auth.clone())
            .with_navigator(navigator.clone());

        api.send(ApiRequest::get("/users")).await.unwrap_err();
        assert!(auth.is_authenticated());
        assert_eq!(navigator.routes(), vec![Route::PermissionDenied]);
    }

    #[tokio::test]
    async fn test_fetch_rejects_missing_envelope() {
        let transport = MockTransport::new();
        transport.respond("GET", "/events", serde_json::json!([{"id": 1}]));
        let api = Api::new(transport, Arc::new(AlwaysConfirm)).with_auth(AuthContext::new());

        let err = api
            .fetch::<Vec<Value>>(ApiRequest::get("/events"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }
}
