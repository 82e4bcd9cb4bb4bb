//! Sign-in and sign-out.

use super::{record, Api, ApiRequest};
use crate::auth::AuthContext;
use crate::errors::{ClientError, ValidationErrors};
use crate::models::{Credentials, Token};
use crate::state::StateCell;

/// `POST /login`. A successful login stores the token in the auth context.
#[derive(Clone)]
pub struct SessionClient {
    api: Api,
    errors: StateCell<Option<ClientError>>,
}

impl SessionClient {
    pub fn new(api: Api) -> Self {
        Self {
            api,
            errors: StateCell::new(None),
        }
    }

    pub fn auth(&self) -> &AuthContext {
        self.api.auth()
    }

    pub fn errors(&self) -> &StateCell<Option<ClientError>> {
        &self.errors
    }

    pub fn validation_errors(&self) -> Option<ValidationErrors> {
        self.errors
            .with(|e| e.as_ref().and_then(ClientError::validation).cloned())
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<Token, ClientError> {
        let request = record(&self.errors, ApiRequest::post("/login").json(credentials))?;
        let token: Token = record(&self.errors, self.api.fetch(request).await)?;

        tracing::info!("Signed in as {} ({})", token.username, token.role);
        self.auth().set(token.clone());
        self.errors.clear();
        Ok(token)
    }

    /// End the local session. The token is simply forgotten.
    pub fn logout(&self) {
        self.auth().clear();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::api::mock::MockTransport;
    use crate::confirm::AlwaysConfirm;

    fn credentials() -> Credentials {
        Credentials {
            username: "admin".to_string(),
            password: "hunter2".to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_sets_auth_context() {
        let transport = MockTransport::new();
        transport.respond(
            "POST",
            "/login",
            json!({"data": {"token": "abc", "username": "admin", "role": "admin"}}),
        );
        let session = SessionClient::new(
            Api::new(transport.clone(), Arc::new(AlwaysConfirm)).with_auth(AuthContext::new()),
        );

        let token = session.login(&credentials()).await.unwrap();
        assert_eq!(token.role, "admin");
        assert_eq!(session.auth().token(), Some(token));
        assert_eq!(
            transport.requests()[0].body,
            Some(json!({"username": "admin", "password": "hunter2"}))
        );
        // No token was held when the login request went out.
        assert!(transport.requests()[0].authorization.is_none());

        session.logout();
        assert!(!session.auth().is_authenticated());
    }

    #[tokio::test]
    async fn test_failed_login_keeps_signed_out() {
        let transport = MockTransport::new();
        transport.fail(
            "POST",
            "/login",
            ClientError::from_response(
                422,
                br#"{"errors":{"username":["These credentials do not match our records."]}}"#,
            ),
        );
        let session = SessionClient::new(
            Api::new(transport, Arc::new(AlwaysConfirm)).with_auth(AuthContext::new()),
        );

        session.login(&credentials()).await.unwrap_err();
        assert!(!session.auth().is_authenticated());
        assert_eq!(session.validation_errors().unwrap().field("username").len(), 1);
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let printed = format!("{:?}", credentials());
        assert!(printed.contains("admin"));
        assert!(!printed.contains("hunter2"));
    }
}
