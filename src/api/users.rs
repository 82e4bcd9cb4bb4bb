//! Users client. Users are addressed by username.

use super::{Api, ListParams, Mutation, ResourceClient};
use crate::errors::{ClientError, ValidationErrors};
use crate::models::{NewUser, User};
use crate::state::StateCell;

/// `GET/POST /users`, `GET/DELETE /users/:username`.
#[derive(Clone)]
pub struct UsersClient {
    resource: ResourceClient<User>,
    current: StateCell<Option<User>>,
}

impl UsersClient {
    pub fn new(api: Api) -> Self {
        Self {
            resource: ResourceClient::new(api, "/users"),
            current: StateCell::new(None),
        }
    }

    pub fn users(&self) -> &StateCell<Option<Vec<User>>> {
        self.resource.items()
    }

    pub fn current(&self) -> &StateCell<Option<User>> {
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

    pub async fn show(&self, username: &str) -> Result<(), ClientError> {
        self.resource.show_into(username, &self.current).await
    }

    pub async fn create(&self, payload: &NewUser) -> Result<(), ClientError> {
        self.resource.create(payload).await
    }

    pub async fn destroy(&self, username: &str) -> Result<Mutation, ClientError> {
        let outcome = self.resource.delete(username).await?;
        if outcome == Mutation::Applied {
            let was_open = self
                .current
                .with(|u| u.as_ref().is_some_and(|u| u.username == username));
            if was_open {
                self.current.clear();
            }
            self.resource.list().await?;
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{json, Value};

    use super::*;
    use crate::api::mock::MockTransport;
    use crate::auth::AuthContext;
    use crate::confirm::AlwaysConfirm;

    fn user_json(username: &str) -> Value {
        json!({"username": username, "name": "Magnus", "surname": "C", "email": "m@club.test"})
    }

    #[tokio::test]
    async fn test_show_and_destroy_by_username() {
        let transport = MockTransport::new();
        transport.respond("GET", "/users/magnus", json!({"data": user_json("magnus")}));
        transport.respond("DELETE", "/users/magnus", Value::Null);
        transport.respond("GET", "/users", json!({"data": [user_json("hikaru")]}));
        let users = UsersClient::new(
            Api::new(transport.clone(), Arc::new(AlwaysConfirm)).with_auth(AuthContext::new()),
        );

        users.show("magnus").await.unwrap();
        assert_eq!(users.current().get().unwrap().full_name(), "Magnus C");

        assert_eq!(users.destroy("magnus").await.unwrap(), Mutation::Applied);
        assert!(users.current().get().is_none());
        assert_eq!(users.users().get().unwrap()[0].username, "hikaru");
    }

    #[tokio::test]
    async fn test_unaddressable_usernames_never_reach_the_collection() {
        let transport = MockTransport::new();
        let users = UsersClient::new(
            Api::new(transport.clone(), Arc::new(AlwaysConfirm)).with_auth(AuthContext::new()),
        );

        for username in ["", ".."] {
            let err = users.destroy(username).await.unwrap_err();
            assert!(matches!(err, ClientError::InvalidKey(_)));
        }
        assert!(users.show(".").await.is_err());
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_username_with_slash_is_escaped() {
        let transport = MockTransport::new();
        transport.respond("DELETE", "/users/a%2Fb", Value::Null);
        transport.respond("GET", "/users", json!({"data": []}));
        let users = UsersClient::new(
            Api::new(transport.clone(), Arc::new(AlwaysConfirm)).with_auth(AuthContext::new()),
        );

        users.destroy("a/b").await.unwrap();
        assert_eq!(transport.calls(), vec!["DELETE /users/a%2Fb", "GET /users"]);
    }

    #[tokio::test]
    async fn test_create_sends_password_only_when_set() {
        let transport = MockTransport::new();
        transport.respond("POST", "/users", json!({"data": user_json("judit")}));
        transport.respond("GET", "/users", json!({"data": [user_json("judit")]}));
        let users = UsersClient::new(
            Api::new(transport.clone(), Arc::new(AlwaysConfirm)).with_auth(AuthContext::new()),
        );

        users
            .create(&NewUser {
                username: "judit".to_string(),
                name: "Judit".to_string(),
                surname: "P".to_string(),
                email: "j@club.test".to_string(),
                password: None,
            })
            .await
            .unwrap();

        let body = transport.requests()[0].body.clone().unwrap();
        assert!(body.get("password").is_none());
        assert_eq!(users.users().get().unwrap().len(), 1);
    }
}
