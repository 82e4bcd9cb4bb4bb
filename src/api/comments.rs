//! Comments client, scoped to one news post.

use super::{Api, Mutation, ResourceClient};
use crate::errors::{ClientError, ValidationErrors};
use crate::models::{Comment, NewComment};
use crate::state::StateCell;

/// `GET/POST /news/:id/comments`, `DELETE /news/:id/comments/:comment_id`.
#[derive(Clone)]
pub struct CommentsClient {
    news_id: u64,
    resource: ResourceClient<Comment>,
}

impl CommentsClient {
    pub fn new(api: Api, news_id: u64) -> Self {
        Self {
            news_id,
            resource: ResourceClient::new(api, format!("/news/{}/comments", news_id)),
        }
    }

    pub fn news_id(&self) -> u64 {
        self.news_id
    }

    pub fn comments(&self) -> &StateCell<Option<Vec<Comment>>> {
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

    pub async fn create(&self, payload: &NewComment) -> Result<(), ClientError> {
        self.resource.create(payload).await
    }

    pub async fn destroy(&self, comment_id: u64) -> Result<Mutation, ClientError> {
        self.resource.destroy(&comment_id.to_string()).await
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

    fn comment_json(id: u64, text: &str) -> Value {
        json!({
            "id": id,
            "news_id": 3,
            "username": "anna",
            "text": text,
            "created_at": "2022-05-02T08:30:00Z",
            "updated_at": "2022-05-02T08:30:00Z"
        })
    }

    #[tokio::test]
    async fn test_comments_are_scoped_to_news() {
        let transport = MockTransport::new();
        transport.respond("POST", "/news/3/comments", json!({"data": comment_json(11, "Nice")}));
        transport.respond(
            "GET",
            "/news/3/comments",
            json!({"data": [comment_json(10, "First"), comment_json(11, "Nice")]}),
        );
        transport.respond("DELETE", "/news/3/comments/10", Value::Null);
        let comments = CommentsClient::new(
            Api::new(transport.clone(), Arc::new(AlwaysConfirm)).with_auth(AuthContext::new()),
            3,
        );

        comments
            .create(&NewComment {
                username: "anna".to_string(),
                text: "Nice".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(comments.comments().get().unwrap().len(), 2);

        comments.destroy(10).await.unwrap();
        assert_eq!(
            transport.calls(),
            vec![
                "POST /news/3/comments",
                "GET /news/3/comments",
                "DELETE /news/3/comments/10",
                "GET /news/3/comments",
            ]
        );
        assert_eq!(comments.news_id(), 3);
    }

    #[tokio::test]
    async fn test_empty_comment_rejected() {
        let transport = MockTransport::new();
        transport.fail(
            "POST",
            "/news/3/comments",
            ClientError::from_response(
                422,
                br#"{"message":"invalid","errors":{"text":["The text field is required."]}}"#,
            ),
        );
        let comments = CommentsClient::new(
            Api::new(transport.clone(), Arc::new(AlwaysConfirm)).with_auth(AuthContext::new()),
            3,
        );

        comments
            .create(&NewComment {
                username: "anna".to_string(),
                text: String::new(),
            })
            .await
            .unwrap_err();
        let errors = comments.validation_errors().unwrap();
        assert_eq!(errors.field("text").len(), 1);
        assert!(comments.comments().get().is_none());
    }
}
