//! clubdesk
//!
//! Resource clients for the club administration REST API: news and comments,
//! users, activities, attendance, chess tournaments, events and sign-in.
//! Each client mirrors one server collection into observable state cells and
//! re-reads the collection after every write.

pub mod api;
pub mod auth;
pub mod config;
pub mod confirm;
pub mod errors;
pub mod models;
pub mod routes;
pub mod state;

use std::sync::Arc;

use api::{
    ActivitiesClient, Api, AttendanceClient, EventsClient, HttpTransport, NewsClient,
    SessionClient, TournamentsClient, UsersClient,
};
use config::Config;
use confirm::Confirm;
use errors::ClientError;
use models::Token;

/// One client per resource, all sharing the same transport and session.
#[derive(Clone)]
pub struct Clubdesk {
    pub api: Api,
    pub session: SessionClient,
    pub news: NewsClient,
    pub users: UsersClient,
    pub activities: ActivitiesClient,
    pub attendance: AttendanceClient,
    pub tournaments: TournamentsClient,
    pub events: EventsClient,
}

impl Clubdesk {
    pub fn new(api: Api) -> Self {
        Self {
            session: SessionClient::new(api.clone()),
            news: NewsClient::new(api.clone()),
            users: UsersClient::new(api.clone()),
            activities: ActivitiesClient::new(api.clone()),
            attendance: AttendanceClient::new(api.clone()),
            tournaments: TournamentsClient::new(api.clone()),
            events: EventsClient::new(api.clone()),
            api,
        }
    }

    /// Build an HTTP-backed set of clients from configuration. A configured
    /// token seeds the process-wide session.
    pub fn from_config(config: &Config, confirm: Arc<dyn Confirm>) -> Result<Self, ClientError> {
        let transport = HttpTransport::new(&config.api_url)?;
        let api = Api::new(Arc::new(transport), confirm);

        if let Some(token) = &config.api_token {
            api.auth().set(Token::preset(token.clone()));
        }

        Ok(Self::new(api))
    }

    /// Comments of one news post.
    pub fn comments(&self, news_id: u64) -> api::CommentsClient {
        api::CommentsClient::new(self.api.clone(), news_id)
    }
}
