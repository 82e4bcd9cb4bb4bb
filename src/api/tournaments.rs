//! Tournaments client. A tournament is the aggregate root over its games.

use super::{Api, ApiRequest, ListParams, Mutation, ResourceClient};
use crate::errors::{ClientError, ValidationErrors};
use crate::models::{NewGame, NewTournament, Tournament};
use crate::state::StateCell;

/// `GET/POST /tournaments`, `GET/DELETE /tournaments/:id`,
/// `POST /tournaments/:id/games`.
#[derive(Clone)]
pub struct TournamentsClient {
    resource: ResourceClient<Tournament>,
    current: StateCell<Option<Tournament>>,
}

impl TournamentsClient {
    pub fn new(api: Api) -> Self {
        Self {
            resource: ResourceClient::new(api, "/tournaments"),
            current: StateCell::new(None),
        }
    }

    pub fn tournaments(&self) -> &StateCell<Option<Vec<Tournament>>> {
        self.resource.items()
    }

    /// Tournament opened by [`TournamentsClient::show`], with users and games.
    pub fn current(&self) -> &StateCell<Option<Tournament>> {
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

    pub async fn create(&self, payload: &NewTournament) -> Result<(), ClientError> {
        self.resource.create(payload).await
    }

    pub async fn destroy(&self, id: u64) -> Result<Mutation, ClientError> {
        let outcome = self.resource.delete(&id.to_string()).await?;
        if outcome == Mutation::Applied {
            let was_open = self.current.with(|t| t.as_ref().is_some_and(|t| t.id == id));
            if was_open {
                self.current.clear();
            }
            self.resource.list().await?;
        }
        Ok(outcome)
    }

    /// Record a game, then re-open the tournament. The list is refreshed too
    /// when it has been loaded.
    pub async fn add_game(&self, tournament_id: u64, game: &NewGame) -> Result<(), ClientError> {
        let request = ApiRequest::post(self.resource.path())
            .id(tournament_id)
            .join("games")
            .json(game);
        self.resource
            .api()
            .write(request, self.resource.errors())
            .await?;
        self.show(tournament_id).await?;
        if self.resource.items().is_some() {
            self.list().await?;
        }
        Ok(())
    }
}
