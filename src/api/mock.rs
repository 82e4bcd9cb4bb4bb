//! In-process test doubles for the transport and router.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use super::{ApiRequest, Transport};
use crate::errors::ClientError;
use crate::routes::{Navigator, Route};

type Scripted = Result<Value, ClientError>;

/// Transport that records every request and replays scripted responses.
///
/// Responses are queued per `METHOD path`; the last queued response repeats.
/// Unscripted requests fail with `NotFound`.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<HashMap<String, VecDeque<Scripted>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn push(&self, method: &str, path: &str, response: Scripted) {
        self.responses
            .lock()
            .unwrap()
            .entry(format!("{} {}", method, path))
            .or_default()
            .push_back(response);
    }

    pub fn respond(&self, method: &str, path: &str, body: Value) {
        self.push(method, path, Ok(body));
    }

    pub fn fail(&self, method: &str, path: &str, err: ClientError) {
        self.push(method, path, Err(err));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests as `METHOD path` lines, in send order.
    pub fn calls(&self) -> Vec<String> {
        self.requests().iter().map(ApiRequest::to_string).collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ClientError> {
        let key = request.to_string();
        self.requests.lock().unwrap().push(request);

        let mut responses = self.responses.lock().unwrap();
        match responses.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => Err(ClientError::NotFound(format!("No mock for {}", key))),
        }
    }
}

/// Navigator that remembers every redirect.
#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}
