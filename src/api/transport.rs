//! HTTP transport.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, Url};
use serde::Serialize;
use serde_json::Value;

use crate::errors::ClientError;

/// A request relative to the API base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Unescaped path segments. Each one is sent as exactly one URL segment.
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Filled from the auth context just before sending.
    pub authorization: Option<String>,
}

impl ApiRequest {
    /// `route` is a fixed route such as `/news/3/comments`, split on `/`.
    /// Caller-supplied keys are appended with [`ApiRequest::key`].
    pub fn new(method: Method, route: &str) -> Self {
        Self {
            method,
            segments: Vec::new(),
            query: Vec::new(),
            body: None,
            authorization: None,
        }
        .join(route)
    }

    pub fn get(route: &str) -> Self {
        Self::new(Method::GET, route)
    }

    pub fn post(route: &str) -> Self {
        Self::new(Method::POST, route)
    }

    pub fn put(route: &str) -> Self {
        Self::new(Method::PUT, route)
    }

    pub fn delete(route: &str) -> Self {
        Self::new(Method::DELETE, route)
    }

    /// Append a fixed route.
    pub fn join(mut self, route: &str) -> Self {
        self.segments.extend(
            route
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        );
        self
    }

    /// Append a numeric id.
    pub fn id(mut self, id: u64) -> Self {
        self.segments.push(id.to_string());
        self
    }

    /// Append a natural key (username, activity name) as one segment.
    /// `/` inside the key is escaped, never treated as a separator.
    pub fn key(mut self, key: &str) -> Result<Self, ClientError> {
        self.segments.push(check_key(key)?.to_string());
        Ok(self)
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ClientError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Path as it appears in logs, e.g. `/activities/Simul%2FBlitz`.
    pub fn path(&self) -> String {
        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            for c in segment.chars() {
                match c {
                    '%' => path.push_str("%25"),
                    '/' => path.push_str("%2F"),
                    c => path.push(c),
                }
            }
        }
        if path.is_empty() {
            path.push('/');
        }
        path
    }
}

impl std::fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.path())
    }
}

/// Reject keys that cannot address a single member: blank keys, `.` and `..`.
/// URL normalisation would turn those into a request on the parent path.
pub fn check_key(key: &str) -> Result<&str, ClientError> {
    if key.trim().is_empty() || key == "." || key == ".." {
        return Err(ClientError::InvalidKey(format!(
            "{:?} does not name a single record",
            key
        )));
    }
    Ok(key)
}

/// Issues requests and returns the parsed JSON body, or a classified error
/// for any non-2xx status. An empty success body is returned as `Value::Null`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<Value, ClientError>;
}

/// `reqwest`-backed transport against a fixed base URL.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    user_agent: String,
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let parsed = Url::parse(base_url)
            .map_err(|e| ClientError::Config(format!("Invalid API URL {:?}: {}", base_url, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "API URL {:?} cannot be used as a base",
                base_url
            )));
        }

        let user_agent = format!("clubdesk/{}", env!("CARGO_PKG_VERSION"));
        let client = Client::builder().user_agent(user_agent.clone()).build()?;

        Ok(Self {
            user_agent,
            client,
            base_url: parsed,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Append `segments` to the base URL, percent-encoding each one
    /// (including any `/` or `%` it contains).
    fn url(&self, segments: &[String]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ClientError> {
        let url = self.url(&request.segments);
        let mut builder = self
            .client
            .request(request.method.clone(), url.clone())
            .header(ACCEPT, "application/json");

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(authorization) = &request.authorization {
            builder = builder.header(AUTHORIZATION, authorization);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        tracing::debug!("{} {}", request.method, url);
        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        tracing::debug!("{} {} -> {}", request.method, url, status);

        if !status.is_success() {
            return Err(ClientError::from_response(status.as_u16(), &bytes));
        }
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}
