//! Session authentication context.
//!
//! Holds the bearer token returned by `POST /login` for the lifetime of the
//! process. Transports read the token through this context; nothing else keeps
//! a copy.

use once_cell::sync::Lazy;

use crate::models::Token;
use crate::state::StateCell;

/// Header used to present the session token.
pub const AUTHORIZATION_SCHEME: &str = "Bearer";

static GLOBAL: Lazy<AuthContext> = Lazy::new(AuthContext::new);

/// Observable holder of the current session token.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    session: StateCell<Option<Token>>,
}

impl AuthContext {
    /// A fresh, signed-out context. Most callers want [`AuthContext::global`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide context.
    pub fn global() -> AuthContext {
        GLOBAL.clone()
    }

    pub fn set(&self, token: Token) {
        match token.holder() {
            Some(holder) => tracing::debug!("Session opened for {}", holder),
            None => tracing::debug!("Session opened from a preset token"),
        }
        self.session.set(Some(token));
    }

    pub fn clear(&self) {
        if self.session.set(None).is_some() {
            tracing::debug!("Session cleared");
        }
    }

    /// Current session, if signed in.
    pub fn token(&self) -> Option<Token> {
        self.session.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Value for the `Authorization` header, if signed in.
    pub fn authorization_header(&self) -> Option<String> {
        self.session
            .with(|t| t.as_ref().map(|t| format!("{} {}", AUTHORIZATION_SCHEME, t.token)))
    }

    /// Observable session cell, for views that react to sign-in/sign-out.
    pub fn session(&self) -> &StateCell<Option<Token>> {
        &self.session
    }
}
