//! Client session state machine.
//!
//! `Anonymous -> Authenticating -> Authenticated`, and back to `Anonymous`
//! on logout or a failed attempt. The state is published on a watch channel
//! so routers and views can follow it without polling.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use common::AppResult;
use domain::{Registration, Role, Session, User, SESSION_TOKEN_KEY, SESSION_USER_KEY};

use super::storage::SessionStorage;
use crate::service::AuthService;

/// Observable session state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticating,
    Authenticated(Session),
}

impl SessionState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}

/// Holds the current session and keeps durable storage in step with it.
pub struct SessionManager {
    auth: Arc<dyn AuthService>,
    storage: Arc<dyn SessionStorage>,
    state: watch::Sender<SessionState>,
}

impl SessionManager {
    /// Create a manager in the anonymous state. Call [`restore`](Self::restore)
    /// to adopt a previously saved session.
    pub fn new(auth: Arc<dyn AuthService>, storage: Arc<dyn SessionStorage>) -> Self {
        let (state, _) = watch::channel(SessionState::Anonymous);
        Self {
            auth,
            storage,
            state,
        }
    }

    /// Adopt the saved user, if any, without re-validating it.
    ///
    /// An unreadable record leaves the session anonymous.
    pub async fn restore(&self) -> SessionState {
        match self.read_saved().await {
            Ok(Some(session)) => {
                info!(username = %session.user.username, "Session restored");
                self.state
                    .send_replace(SessionState::Authenticated(session));
            }
            Ok(None) => {
                self.state.send_replace(SessionState::Anonymous);
            }
            Err(e) => {
                warn!(error = %e, "Saved session unreadable, starting anonymous");
                self.state.send_replace(SessionState::Anonymous);
            }
        }
        self.state()
    }

    /// Log in and persist the session.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<Session> {
        self.state.send_replace(SessionState::Authenticating);
        let result = self.auth.login(username, password).await;
        self.settle(result).await
    }

    /// Register a new account and log in as it.
    ///
    /// The form is validated before any service call.
    pub async fn register(&self, form: &Registration) -> AppResult<Session> {
        form.validate()?;

        self.state.send_replace(SessionState::Authenticating);
        let result = self
            .auth
            .register(&form.name, &form.username, &form.password)
            .await;
        self.settle(result).await
    }

    /// Clear the session. Never fails; storage and revocation problems are logged.
    pub async fn logout(&self) {
        let previous = self.state.send_replace(SessionState::Anonymous);

        if let Some(session) = previous.session() {
            if let Err(e) = self.auth.logout(&session.token).await {
                warn!(error = %e, "Token revocation failed");
            }
        }
        for key in [SESSION_USER_KEY, SESSION_TOKEN_KEY] {
            if let Err(e) = self.storage.remove(key).await {
                warn!(key, error = %e, "Failed to clear saved session");
            }
        }
        info!("Session cleared");
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(*self.state.borrow(), SessionState::Authenticated(_))
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().session().map(|s| s.user.clone())
    }

    pub fn current_role(&self) -> Option<Role> {
        self.state.borrow().session().map(|s| s.user.role)
    }

    pub fn current_session(&self) -> Option<Session> {
        self.state.borrow().session().cloned()
    }

    async fn settle(&self, result: AppResult<Session>) -> AppResult<Session> {
        let session = match result {
            Ok(session) => session,
            Err(e) => {
                self.state.send_replace(SessionState::Anonymous);
                return Err(e);
            }
        };

        if let Err(e) = self.persist(&session).await {
            self.state.send_replace(SessionState::Anonymous);
            return Err(e);
        }

        self.state
            .send_replace(SessionState::Authenticated(session.clone()));
        Ok(session)
    }

    async fn persist(&self, session: &Session) -> AppResult<()> {
        let user = serde_json::to_string(&session.user)?;
        self.storage.save(SESSION_USER_KEY, &user).await?;
        self.storage.save(SESSION_TOKEN_KEY, &session.token).await
    }

    async fn read_saved(&self) -> AppResult<Option<Session>> {
        let Some(user) = self.storage.load(SESSION_USER_KEY).await? else {
            return Ok(None);
        };
        let user: User = serde_json::from_str(&user)?;
        let token = self
            .storage
            .load(SESSION_TOKEN_KEY)
            .await?
            .unwrap_or_default();
        Ok(Some(Session { token, user }))
    }
}
