use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::api::ApiClient;
use crate::error::{Error, Result};
use crate::storage::{LocalStore, TOKEN_KEY, USER_KEY};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// The store has not been read yet.
    Unknown,
    Anonymous,
    Authenticated(Session),
}

#[derive(Serialize, Deserialize)]
struct StoredUser {
    username: String,
}

/// Owns the local store and the session lifecycle around it.
pub struct SessionManager {
    store: LocalStore,
    state: SessionState,
}

impl SessionManager {
    pub fn new(store: LocalStore) -> Self {
        Self { store, state: SessionState::Unknown }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut LocalStore {
        &mut self.store
    }

    /// Leaves `Unknown` based on what the store holds. Both token and user must be present.
    pub fn restore(&mut self) -> &SessionState {
        let token = self.store.get(TOKEN_KEY).filter(|t| !t.is_empty());
        let user = self.store.get(USER_KEY).and_then(|raw| {
            serde_json::from_str::<StoredUser>(raw)
                .map_err(|e| warn!("ignoring malformed stored user: {e}"))
                .ok()
        });
        self.state = match (token, user) {
            (Some(token), Some(user)) => SessionState::Authenticated(Session {
                username: user.username,
                token: token.to_string(),
            }),
            _ => SessionState::Anonymous,
        };
        &self.state
    }

    pub fn token(&self) -> Option<&str> {
        match &self.state {
            SessionState::Authenticated(s) => Some(&s.token),
            _ => None,
        }
    }

    pub fn require_authenticated(&self) -> Result<&Session> {
        match &self.state {
            SessionState::Authenticated(s) => Ok(s),
            _ => Err(Error::NotAuthenticated),
        }
    }

    pub async fn login(&mut self, client: &ApiClient, username: &str, password: &str) -> Result<&Session> {
        let token = client.login(username, password).await?;
        let user = serde_json::to_string(&StoredUser { username: username.to_string() })
            .map_err(|e| Error::Storage(e.to_string()))?;
        self.store.set(TOKEN_KEY, token.clone())?;
        self.store.set(USER_KEY, user)?;
        info!("logged in as {username}");
        self.state = SessionState::Authenticated(Session { username: username.to_string(), token });
        self.require_authenticated()
    }

    /// Registers the account then logs straight in.
    pub async fn register(&mut self, client: &ApiClient, username: &str, password: &str) -> Result<&Session> {
        client.register(username, password).await?;
        info!("registered {username}");
        self.login(client, username, password).await
    }

    pub fn logout(&mut self) -> Result<()> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_KEY)?;
        self.state = SessionState::Anonymous;
        info!("logged out");
        Ok(())
    }
}
