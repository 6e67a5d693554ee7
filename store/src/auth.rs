//! Persisted authentication state.

use std::sync::Arc;

use entity::users::User;
use log::*;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::error::Error;
use crate::storage::Storage;

/// Durable key holding the raw bearer token. The API client reads it on every
/// request.
pub const TOKEN_KEY: &str = "token";

/// Durable key holding the store's own snapshot.
pub const AUTH_SNAPSHOT_KEY: &str = "auth-storage";

/// Who is signed in. `is_authenticated` always equals `token.is_some()`.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_authenticated: bool,
}

impl AuthState {
    fn authenticated(user: User, token: String) -> Self {
        Self {
            user: Some(user),
            token: Some(token),
            is_authenticated: true,
        }
    }
}

impl std::fmt::Debug for AuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthState")
            .field("user", &self.user)
            .field("token", &self.token.as_ref().map(|_| "[redacted]"))
            .field("is_authenticated", &self.is_authenticated)
            .finish()
    }
}

/// Holds the signed-in user and bearer token across restarts.
///
/// State is loaded from storage once in [`AuthStore::load`] and saved on every
/// write. Observers get a [`watch::Receiver`] from [`AuthStore::subscribe`].
pub struct AuthStore {
    storage: Arc<dyn Storage>,
    state: watch::Sender<AuthState>,
}

impl AuthStore {
    /// Restores the last saved state.
    ///
    /// The `token` key is authoritative: a snapshot whose token no longer
    /// matches it (e.g. the key was cleared by another process) restores as
    /// signed out.
    pub fn load(storage: Arc<dyn Storage>) -> Result<Self, Error> {
        let token = storage.get(TOKEN_KEY)?;
        let snapshot = match storage.get(AUTH_SNAPSHOT_KEY)? {
            Some(raw) => match serde_json::from_str::<AuthState>(&raw) {
                Ok(snapshot) => Some(snapshot),
                Err(e) => {
                    warn!("Discarding unreadable auth snapshot: {e}");
                    None
                }
            },
            None => None,
        };

        let state = match (token, snapshot) {
            (Some(token), Some(snapshot)) if snapshot.token.as_deref() == Some(token.as_str()) => {
                match snapshot.user {
                    Some(user) => AuthState::authenticated(user, token),
                    None => AuthState::default(),
                }
            }
            _ => AuthState::default(),
        };
        debug!("Restored auth state (authenticated: {})", state.is_authenticated);

        let (sender, _) = watch::channel(state);
        Ok(Self {
            storage,
            state: sender,
        })
    }

    /// Signs `user` in with `token`: writes the token to durable storage,
    /// marks the state authenticated and saves the snapshot.
    ///
    /// If the snapshot cannot be saved the token key is put back to what the
    /// current state holds, so storage and state never disagree.
    pub fn set_auth(&self, user: User, token: String) -> Result<(), Error> {
        self.storage.set(TOKEN_KEY, &token)?;
        let state = AuthState::authenticated(user, token);
        if let Err(e) = self.save(&state) {
            warn!("Could not save the auth snapshot: {e}");
            if let Err(rollback) = self.discard_staged_token() {
                error!("Could not restore the previous token: {rollback}");
            }
            return Err(e);
        }
        info!(
            "Signed in as {}",
            state.user.as_ref().map(|u| u.email.as_str()).unwrap_or("")
        );
        self.state.send_replace(state);
        Ok(())
    }

    /// Writes only the durable token, leaving the state signed out. Requests
    /// sent after this carry the token, which lets the caller look up the
    /// user before completing sign-in with [`AuthStore::set_auth`].
    pub fn set_token(&self, token: &str) -> Result<(), Error> {
        self.storage.set(TOKEN_KEY, token)
    }

    /// Puts the durable token back to the one the current state holds,
    /// undoing [`AuthStore::set_token`]. An earlier session stays intact.
    pub fn discard_staged_token(&self) -> Result<(), Error> {
        let token = self.state.borrow().token.clone();
        match token {
            Some(token) => self.storage.set(TOKEN_KEY, &token),
            None => self.storage.remove(TOKEN_KEY),
        }
    }

    /// Clears durable storage and resets to signed out.
    pub fn logout(&self) -> Result<(), Error> {
        self.storage.remove(TOKEN_KEY)?;
        self.storage.remove(AUTH_SNAPSHOT_KEY)?;
        self.state.send_replace(AuthState::default());
        info!("Signed out");
        Ok(())
    }

    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    fn save(&self, state: &AuthState) -> Result<(), Error> {
        let snapshot = serde_json::to_string(state)?;
        self.storage.set(AUTH_SNAPSHOT_KEY, &snapshot)
    }
}
