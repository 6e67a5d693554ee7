//! Sign in, sign up and sign out.

use api_client::ApiClient;
use entity::users::User;
use log::*;
use secrecy::SecretString;
use store::AuthStore;

use crate::error::Error;

pub struct Session<'a> {
    client: &'a ApiClient,
    auth: &'a AuthStore,
}

impl<'a> Session<'a> {
    pub fn new(client: &'a ApiClient, auth: &'a AuthStore) -> Self {
        Self { client, auth }
    }

    /// Exchanges credentials for a token, then looks up who it belongs to.
    ///
    /// The token is written to durable storage before the lookup so that
    /// request carries it. If the lookup fails the durable token goes back to
    /// whatever session was active before, and the lookup error is returned.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<User, Error> {
        let token = self
            .client
            .auth()
            .login(email, password)
            .await
            .map_err(|e| {
                warn!("Login failed for {email}: {e}");
                Error::from(e)
            })?;

        self.auth.set_token(&token.access_token)?;
        let user = match self.client.auth().me().await {
            Ok(user) => user,
            Err(e) => {
                warn!("Could not load the signed-in user: {e}");
                if let Err(restore) = self.auth.discard_staged_token() {
                    error!("Could not restore the previous token: {restore}");
                }
                return Err(e.into());
            }
        };

        self.auth.set_auth(user.clone(), token.access_token)?;
        Ok(user)
    }

    /// Creates an account and signs straight in with it.
    pub async fn register(
        &self,
        email: &str,
        password: &SecretString,
        full_name: &str,
    ) -> Result<User, Error> {
        if email.trim().is_empty() {
            return Err(Error::validation("Email is required"));
        }
        if full_name.trim().is_empty() {
            return Err(Error::validation("Full name is required"));
        }

        self.client
            .auth()
            .register(email, password, full_name)
            .await
            .map_err(|e| {
                warn!("Registration failed for {email}: {e}");
                Error::from(e)
            })?;
        info!("Registered {email}");
        self.login(email, password).await
    }

    pub fn logout(&self) -> Result<(), Error> {
        Ok(self.auth.logout()?)
    }

    pub fn current_user(&self) -> Option<User> {
        self.auth.user()
    }
}
