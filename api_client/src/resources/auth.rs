use entity::users::{AuthToken, User};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::client::ApiClient;
use crate::error::Error;

pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

#[derive(Serialize)]
struct Registration<'a> {
    email: &'a str,
    password: &'a str,
    full_name: &'a str,
}

impl ApiClient {
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi { client: self }
    }
}

impl AuthApi<'_> {
    /// Exchanges credentials for a bearer token. The backend expects an
    /// OAuth2 password form where the email goes in `username`.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<AuthToken, Error> {
        let form = [
            ("username", email),
            ("password", password.expose_secret().as_str()),
        ];
        self.client.post_form("/auth/login", &form).await
    }

    pub async fn register(
        &self,
        email: &str,
        password: &SecretString,
        full_name: &str,
    ) -> Result<User, Error> {
        let registration = Registration {
            email,
            password: password.expose_secret(),
            full_name,
        };
        self.client
            .post_json("/auth/register", &registration)
            .await
    }

    pub async fn me(&self) -> Result<User, Error> {
        self.client.get("/auth/me").await
    }
}
