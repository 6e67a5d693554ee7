//! The shared client every resource wrapper sends through.

use std::sync::Arc;

use log::*;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use service::config::Config;
use store::Storage;

use crate::auth::Authenticator;
use crate::error::Error;
use crate::http::ApiClientBuilder;

/// HTTP client for the IGAMS backend.
///
/// Paths given to the request helpers are relative to the API root, e.g.
/// `/inputs/goals`.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    auth: Box<dyn Authenticator>,
}

impl ApiClient {
    /// Client for the configured backend, authenticating with the token held
    /// in `storage`.
    pub fn new(config: &Config, storage: Arc<dyn Storage>) -> Result<Self, Error> {
        ApiClientBuilder::from_config(config, storage).build()
    }

    pub(crate) fn from_parts(
        http: reqwest::Client,
        base_url: String,
        auth: Box<dyn Authenticator>,
    ) -> Self {
        Self {
            http,
            base_url,
            auth,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, Error> {
        let url = format!("{}{}", self.base_url, path);
        debug!("{method} {url}");
        self.auth.authenticate(self.http.request(method, url))
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        self.send(self.request(Method::GET, path)?).await
    }

    pub(crate) async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send(self.request(Method::GET, path)?.query(query))
            .await
    }

    /// POST without a body; parameters travel in the query string.
    pub(crate) async fn post_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send(self.request(Method::POST, path)?.query(query))
            .await
    }

    pub(crate) async fn post<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        self.send(self.request(Method::POST, path)?).await
    }

    pub(crate) async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::POST, path)?.json(body)).await
    }

    pub(crate) async fn post_form<T, F>(&self, path: &str, form: &F) -> Result<T, Error>
    where
        T: DeserializeOwned,
        F: Serialize + ?Sized,
    {
        self.send(self.request(Method::POST, path)?.form(form)).await
    }

    pub(crate) async fn patch_json<T, B>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::PATCH, path)?.json(body))
            .await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        self.execute(self.request(Method::DELETE, path)?).await?;
        Ok(())
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, Error> {
        let body = self.execute(request).await?;
        serde_json::from_str(&body).map_err(|e| {
            warn!("Failed to decode response body: {e}");
            Error::from(e)
        })
    }

    /// Sends the request and returns the body of a 2xx response. Any other
    /// status becomes an error carrying the body.
    async fn execute(&self, request: RequestBuilder) -> Result<String, Error> {
        let response = request.send().await.map_err(|e| {
            warn!("Request failed before a response arrived: {e}");
            Error::from(e)
        })?;

        let status = response.status();
        let url = response.url().clone();
        let body = response.text().await?;

        if status.is_success() {
            trace!("{status} {url}");
            Ok(body)
        } else {
            warn!("{url} responded {status}: {body}");
            Err(Error::status(status.as_u16(), &body))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::*;
    use crate::error::{ErrorKind, HttpErrorKind};
    use mockito::Server;

    #[tokio::test]
    async fn test_non_success_status_carries_detail() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/inputs/goals/missing")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"detail":"Goal not found"}"#)
            .create_async()
            .await;

        let err = client(&server)
            .get::<serde_json::Value>("/inputs/goals/missing")
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert!(err.is_not_found());
        assert_eq!(err.detail(), Some("Goal not found"));
    }

    #[tokio::test]
    async fn test_undecodable_body_is_decode_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/auth/me")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let err = client(&server)
            .get::<entity::users::User>("/auth/me")
            .await
            .unwrap_err();

        assert_eq!(err.error_kind, ErrorKind::Http(HttpErrorKind::Decode));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        // Port 9 (discard) is closed on test machines.
        let unreachable = crate::http::ApiClientBuilder::new("http://127.0.0.1:9/api")
            .with_timeout(std::time::Duration::from_secs(2))
            .build()
            .unwrap();

        let err = unreachable
            .get::<serde_json::Value>("/auth/me")
            .await
            .unwrap_err();

        assert_eq!(err.error_kind, ErrorKind::Http(HttpErrorKind::Network));
    }
}
