//! HTTP client configuration and builder.

use std::sync::Arc;
use std::time::Duration;

use service::config::Config;
use store::Storage;

use crate::auth::{Authenticator, BearerTokenAuth, NoAuth};
use crate::client::ApiClient;
use crate::error::Error;

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout.
    pub timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("igams/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl From<&Config> for HttpClientConfig {
    fn from(config: &Config) -> Self {
        Self {
            timeout: config.request_timeout(),
            ..Self::default()
        }
    }
}

/// Builder for [`ApiClient`].
///
/// ```rust,ignore
/// let client = ApiClientBuilder::new("http://localhost:8000/api")
///     .with_auth(Box::new(BearerTokenAuth::new(storage)))
///     .with_timeout(Duration::from_secs(10))
///     .build()?;
/// ```
pub struct ApiClientBuilder {
    base_url: String,
    config: HttpClientConfig,
    auth: Option<Box<dyn Authenticator>>,
}

impl ApiClientBuilder {
    /// `base_url` is the API root every path is appended to.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            config: HttpClientConfig::default(),
            auth: None,
        }
    }

    /// Builder preconfigured from the application config, authenticating
    /// with the token held in `storage`.
    pub fn from_config(config: &Config, storage: Arc<dyn Storage>) -> Self {
        Self {
            base_url: config.api_base_url(),
            config: HttpClientConfig::from(config),
            auth: Some(Box::new(BearerTokenAuth::new(storage))),
        }
    }

    pub fn with_auth(mut self, auth: Box<dyn Authenticator>) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.config.user_agent = user_agent;
        self
    }

    pub fn build(self) -> Result<ApiClient, Error> {
        let http = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(self.config.timeout)
            .user_agent(self.config.user_agent)
            .build()?;

        Ok(ApiClient::from_parts(
            http,
            self.base_url.trim_end_matches('/').to_string(),
            self.auth.unwrap_or_else(|| Box::new(NoAuth)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_default() {
        let builder = ApiClientBuilder::new("http://localhost:8000/api");
        assert_eq!(builder.config.timeout, Duration::from_secs(30));
        assert!(builder.config.user_agent.starts_with("igams/"));
        assert!(builder.auth.is_none());
    }

    #[test]
    fn test_builder_with_timeout() {
        let builder =
            ApiClientBuilder::new("http://localhost:8000/api").with_timeout(Duration::from_secs(5));
        assert_eq!(builder.config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_build_trims_trailing_slash() {
        let client = ApiClientBuilder::new("http://localhost:8000/api/")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api");
    }
}
