//! Configuration options for the NexCRM admin client

use std::time::Duration;

use url::Url;

use crate::error::Error;

/// Base URL of the hosted NexCRM API
pub const DEFAULT_API_URL: &str = "https://nexcrm-service.onrender.com/api";

/// Configuration options for the NexCRM admin client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Base URL every endpoint is resolved against, without a trailing slash
    pub api_url: String,

    /// Session cookie (`name=value`) to present before the backend sets one
    pub session_cookie: Option<String>,

    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// Value of the `User-Agent` header
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_cookie: None,
            request_timeout: Some(Duration::from_secs(30)),
            user_agent: format!("nexcrm-admin/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientOptions {
    /// Set the API base URL
    pub fn with_api_url(mut self, value: &str) -> Self {
        self.api_url = value.trim_end_matches('/').to_string();
        self
    }

    /// Set the session cookie
    pub fn with_session_cookie(mut self, value: Option<String>) -> Self {
        self.session_cookie = value.filter(|c| !c.trim().is_empty());
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Build options from the environment.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    /// Reads `NEXCRM_API_URL`, `NEXCRM_SESSION_COOKIE` and
    /// `NEXCRM_TIMEOUT_SECS`; unset variables keep their defaults.
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        let mut options = Self::default();
        if let Ok(url) = std::env::var("NEXCRM_API_URL") {
            options = options.with_api_url(&url);
        }
        if let Ok(cookie) = std::env::var("NEXCRM_SESSION_COOKIE") {
            options = options.with_session_cookie(Some(cookie));
        }
        if let Ok(secs) = std::env::var("NEXCRM_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .map_err(|_| Error::config(format!("NEXCRM_TIMEOUT_SECS is not a number: {}", secs)))?;
            options = options.with_request_timeout(Some(Duration::from_secs(secs)));
        }

        options.validate()?;
        Ok(options)
    }

    /// Check that the API URL is usable
    pub fn validate(&self) -> Result<Url, Error> {
        let url = Url::parse(&self.api_url)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(Error::config(format!("unsupported URL scheme: {}", other))),
        }
    }
}
