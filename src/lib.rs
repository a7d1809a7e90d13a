//! NexCRM Admin Client
//!
//! A Rust client for the NexCRM backend: session checks, customers, orders,
//! segments, campaigns, AI suggestions, and admin-only CSV export and JSON
//! import. The [`views`] module holds page controllers that keep fetched
//! collections, filter them locally and report outcomes as notifications.

pub mod ai;
pub mod auth;
pub mod campaigns;
pub mod config;
pub mod data;
mod de;
pub mod error;
pub mod export;
pub mod fetch;
pub mod import;
pub mod notify;
pub mod segments;
pub mod views;

use std::sync::Arc;

use reqwest::cookie::Jar;
use reqwest::Client;

use crate::ai::AiClient;
use crate::auth::Auth;
use crate::campaigns::CampaignsClient;
use crate::config::ClientOptions;
use crate::data::DataClient;
use crate::error::Error;
use crate::export::Exporter;
use crate::import::Importer;
use crate::segments::SegmentsClient;

/// The main entry point for the NexCRM admin client
///
/// Cloning is cheap; clones share the HTTP client, its cookie jar and the
/// session.
#[derive(Debug, Clone)]
pub struct NexCrm {
    /// The API base URL, without a trailing slash
    url: String,

    /// HTTP client used for requests
    http_client: Client,

    /// Session and role gate
    auth: Auth,

    /// Client options
    options: ClientOptions,
}

impl NexCrm {
    /// Create a new client for the API at `api_url`
    ///
    /// # Example
    ///
    /// ```
    /// use nexcrm_admin::NexCrm;
    ///
    /// let crm = NexCrm::new("https://nexcrm-service.onrender.com/api").unwrap();
    /// assert!(!crm.auth().is_authenticated());
    /// ```
    pub fn new(api_url: &str) -> Result<Self, Error> {
        Self::new_with_options(ClientOptions::default().with_api_url(api_url))
    }

    /// Create a new client with custom options
    ///
    /// # Example
    ///
    /// ```
    /// use nexcrm_admin::{NexCrm, config::ClientOptions};
    ///
    /// let options = ClientOptions::default()
    ///     .with_api_url("http://localhost:3000/api")
    ///     .with_session_cookie(Some("connect.sid=s%3Aabc".to_string()));
    /// let crm = NexCrm::new_with_options(options).unwrap();
    /// assert_eq!(crm.url(), "http://localhost:3000/api");
    /// ```
    pub fn new_with_options(options: ClientOptions) -> Result<Self, Error> {
        let base = options.validate()?;

        let jar = Arc::new(Jar::default());
        if let Some(cookie) = &options.session_cookie {
            let cookie = if cookie.to_ascii_lowercase().contains("path=") {
                cookie.clone()
            } else {
                format!("{}; Path=/", cookie)
            };
            jar.add_cookie_str(&cookie, &base);
        }

        let mut builder = Client::builder()
            .cookie_provider(jar)
            .user_agent(options.user_agent.clone());
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        let url = options.api_url.trim_end_matches('/').to_string();
        let auth = Auth::new(&url, http_client.clone());

        Ok(Self {
            url,
            http_client,
            auth,
            options,
        })
    }

    /// Create a client configured from the environment
    pub fn from_env() -> Result<Self, Error> {
        Self::new_with_options(ClientOptions::from_env()?)
    }

    /// The API base URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Client options
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Session and role gate
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Customer and order data
    pub fn data(&self) -> DataClient {
        DataClient::new(&self.url, self.http_client.clone())
    }

    /// Segments
    pub fn segments(&self) -> SegmentsClient {
        SegmentsClient::new(&self.url, self.http_client.clone())
    }

    /// Campaigns
    pub fn campaigns(&self) -> CampaignsClient {
        CampaignsClient::new(&self.url, self.http_client.clone())
    }

    /// AI assistance
    pub fn ai(&self) -> AiClient {
        AiClient::new(&self.url, self.http_client.clone())
    }

    /// Admin-only CSV export
    pub fn exporter(&self) -> Exporter {
        Exporter::new(self.auth.clone(), self.data(), self.campaigns())
    }

    /// Admin-only JSON import
    pub fn importer(&self) -> Importer {
        Importer::new(self.auth.clone(), self.data())
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::config::ClientOptions;
    pub use crate::error::Error;
    pub use crate::export::ExportKind;
    pub use crate::import::ImportKind;
    pub use crate::notify::{MemoryNotifier, Notification, Notifier, TracingNotifier};
    pub use crate::views::{CampaignsPage, DashboardPage, Page, SettingsPage, View};
    pub use crate::NexCrm;
}
