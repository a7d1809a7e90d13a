//! Campaigns

mod types;

use reqwest::Client;

use crate::error::Error;
use crate::fetch::Fetch;

pub use types::*;

/// Client for the `/campaigns` endpoints
#[derive(Debug, Clone)]
pub struct CampaignsClient {
    /// The API base URL
    url: String,

    /// HTTP client used for requests
    client: Client,
}

impl CampaignsClient {
    /// Create a new CampaignsClient
    pub(crate) fn new(url: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            client,
        }
    }

    fn get_url(&self, path: &str) -> String {
        format!("{}/campaigns{}", self.url, path)
    }

    /// List all campaigns
    pub async fn list(&self) -> Result<Vec<Campaign>, Error> {
        Fetch::get(&self.client, &self.get_url(""))
            .execute::<Vec<Campaign>>()
            .await
    }

    /// Create a campaign and start delivering it
    pub async fn send(&self, campaign: &SendCampaign) -> Result<SendReceipt, Error> {
        Fetch::post(&self.client, &self.get_url("/send"))
            .json(campaign)?
            .execute::<SendReceipt>()
            .await
    }
}
