//! Customer segments

mod types;

use reqwest::Client;

use crate::error::Error;
use crate::fetch::Fetch;

pub use types::*;

/// Client for the `/segments` endpoints
#[derive(Debug, Clone)]
pub struct SegmentsClient {
    /// The API base URL
    url: String,

    /// HTTP client used for requests
    client: Client,
}

impl SegmentsClient {
    /// Create a new SegmentsClient
    pub(crate) fn new(url: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            client,
        }
    }

    fn get_url(&self, path: &str) -> String {
        format!("{}/segments{}", self.url, path)
    }

    /// List all segments
    pub async fn list(&self) -> Result<Vec<Segment>, Error> {
        Fetch::get(&self.client, &self.get_url(""))
            .execute::<Vec<Segment>>()
            .await
    }

    /// Get a single segment by ID
    pub async fn get(&self, id: &str) -> Result<Segment, Error> {
        Fetch::get(&self.client, &self.get_url(&format!("/{}", id)))
            .execute::<Segment>()
            .await
    }

    /// Create a segment from a name and a rule set
    pub async fn create(&self, segment: &NewSegment) -> Result<(), Error> {
        Fetch::post(&self.client, &self.get_url("/create"))
            .json(segment)?
            .execute_checked()
            .await?;
        Ok(())
    }
}
