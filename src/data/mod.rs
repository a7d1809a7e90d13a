//! Customer and order data

mod types;

use reqwest::Client;
use serde_json::Value;

use crate::error::Error;
use crate::fetch::Fetch;

pub use types::*;

/// Client for the `/data` endpoints
#[derive(Debug, Clone)]
pub struct DataClient {
    /// The API base URL
    url: String,

    /// HTTP client used for requests
    client: Client,
}

impl DataClient {
    /// Create a new DataClient
    pub(crate) fn new(url: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            client,
        }
    }

    fn get_url(&self, path: &str) -> String {
        format!("{}/data{}", self.url, path)
    }

    /// List all customers
    pub async fn list_customers(&self) -> Result<Vec<Customer>, Error> {
        Fetch::get(&self.client, &self.get_url("/customers"))
            .execute::<Vec<Customer>>()
            .await
    }

    /// Upload customer records.
    ///
    /// The document is sent as-is; the backend validates it.
    pub async fn import_customers(&self, document: &Value) -> Result<(), Error> {
        Fetch::post(&self.client, &self.get_url("/customers"))
            .json(document)?
            .execute_checked()
            .await?;
        Ok(())
    }

    /// List all orders
    pub async fn list_orders(&self) -> Result<Vec<Order>, Error> {
        Fetch::get(&self.client, &self.get_url("/orders"))
            .execute::<Vec<Order>>()
            .await
    }

    /// Upload order records.
    ///
    /// The document is sent as-is; the backend validates it.
    pub async fn import_orders(&self, document: &Value) -> Result<(), Error> {
        Fetch::post(&self.client, &self.get_url("/orders"))
            .json(document)?
            .execute_checked()
            .await?;
        Ok(())
    }
}
