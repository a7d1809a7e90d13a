//! Campaigns page

use std::sync::Arc;

use async_trait::async_trait;

use super::{contains_ci, Page, Resource, Searchable};
use crate::ai::{MessageSuggestionRequest, Suggestions};
use crate::campaigns::{Campaign, SendCampaign, SendReceipt};
use crate::error::Error;
use crate::notify::{Notification, Notifier};
use crate::segments::Segment;
use crate::NexCrm;

impl Searchable for Campaign {
    fn matches(&self, term: &str) -> bool {
        contains_ci(&self.segment_name, term)
    }
}

#[async_trait]
impl Resource for Campaign {
    const LABEL: &'static str = "campaigns";
    const TITLE: &'static str = "Campaigns";

    async fn fetch_all(client: &NexCrm) -> Result<Vec<Self>, Error> {
        client.campaigns().list().await
    }
}

/// Campaign list plus the segments a new campaign can target
pub struct CampaignsPage {
    campaigns: Page<Campaign>,
    segments: Vec<Segment>,
}

impl CampaignsPage {
    pub fn new(client: NexCrm, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            campaigns: Page::new(client, notifier),
            segments: Vec::new(),
        }
    }

    pub fn campaigns(&self) -> &Page<Campaign> {
        &self.campaigns
    }

    pub fn campaigns_mut(&mut self) -> &mut Page<Campaign> {
        &mut self.campaigns
    }

    /// Segments available for targeting
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Load campaigns and segments
    pub async fn mount(&mut self) -> bool {
        let loaded = self.campaigns.mount().await;
        self.load_segments().await;
        loaded
    }

    /// Segment failures are only logged; the campaign list is what matters
    async fn load_segments(&mut self) {
        match self.campaigns.client.segments().list().await {
            Ok(segments) => self.segments = segments,
            Err(e) => tracing::error!(error = %e, "failed to load segments"),
        }
    }

    /// Start a campaign for a segment, then reload the list
    pub async fn create(&mut self, segment_id: &str, message_template: &str) -> Option<SendReceipt> {
        let request = SendCampaign {
            segment_id: segment_id.to_string(),
            message_template: message_template.to_string(),
        };

        match self.campaigns.client.campaigns().send(&request).await {
            Ok(receipt) => {
                self.campaigns.notify(Notification::success(format!(
                    "Campaign started for {} customers",
                    receipt.audience_size
                )));
                self.campaigns.refresh().await;
                Some(receipt)
            }
            Err(e) => {
                tracing::error!(error = %e, "campaign creation failed");
                self.campaigns.notify(Notification::from_error(
                    "Error",
                    "Failed to create campaign. Please try again.",
                    &e,
                ));
                None
            }
        }
    }

    /// Ask the backend for message templates suited to a segment.
    ///
    /// Does nothing when no segment is selected.
    pub async fn message_suggestions(&self, segment_id: &str) -> Suggestions {
        if segment_id.is_empty() {
            return Suggestions::default();
        }

        match self.fetch_suggestions(segment_id).await {
            Ok(suggestions) => suggestions,
            Err(e) => {
                tracing::error!(error = %e, "message suggestions failed");
                self.campaigns.notify(Notification::from_error(
                    "Error",
                    "Failed to get message suggestions. Please try again.",
                    &e,
                ));
                Suggestions::default()
            }
        }
    }

    async fn fetch_suggestions(&self, segment_id: &str) -> Result<Suggestions, Error> {
        let client = &self.campaigns.client;
        let segment = client.segments().get(segment_id).await?;

        let name = self
            .segments
            .iter()
            .find(|s| s.id == segment_id)
            .map(|s| s.name.as_str())
            .unwrap_or(segment.name.as_str());

        client
            .ai()
            .message_suggestions(&MessageSuggestionRequest::for_segment(name))
            .await
    }
}
