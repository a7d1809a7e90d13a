//! Segments page

use async_trait::async_trait;

use super::{contains_ci, Page, Resource, Searchable};
use crate::error::Error;
use crate::notify::Notification;
use crate::segments::{NewSegment, Segment};
use crate::NexCrm;

impl Searchable for Segment {
    fn matches(&self, term: &str) -> bool {
        contains_ci(&self.name, term)
    }
}

#[async_trait]
impl Resource for Segment {
    const LABEL: &'static str = "segments";
    const TITLE: &'static str = "Segments";

    async fn fetch_all(client: &NexCrm) -> Result<Vec<Self>, Error> {
        client.segments().list().await
    }
}

impl Page<Segment> {
    /// Have the backend turn `prompt` into rules, save them as a new segment
    /// called `name`, then reload.
    pub async fn create_with_ai(&mut self, name: &str, prompt: &str) -> bool {
        match self.create_segment(name, prompt).await {
            Ok(()) => {
                self.notify(Notification::success("Segment created successfully"));
                self.refresh().await;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "segment creation failed");
                self.notify(Notification::from_error(
                    "Error",
                    "Failed to create segment. Please try again.",
                    &e,
                ));
                false
            }
        }
    }

    async fn create_segment(&self, name: &str, prompt: &str) -> Result<(), Error> {
        let rules = self.client.ai().parse_segment(prompt).await?;
        tracing::debug!(%rules, "segment rules parsed");

        let segment = NewSegment {
            name: name.to_string(),
            rules,
        };
        self.client.segments().create(&segment).await
    }
}
