//! Types for campaigns

use serde::{Deserialize, Serialize};

/// Delivery tally for a campaign
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    #[serde(rename = "SENT", default, deserialize_with = "crate::de::null_as_default")]
    pub sent: u64,

    #[serde(rename = "FAILED", default, deserialize_with = "crate::de::null_as_default")]
    pub failed: u64,

    #[serde(rename = "PENDING", default, deserialize_with = "crate::de::null_as_default")]
    pub pending: u64,
}

/// Overall delivery state of a campaign, for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignHealth {
    /// Some messages have not been delivered yet
    Pending,

    /// Everything finished and at least one message failed
    Failing,

    /// Everything finished and nothing failed
    Delivered,
}

impl StatusCounts {
    /// Pending outranks failures
    pub fn health(&self) -> CampaignHealth {
        if self.pending > 0 {
            CampaignHealth::Pending
        } else if self.failed > 0 {
            CampaignHealth::Failing
        } else {
            CampaignHealth::Delivered
        }
    }
}

/// A campaign as listed by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    /// Campaign ID
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub campaign_id: String,

    /// Name of the targeted segment
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub segment_name: String,

    /// Message sent to each customer
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub message_template: String,

    /// Number of targeted customers
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub audience_size: u64,

    /// Delivery tally
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub status_counts: StatusCounts,

    /// Creation timestamp
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub created_at: String,

    /// Creator
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub created_by: String,
}

impl Campaign {
    /// Flatten into an export row
    pub fn to_export_row(&self) -> CampaignExportRow {
        CampaignExportRow {
            campaign_id: self.campaign_id.clone(),
            segment_name: self.segment_name.clone(),
            message_template: self.message_template.clone(),
            audience_size: self.audience_size,
            status_sent: self.status_counts.sent,
            status_failed: self.status_counts.failed,
            status_pending: self.status_counts.pending,
            created_at: self.created_at.clone(),
            created_by: self.created_by.clone(),
        }
    }
}

/// A campaign with its status counts flattened into columns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignExportRow {
    pub campaign_id: String,
    pub segment_name: String,
    pub message_template: String,
    pub audience_size: u64,
    #[serde(rename = "status_SENT")]
    pub status_sent: u64,
    #[serde(rename = "status_FAILED")]
    pub status_failed: u64,
    #[serde(rename = "status_PENDING")]
    pub status_pending: u64,
    pub created_at: String,
    pub created_by: String,
}

/// Body of `POST /campaigns/send`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SendCampaign {
    /// ID of the targeted segment
    pub segment_id: String,

    /// Message sent to each customer
    pub message_template: String,
}

/// Response of `POST /campaigns/send`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SendReceipt {
    /// Number of customers the campaign was started for
    #[serde(rename = "audienceSize", default, deserialize_with = "crate::de::null_as_default")]
    pub audience_size: u64,
}
