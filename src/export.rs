//! Admin-only CSV export of customers, orders and campaigns

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::auth::Auth;
use crate::campaigns::{Campaign, CampaignsClient};
use crate::data::DataClient;
use crate::error::Error;

/// Columns of `customers.csv`
pub const CUSTOMER_HEADERS: &[&str] = &[
    "_id",
    "customer_id",
    "name",
    "email",
    "phone",
    "total_spend",
    "visits",
    "last_visit",
    "custom_attributes",
];

/// Columns of `orders.csv`
pub const ORDER_HEADERS: &[&str] = &["_id", "order_id", "customer_id_external", "date", "amount"];

/// Columns of `campaigns.csv`
pub const CAMPAIGN_HEADERS: &[&str] = &[
    "campaign_id",
    "segment_name",
    "message_template",
    "audience_size",
    "status_SENT",
    "status_FAILED",
    "status_PENDING",
    "created_at",
    "created_by",
];

/// What to export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Customers,
    Orders,
    Campaigns,
}

impl ExportKind {
    /// Default file name
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportKind::Customers => "customers.csv",
            ExportKind::Orders => "orders.csv",
            ExportKind::Campaigns => "campaigns.csv",
        }
    }

    /// Column order
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            ExportKind::Customers => CUSTOMER_HEADERS,
            ExportKind::Orders => ORDER_HEADERS,
            ExportKind::Campaigns => CAMPAIGN_HEADERS,
        }
    }

    fn singular(&self) -> &'static str {
        match self {
            ExportKind::Customers => "customer",
            ExportKind::Orders => "order",
            ExportKind::Campaigns => "campaign",
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExportKind::Customers => "customers",
            ExportKind::Orders => "orders",
            ExportKind::Campaigns => "campaigns",
        };
        f.write_str(label)
    }
}

/// Result of a successful export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub kind: ExportKind,
    pub path: PathBuf,
    pub rows: usize,
}

/// Writes CSV exports on behalf of an admin
#[derive(Debug, Clone)]
pub struct Exporter {
    auth: Auth,
    data: DataClient,
    campaigns: CampaignsClient,
}

impl Exporter {
    pub(crate) fn new(auth: Auth, data: DataClient, campaigns: CampaignsClient) -> Self {
        Self {
            auth,
            data,
            campaigns,
        }
    }

    fn authorize(&self, kind: ExportKind) -> Result<(), Error> {
        self.auth
            .require_admin(&format!("export {} data", kind.singular()))
    }

    /// Fetch the latest records and write them to `path`.
    ///
    /// Non-admins are refused before any request is made. An empty
    /// collection yields [`Error::NoData`] and no file.
    pub async fn export(&self, kind: ExportKind, path: impl AsRef<Path>) -> Result<ExportOutcome, Error> {
        self.authorize(kind)?;

        match kind {
            ExportKind::Customers => {
                let customers = self.data.list_customers().await?;
                self.write(kind, &customers, path.as_ref())
            }
            ExportKind::Orders => {
                let orders = self.data.list_orders().await?;
                self.write(kind, &orders, path.as_ref())
            }
            ExportKind::Campaigns => {
                let campaigns = self.campaigns.list().await?;
                self.export_campaigns(&campaigns, path)
            }
        }
    }

    /// Write records the caller already holds
    pub fn export_records<T: Serialize>(
        &self,
        kind: ExportKind,
        records: &[T],
        path: impl AsRef<Path>,
    ) -> Result<ExportOutcome, Error> {
        self.authorize(kind)?;
        self.write(kind, records, path.as_ref())
    }

    /// Write campaigns with their status counts flattened
    pub fn export_campaigns(
        &self,
        campaigns: &[Campaign],
        path: impl AsRef<Path>,
    ) -> Result<ExportOutcome, Error> {
        self.authorize(ExportKind::Campaigns)?;
        let rows: Vec<_> = campaigns.iter().map(Campaign::to_export_row).collect();
        self.write(ExportKind::Campaigns, &rows, path.as_ref())
    }

    fn write<T: Serialize>(&self, kind: ExportKind, records: &[T], path: &Path) -> Result<ExportOutcome, Error> {
        if records.is_empty() {
            return Err(Error::no_data(format!("There are no {} to export.", kind)));
        }

        let csv = nexcrm_export::to_csv(kind.headers(), records)?;
        let path = nexcrm_export::save_csv(path, &csv)?;
        tracing::info!(%kind, rows = records.len(), path = %path.display(), "export written");

        Ok(ExportOutcome {
            kind,
            path,
            rows: records.len(),
        })
    }
}
