//! Page controllers
//!
//! A page holds the last successfully fetched collection, a loading flag and
//! a search term. Filtering is recomputed from the live term on every call.
//! Failures are logged and turned into notifications; the previous
//! collection stays in place.

mod campaigns;
mod customers;
mod dashboard;
mod orders;
mod segments;
mod settings;

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Error;
use crate::export::{ExportKind, ExportOutcome};
use crate::import::{ImportKind, ImportOutcome};
use crate::notify::{Notification, Notifier};
use crate::NexCrm;

pub use campaigns::CampaignsPage;
pub use dashboard::{
    month_slots, monthly_revenue, monthly_revenue_in, parse_order_date, parse_order_date_in,
    DashboardPage, DashboardStats, MonthlyRevenue, CHART_MONTHS,
};
pub use settings::SettingsPage;

/// Screens of the admin dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Dashboard,
    Customers,
    Orders,
    Segments,
    Campaigns,
    Settings,
}

impl View {
    /// Screens listed in the navigation, in order
    pub const NAVIGATION: [View; 6] = [
        View::Dashboard,
        View::Customers,
        View::Orders,
        View::Segments,
        View::Campaigns,
        View::Settings,
    ];

    /// Whether the screen needs a signed-in user
    pub fn is_protected(&self) -> bool {
        !matches!(self, View::Login)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            View::Login => "Login",
            View::Dashboard => "Dashboard",
            View::Customers => "Customers",
            View::Orders => "Orders",
            View::Segments => "Segments",
            View::Campaigns => "Campaigns",
            View::Settings => "Settings",
        };
        f.write_str(name)
    }
}

/// Case-insensitive substring test
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Records that can be matched against a search term
pub trait Searchable {
    fn matches(&self, term: &str) -> bool;
}

/// Records a page can load from the backend
#[async_trait]
pub trait Resource: Searchable + Sized + Send + Sync {
    /// Plural noun used in messages, e.g. `customers`
    const LABEL: &'static str;

    /// Capitalized plural noun, e.g. `Customers`
    const TITLE: &'static str;

    async fn fetch_all(client: &NexCrm) -> Result<Vec<Self>, Error>;
}

/// Records that can be uploaded from a JSON file
pub trait Importable: Resource {
    const IMPORT: ImportKind;
}

/// Records that can be saved as CSV
pub trait Exportable: Resource + Serialize {
    const EXPORT: ExportKind;
}

/// View state for one collection
pub struct Page<T> {
    client: NexCrm,
    notifier: Arc<dyn Notifier>,
    items: Vec<T>,
    loading: bool,
    search: String,
}

impl<T> Page<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    fn notify(&self, notification: Notification) {
        self.notifier.notify(notification);
    }
}

impl<T: Resource> Page<T> {
    pub fn new(client: NexCrm, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            notifier,
            items: Vec::new(),
            loading: false,
            search: String::new(),
        }
    }

    /// Load the collection for the first time
    pub async fn mount(&mut self) -> bool {
        self.refresh().await
    }

    /// Replace the collection with a fresh copy from the backend.
    ///
    /// Returns whether the fetch succeeded.
    pub async fn refresh(&mut self) -> bool {
        self.loading = true;
        let result = T::fetch_all(&self.client).await;
        self.loading = false;

        match result {
            Ok(items) => {
                tracing::debug!(label = T::LABEL, count = items.len(), "collection loaded");
                self.items = items;
                true
            }
            Err(e) => {
                tracing::error!(label = T::LABEL, error = %e, "failed to load collection");
                self.notify(Notification::from_error(
                    "Error",
                    &format!("Could not load {}. Please try again later.", T::LABEL),
                    &e,
                ));
                false
            }
        }
    }

    /// Items matching the current search term
    pub fn filtered(&self) -> Vec<&T> {
        self.items
            .iter()
            .filter(|item| item.matches(&self.search))
            .collect()
    }
}

impl<T: Importable> Page<T> {
    /// Upload a JSON file, then reload the collection
    pub async fn import_file(&mut self, path: impl AsRef<Path>) -> Option<ImportOutcome> {
        match self.client.importer().import(T::IMPORT, path).await {
            Ok(outcome) => {
                self.notify(Notification::success(format!(
                    "{} data imported successfully",
                    T::TITLE
                )));
                self.refresh().await;
                Some(outcome)
            }
            Err(e) => {
                tracing::error!(label = T::LABEL, error = %e, "import failed");
                self.notify(Notification::from_error(
                    "Import Failed",
                    &format!("Could not import {} data. {}", T::LABEL, e),
                    &e,
                ));
                None
            }
        }
    }
}

impl<T: Exportable> Page<T> {
    /// Save the loaded collection as CSV
    pub fn export_csv(&self, path: impl AsRef<Path>) -> Option<ExportOutcome> {
        match self
            .client
            .exporter()
            .export_records(T::EXPORT, &self.items, path)
        {
            Ok(outcome) => {
                self.notify(Notification::success(format!(
                    "{} exported successfully.",
                    T::TITLE
                )));
                Some(outcome)
            }
            Err(e) => {
                tracing::error!(label = T::LABEL, error = %e, "export failed");
                self.notify(Notification::from_error(
                    "Export Failed",
                    &format!("Could not export {}. {}", T::LABEL, e),
                    &e,
                ));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_insensitive_contains() {
        assert!(contains_ci("Bob Smith", "bob"));
        assert!(contains_ci("bob smith", "SMITH"));
        assert!(contains_ci("anything", ""));
        assert!(!contains_ci("Alice", "bob"));
    }

    #[test]
    fn login_is_the_only_open_view() {
        assert!(!View::Login.is_protected());
        assert!(View::NAVIGATION.iter().all(View::is_protected));
    }
}
