//! Settings page: profile and bulk exports

use std::path::Path;
use std::sync::Arc;

use crate::auth::User;
use crate::export::{ExportKind, ExportOutcome};
use crate::notify::{Notification, Notifier};
use crate::NexCrm;

pub struct SettingsPage {
    client: NexCrm,
    notifier: Arc<dyn Notifier>,
}

impl SettingsPage {
    pub fn new(client: NexCrm, notifier: Arc<dyn Notifier>) -> Self {
        Self { client, notifier }
    }

    /// The signed-in user, as shown in the profile card
    pub fn profile(&self) -> Option<User> {
        self.client.auth().current_user()
    }

    /// Fetch the latest records of `kind` and save them as CSV
    pub async fn export(&self, kind: ExportKind, path: impl AsRef<Path>) -> Option<ExportOutcome> {
        match self.client.exporter().export(kind, path).await {
            Ok(outcome) => {
                self.notifier.notify(
                    Notification::new("Export Successful")
                        .with_description(format!("{} exported successfully.", kind.file_name())),
                );
                Some(outcome)
            }
            Err(e) => {
                tracing::error!(%kind, error = %e, "export failed");
                self.notifier.notify(Notification::from_error(
                    "Export Failed",
                    &format!("Could not export {}. {}", kind.file_name(), e),
                    &e,
                ));
                None
            }
        }
    }
}
