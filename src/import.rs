//! Admin-only JSON import of customers and orders

use std::fmt;
use std::path::Path;

use serde_json::Value;

use crate::auth::Auth;
use crate::data::DataClient;
use crate::error::Error;

/// What to import
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    Customers,
    Orders,
}

impl ImportKind {
    fn singular(&self) -> &'static str {
        match self {
            ImportKind::Customers => "customer",
            ImportKind::Orders => "order",
        }
    }
}

impl fmt::Display for ImportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportKind::Customers => f.write_str("customers"),
            ImportKind::Orders => f.write_str("orders"),
        }
    }
}

/// Result of a successful import
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOutcome {
    pub kind: ImportKind,

    /// Number of top-level records in the uploaded document
    pub records: usize,
}

/// Uploads JSON files on behalf of an admin
#[derive(Debug, Clone)]
pub struct Importer {
    auth: Auth,
    data: DataClient,
}

impl Importer {
    pub(crate) fn new(auth: Auth, data: DataClient) -> Self {
        Self { auth, data }
    }

    /// Read `path` as JSON and upload it unchanged.
    ///
    /// Non-admins are refused before the file is read. A file that is not
    /// valid JSON yields [`Error::InvalidImport`] and nothing is sent.
    pub async fn import(&self, kind: ImportKind, path: impl AsRef<Path>) -> Result<ImportOutcome, Error> {
        self.auth
            .require_admin(&format!("import {} data", kind.singular()))?;

        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await?;
        let document = parse_document(&content)?;
        let records = match &document {
            Value::Array(items) => items.len(),
            _ => 1,
        };

        match kind {
            ImportKind::Customers => self.data.import_customers(&document).await?,
            ImportKind::Orders => self.data.import_orders(&document).await?,
        }

        tracing::info!(%kind, records, file = %path.display(), "import uploaded");
        Ok(ImportOutcome { kind, records })
    }
}

fn parse_document(content: &str) -> Result<Value, Error> {
    serde_json::from_str(content).map_err(|e| Error::invalid_import(e.to_string()))
}
