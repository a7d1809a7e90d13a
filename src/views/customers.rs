//! Customers page

use async_trait::async_trait;

use super::{contains_ci, Exportable, Importable, Resource, Searchable};
use crate::data::Customer;
use crate::error::Error;
use crate::export::ExportKind;
use crate::import::ImportKind;
use crate::NexCrm;

impl Searchable for Customer {
    /// Name, email and customer ID ignore case; phone numbers match as typed.
    fn matches(&self, term: &str) -> bool {
        contains_ci(&self.name, term)
            || contains_ci(&self.email, term)
            || self.phone.as_deref().map_or(false, |p| p.contains(term))
            || contains_ci(&self.customer_id, term)
    }
}

#[async_trait]
impl Resource for Customer {
    const LABEL: &'static str = "customers";
    const TITLE: &'static str = "Customers";

    async fn fetch_all(client: &NexCrm) -> Result<Vec<Self>, Error> {
        client.data().list_customers().await
    }
}

impl Importable for Customer {
    const IMPORT: ImportKind = ImportKind::Customers;
}

impl Exportable for Customer {
    const EXPORT: ExportKind = ExportKind::Customers;
}
