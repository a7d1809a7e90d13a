//! Orders page

use async_trait::async_trait;

use super::{contains_ci, Exportable, Importable, Resource, Searchable};
use crate::data::Order;
use crate::error::Error;
use crate::export::ExportKind;
use crate::import::ImportKind;
use crate::NexCrm;

impl Searchable for Order {
    fn matches(&self, term: &str) -> bool {
        contains_ci(&self.order_id, term)
            || contains_ci(&self.date, term)
            || contains_ci(&self.customer_id_external, term)
    }
}

#[async_trait]
impl Resource for Order {
    const LABEL: &'static str = "orders";
    const TITLE: &'static str = "Orders";

    async fn fetch_all(client: &NexCrm) -> Result<Vec<Self>, Error> {
        client.data().list_orders().await
    }
}

impl Importable for Order {
    const IMPORT: ImportKind = ImportKind::Orders;
}

impl Exportable for Order {
    const EXPORT: ExportKind = ExportKind::Orders;
}
