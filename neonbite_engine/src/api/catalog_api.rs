use crate::{
    db_types::Product,
    traits::{CatalogApiError, CatalogManagement},
};

/// Read-only access to the product catalogue.
#[derive(Debug, Clone)]
pub struct CatalogApi<B> {
    db: B,
}

impl<B> CatalogApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> CatalogApi<B>
where B: CatalogManagement
{
    pub async fn products(&self) -> Result<Vec<Product>, CatalogApiError> {
        self.db.fetch_products().await
    }

    pub async fn product(&self, id: i64) -> Result<Option<Product>, CatalogApiError> {
        self.db.fetch_product(id).await
    }
}
