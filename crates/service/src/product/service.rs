use std::sync::Arc;

use models::Product;
use tracing::instrument;

use crate::aspect::around;
use crate::errors::ServiceError;
use crate::product::repository::ProductRepository;

/// Application service for products.
///
/// Forwards each call to the repository unchanged; this is the seam where
/// product rules would live and where the logging advice is attached.
pub struct ProductService<R: ProductRepository + ?Sized = dyn ProductRepository> {
    repo: Arc<R>,
}

impl<R: ProductRepository + ?Sized> Clone for ProductService<R> {
    fn clone(&self) -> Self { Self { repo: Arc::clone(&self.repo) } }
}

impl<R: ProductRepository + ?Sized> ProductService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn find_all(&self) -> Result<Vec<Product>, ServiceError> {
        around("find_all", self.repo.find_all()).await
    }

    /// `Ok(None)` when no product has this id.
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Product>, ServiceError> {
        around("find_by_id", self.repo.find_by_id(id)).await
    }

    /// Create or fully replace a product.
    ///
    /// # Examples
    /// ```
    /// use service::{InMemoryProductRepository, ProductService};
    /// use models::Product;
    /// use std::sync::Arc;
    /// let svc = ProductService::new(Arc::new(InMemoryProductRepository::new()));
    /// let saved = tokio_test::block_on(svc.save(Product::new("Widget", "", 9.99))).unwrap();
    /// assert_eq!(saved.id, Some(1));
    /// ```
    #[instrument(skip(self, product), fields(product_id = ?product.id))]
    pub async fn save(&self, product: Product) -> Result<Product, ServiceError> {
        around("save", self.repo.save(product)).await
    }

    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
        around("delete_by_id", self.repo.delete_by_id(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::repository::memory::InMemoryProductRepository;
    use crate::product::repository::SeaOrmProductRepository;
    use crate::test_support::get_db;

    fn memory_service() -> ProductService {
        let repo: Arc<dyn ProductRepository> = Arc::new(InMemoryProductRepository::new());
        ProductService::new(repo)
    }

    #[tokio::test]
    async fn find_by_id_reports_absence() -> Result<(), anyhow::Error> {
        let svc = memory_service();
        assert_eq!(svc.find_by_id(1).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn save_then_list() -> Result<(), anyhow::Error> {
        let svc = memory_service();
        let saved = svc.save(Product::new("Widget", "", 9.99)).await?;
        let all = svc.find_all().await?;
        assert_eq!(all, vec![saved]);
        Ok(())
    }

    #[tokio::test]
    async fn clones_share_the_store() -> Result<(), anyhow::Error> {
        let svc = memory_service();
        let other = svc.clone();
        let saved = svc.save(Product::new("Shared", "", 1.0)).await?;
        assert_eq!(other.find_by_id(saved.id.unwrap()).await?, Some(saved));
        Ok(())
    }

    #[tokio::test]
    async fn product_crud_service_on_seaorm() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = ProductService::new(Arc::new(SeaOrmProductRepository::new(db)));

        let a = svc.save(Product::new("Widget", "blue", 9.99)).await?;
        let id = a.id.unwrap();
        assert_eq!(svc.find_by_id(id).await?.unwrap().name, "Widget");

        let updated = svc.save(Product::new("Widget", "red", 10.5).with_id(id)).await?;
        assert_eq!(updated.description, "red");
        assert_eq!(updated.price, 10.5);

        svc.delete_by_id(id).await?;
        svc.delete_by_id(id).await?;
        assert!(svc.find_all().await?.is_empty());
        Ok(())
    }
}
