use async_trait::async_trait;
use models::Product;
use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;

/// Persistence seam for products.
///
/// "Not found" is expressed as `None` on reads and as a successful no-op on
/// deletes; `Err` is reserved for backend failures.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Product>, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, ServiceError>;
    /// Insert when `product.id` is `None` or unknown, otherwise replace the
    /// stored record entirely. Returns the record as stored.
    async fn save(&self, product: Product) -> Result<Product, ServiceError>;
    async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmProductRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn find_all(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(models::product::find_all(&self.db).await?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, ServiceError> {
        Ok(models::product::find_by_id(&self.db, id).await?)
    }

    async fn save(&self, product: Product) -> Result<Product, ServiceError> {
        Ok(models::product::save(&self.db, product).await?)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
        Ok(models::product::delete_by_id(&self.db, id).await?)
    }
}

/// In-memory repository for tests and for running without a database.
pub mod memory {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    struct Rows {
        by_id: BTreeMap<i64, Product>,
        last_id: i64,
    }

    /// Ids are assigned from a counter that never goes backwards, so a
    /// deleted id is never handed out again.
    #[derive(Default)]
    pub struct InMemoryProductRepository {
        rows: Mutex<Rows>,
    }

    impl InMemoryProductRepository {
        pub fn new() -> Self { Self::default() }

        fn lock(&self) -> Result<MutexGuard<'_, Rows>, ServiceError> {
            self.rows.lock().map_err(|_| ServiceError::Db("in-memory store lock poisoned".into()))
        }
    }

    #[async_trait]
    impl ProductRepository for InMemoryProductRepository {
        async fn find_all(&self) -> Result<Vec<Product>, ServiceError> {
            Ok(self.lock()?.by_id.values().cloned().collect())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Product>, ServiceError> {
            Ok(self.lock()?.by_id.get(&id).cloned())
        }

        async fn save(&self, product: Product) -> Result<Product, ServiceError> {
            let mut rows = self.lock()?;
            let id = match product.id {
                Some(id) if rows.by_id.contains_key(&id) => id,
                _ => {
                    rows.last_id += 1;
                    rows.last_id
                }
            };
            let stored = product.with_id(id);
            rows.by_id.insert(id, stored.clone());
            Ok(stored)
        }

        async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
            self.lock()?.by_id.remove(&id);
            Ok(())
        }
    }
}
