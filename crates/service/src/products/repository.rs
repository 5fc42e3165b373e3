use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use tokio::sync::RwLock;

use crate::errors::ServiceError;
use models::product::Model as Product;

/// Trait abstraction for product catalog storage. Unlike jobs and students,
/// ids are assigned by the store on create.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<Product>, ServiceError>;
    /// Persists and returns the product with its assigned id.
    async fn create(&self, product: Product) -> Result<Product, ServiceError>;
    /// Replaces the product with the given id; `NotFound` when absent.
    async fn update(&self, id: i32, product: Product) -> Result<Product, ServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
    /// Case-sensitive substring match on name or category.
    async fn search(&self, keyword: &str) -> Result<Vec<Product>, ServiceError>;
}

struct CatalogInner {
    items: Vec<Product>,
    next_id: i32,
}

/// List-backed catalog with a store-local id sequence.
pub struct InMemoryProductStore {
    inner: RwLock<CatalogInner>,
}

impl InMemoryProductStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self { inner: RwLock::new(CatalogInner { items: Vec::new(), next_id: 1 }) })
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(self.inner.read().await.items.clone())
    }

    async fn get(&self, id: i32) -> Result<Option<Product>, ServiceError> {
        let inner = self.inner.read().await;
        Ok(inner.items.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, mut product: Product) -> Result<Product, ServiceError> {
        let mut inner = self.inner.write().await;
        product.id = inner.next_id;
        inner.next_id += 1;
        inner.items.push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: i32, mut product: Product) -> Result<Product, ServiceError> {
        let mut inner = self.inner.write().await;
        match inner.items.iter_mut().find(|p| p.id == id) {
            Some(slot) => {
                product.id = id;
                *slot = product.clone();
                Ok(product)
            }
            None => Err(ServiceError::not_found("product")),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let mut inner = self.inner.write().await;
        let before = inner.items.len();
        inner.items.retain(|p| p.id != id);
        Ok(inner.items.len() < before)
    }

    async fn search(&self, keyword: &str) -> Result<Vec<Product>, ServiceError> {
        let inner = self.inner.read().await;
        Ok(inner
            .items
            .iter()
            .filter(|p| p.name.contains(keyword) || p.category.contains(keyword))
            .cloned()
            .collect())
    }
}

/// SeaORM-backed catalog delegating to the entity functions in `models`.
pub struct SeaOrmProductStore {
    pub db: DatabaseConnection,
}

#[async_trait]
impl ProductStore for SeaOrmProductStore {
    async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(models::product::list(&self.db).await?)
    }

    async fn get(&self, id: i32) -> Result<Option<Product>, ServiceError> {
        Ok(models::product::get(&self.db, id).await?)
    }

    async fn create(&self, product: Product) -> Result<Product, ServiceError> {
        Ok(models::product::insert(&self.db, &product).await?)
    }

    async fn update(&self, id: i32, product: Product) -> Result<Product, ServiceError> {
        models::product::update(&self.db, id, &product)
            .await?
            .ok_or_else(|| ServiceError::not_found("product"))
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(models::product::delete(&self.db, id).await?)
    }

    async fn search(&self, keyword: &str) -> Result<Vec<Product>, ServiceError> {
        Ok(models::product::search(&self.db, keyword).await?)
    }
}
