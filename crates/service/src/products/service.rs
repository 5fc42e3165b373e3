use std::sync::Arc;

use serde::Deserialize;
use tracing::instrument;

use crate::errors::ServiceError;
use crate::products::repository::ProductStore;
use models::product::Model as Product;

/// Product fields as submitted by the client; image fields are filled in from
/// the uploaded file, never from this payload.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub price: f64,
    pub category: String,
}

/// The file part of a multipart submission.
#[derive(Clone, Debug)]
pub struct UploadedImage {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Mediates between transport and the catalog store. The one piece of logic
/// here is enrichment: the uploaded image is attached to the entity before it
/// is handed to the store.
#[derive(Clone)]
pub struct ProductService {
    repo: Arc<dyn ProductStore>,
}

impl ProductService {
    pub fn new(repo: Arc<dyn ProductStore>) -> Self {
        Self { repo }
    }

    fn enrich(input: ProductInput, image: UploadedImage) -> Product {
        Product {
            id: 0,
            name: input.name,
            price: input.price,
            category: input.category,
            image_name: image.name,
            image_type: image.content_type,
            image_data: image.bytes,
        }
    }

    pub async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        self.repo.list().await
    }

    pub async fn get(&self, id: i32) -> Result<Option<Product>, ServiceError> {
        self.repo.get(id).await
    }

    #[instrument(skip(self, input, image), fields(product = %input.name, image = %image.name))]
    pub async fn create(&self, input: ProductInput, image: UploadedImage) -> Result<Product, ServiceError> {
        self.repo.create(Self::enrich(input, image)).await
    }

    pub async fn update(&self, id: i32, input: ProductInput, image: UploadedImage) -> Result<Product, ServiceError> {
        self.repo.update(id, Self::enrich(input, image)).await
    }

    pub async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        self.repo.delete(id).await
    }

    pub async fn search(&self, keyword: &str) -> Result<Vec<Product>, ServiceError> {
        self.repo.search(keyword).await
    }
}
