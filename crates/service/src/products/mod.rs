pub mod repository;
pub mod service;

pub use repository::{InMemoryProductStore, ProductStore, SeaOrmProductStore};
pub use service::{ProductInput, ProductService, UploadedImage};
