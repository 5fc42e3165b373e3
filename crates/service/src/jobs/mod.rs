pub mod repository;
pub mod service;

pub use repository::{InMemoryJobStore, JobStore, SeaOrmJobStore};
pub use service::JobService;
