//! Service layer providing business-oriented CRUD operations on top of models.
//! - One store trait per entity, with in-memory and database-backed implementations.
//! - Pass-through services between transport and stores; the product service is
//!   the only one adding logic (it attaches the uploaded image before persisting).

pub mod errors;
pub mod jobs;
pub mod products;
pub mod students;
