//! Migrator registering one migration per demo table.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_job_post;
mod m20240101_000002_create_student;
mod m20240101_000003_create_product;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_job_post::Migration),
            Box::new(m20240101_000002_create_student::Migration),
            Box::new(m20240101_000003_create_product::Migration),
        ]
    }
}
