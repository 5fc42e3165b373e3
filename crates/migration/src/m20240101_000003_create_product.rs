//! Create `product` table with generated ids and inline image bytes.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Product::Table)
                    .if_not_exists()
                    .col(pk_auto(Product::Id))
                    .col(string_len(Product::Name, 255).not_null())
                    .col(double(Product::Price).not_null())
                    .col(string_len(Product::Category, 128).not_null())
                    .col(string_len(Product::ImageName, 255).not_null())
                    .col(string_len(Product::ImageType, 128).not_null())
                    .col(ColumnDef::new(Product::ImageData).binary().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Product::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Product { Table, Id, Name, Price, Category, ImageName, ImageType, ImageData }
