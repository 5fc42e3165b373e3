//! Create `job_post` table. Ids are caller-supplied, so no sequence.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(JobPost::Table)
                    .if_not_exists()
                    .col(integer(JobPost::PostId).primary_key())
                    .col(string_len(JobPost::PostProfile, 255).not_null())
                    .col(text(JobPost::PostDesc).not_null())
                    .col(integer(JobPost::ReqExperience).not_null())
                    .col(
                        ColumnDef::new(JobPost::PostTechStack)
                            .array(ColumnType::Text)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(JobPost::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum JobPost { Table, PostId, PostProfile, PostDesc, ReqExperience, PostTechStack }
