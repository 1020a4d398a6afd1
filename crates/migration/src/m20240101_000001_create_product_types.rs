//! Create `product_types` table.
//!
//! Root entity for the catalog; `products` references it.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProductType::Table)
                    .if_not_exists()
                    .col(pk_auto(ProductType::Id))
                    .col(string_len(ProductType::Name, 255).not_null())
                    .col(text(ProductType::Description).not_null().default(""))
                    .col(timestamp_with_time_zone(ProductType::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(ProductType::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ProductType::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ProductType {
    #[sea_orm(iden = "product_types")]
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
    UpdatedAt,
}
