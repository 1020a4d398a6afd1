use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Products: index on type_id for the detach scan and by-type listing
        manager
            .create_index(
                Index::create()
                    .name("idx_product_type_id")
                    .table(Product::Table)
                    .col(Product::TypeId)
                    .to_owned(),
            )
            .await?;

        // ProductTypes: index on name for the name-ordered listing
        manager
            .create_index(
                Index::create()
                    .name("idx_product_type_name")
                    .table(ProductType::Table)
                    .col(ProductType::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_product_type_id").table(Product::Table).to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop().name("idx_product_type_name").table(ProductType::Table).to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Product {
    #[sea_orm(iden = "products")]
    Table,
    TypeId,
}

#[derive(DeriveIden)]
enum ProductType {
    #[sea_orm(iden = "product_types")]
    Table,
    Name,
}
