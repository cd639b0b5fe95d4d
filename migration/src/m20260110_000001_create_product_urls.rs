use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProductUrls::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProductUrls::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProductUrls::Domain).string().not_null())
                    .col(
                        ColumnDef::new(ProductUrls::Url)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_product_urls_domain")
                    .table(ProductUrls::Table)
                    .col(ProductUrls::Domain)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProductUrls::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ProductUrls {
    Table,
    Id,
    Domain,
    Url,
}
