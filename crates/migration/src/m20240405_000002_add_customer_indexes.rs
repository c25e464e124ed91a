use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Email and phone are unique across all customers
        manager
            .create_index(
                Index::create()
                    .name("idx_customer_email_unique")
                    .table(Customer::Table)
                    .col(Customer::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_customer_phone_unique")
                    .table(Customer::Table)
                    .col(Customer::Phone)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Listing order
        manager
            .create_index(
                Index::create()
                    .name("idx_customer_created_at")
                    .table(Customer::Table)
                    .col(Customer::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in ["idx_customer_created_at", "idx_customer_phone_unique", "idx_customer_email_unique"] {
            manager
                .drop_index(Index::drop().name(name).table(Customer::Table).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Customer { Table, Email, Phone, CreatedAt }
