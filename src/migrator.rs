use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_reference_tables::Migration),
            Box::new(m20240101_000002_create_seller_table::Migration),
            Box::new(m20240101_000003_create_sale_table::Migration),
            Box::new(m20240101_000004_create_sale_transaction_table::Migration),
            Box::new(m20240101_000005_create_transaction_log_table::Migration),
        ]
    }
}

/// Identifiers shared by more than one migration.
#[derive(DeriveIden)]
enum Client {
    Table,
    Id,
    Name,
    LastName,
    Mobile,
}

#[derive(DeriveIden)]
enum Product {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Seller {
    Table,
    Id,
    Name,
    LastName,
    EmployeeCode,
}

#[derive(DeriveIden)]
enum Sale {
    Table,
    Id,
    CreationDate,
    Total,
    ClientId,
    SellerId,
}

#[derive(DeriveIden)]
enum SaleTransaction {
    Table,
    Id,
    Quantity,
    UnitPrice,
    Subtotal,
    ProductId,
    SaleId,
}

#[derive(DeriveIden)]
enum TransactionLog {
    Table,
    Id,
    Timestamp,
    OperationType,
    FieldChanged,
    OldValue,
    NewValue,
    ModifiedBy,
    SaleTransactionId,
}

fn id_column<T: IntoIden>(name: T) -> ColumnDef {
    ColumnDef::new(name)
        .big_integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

/// Money amounts. SQLite caps decimal precision at 16 digits.
fn amount_column<T: IntoIden>(manager: &SchemaManager, name: T) -> ColumnDef {
    let mut column = ColumnDef::new(name);
    match manager.get_database_backend() {
        sea_orm::DatabaseBackend::Sqlite => column.decimal_len(16, 2),
        _ => column.decimal_len(21, 2),
    };
    column.not_null().to_owned()
}

mod m20240101_000001_create_reference_tables {
    use super::{id_column, Client, Product};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_reference_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Owned by other systems; only the columns this service projects are kept.
            manager
                .create_table(
                    Table::create()
                        .table(Client::Table)
                        .if_not_exists()
                        .col(&mut id_column(Client::Id))
                        .col(ColumnDef::new(Client::Name).string_len(100).not_null())
                        .col(ColumnDef::new(Client::LastName).string_len(100).null())
                        .col(ColumnDef::new(Client::Mobile).string_len(20).null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Product::Table)
                        .if_not_exists()
                        .col(&mut id_column(Product::Id))
                        .col(ColumnDef::new(Product::Name).string_len(100).not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Product::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Client::Table).to_owned())
                .await
        }
    }
}

mod m20240101_000002_create_seller_table {
    use super::{id_column, Seller};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_seller_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Seller::Table)
                        .if_not_exists()
                        .col(&mut id_column(Seller::Id))
                        .col(ColumnDef::new(Seller::Name).string_len(100).not_null())
                        .col(ColumnDef::new(Seller::LastName).string_len(100).not_null())
                        .col(
                            ColumnDef::new(Seller::EmployeeCode)
                                .string_len(50)
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("ux_seller_employee_code")
                        .table(Seller::Table)
                        .col(Seller::EmployeeCode)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Seller::Table).to_owned())
                .await
        }
    }
}

mod m20240101_000003_create_sale_table {
    use super::{amount_column, id_column, Client, Sale, Seller};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_sale_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Sale::Table)
                        .if_not_exists()
                        .col(&mut id_column(Sale::Id))
                        .col(
                            ColumnDef::new(Sale::CreationDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(&mut amount_column(manager, Sale::Total))
                        .col(ColumnDef::new(Sale::ClientId).big_integer().not_null())
                        .col(ColumnDef::new(Sale::SellerId).big_integer().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sale_client_id")
                                .from(Sale::Table, Sale::ClientId)
                                .to(Client::Table, Client::Id)
                                .on_delete(ForeignKeyAction::NoAction),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sale_seller_id")
                                .from(Sale::Table, Sale::SellerId)
                                .to(Seller::Table, Seller::Id)
                                .on_delete(ForeignKeyAction::NoAction),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_sale_client_id")
                        .table(Sale::Table)
                        .col(Sale::ClientId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_sale_seller_id")
                        .table(Sale::Table)
                        .col(Sale::SellerId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Sale::Table).to_owned())
                .await
        }
    }
}

mod m20240101_000004_create_sale_transaction_table {
    use super::{amount_column, id_column, Product, Sale, SaleTransaction};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_sale_transaction_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(SaleTransaction::Table)
                        .if_not_exists()
                        .col(&mut id_column(SaleTransaction::Id))
                        .col(
                            ColumnDef::new(SaleTransaction::Quantity)
                                .integer()
                                .not_null(),
                        )
                        .col(&mut amount_column(manager, SaleTransaction::UnitPrice))
                        .col(&mut amount_column(manager, SaleTransaction::Subtotal))
                        .col(
                            ColumnDef::new(SaleTransaction::ProductId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SaleTransaction::SaleId)
                                .big_integer()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sale_transaction_product_id")
                                .from(SaleTransaction::Table, SaleTransaction::ProductId)
                                .to(Product::Table, Product::Id)
                                .on_delete(ForeignKeyAction::NoAction),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sale_transaction_sale_id")
                                .from(SaleTransaction::Table, SaleTransaction::SaleId)
                                .to(Sale::Table, Sale::Id)
                                .on_delete(ForeignKeyAction::NoAction),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_sale_transaction_sale_id")
                        .table(SaleTransaction::Table)
                        .col(SaleTransaction::SaleId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(SaleTransaction::Table).to_owned())
                .await
        }
    }
}

mod m20240101_000005_create_transaction_log_table {
    use super::{id_column, SaleTransaction, TransactionLog};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000005_create_transaction_log_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(TransactionLog::Table)
                        .if_not_exists()
                        .col(&mut id_column(TransactionLog::Id))
                        .col(
                            ColumnDef::new(TransactionLog::Timestamp)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TransactionLog::OperationType)
                                .string_len(50)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TransactionLog::FieldChanged)
                                .string_len(100)
                                .not_null(),
                        )
                        .col(ColumnDef::new(TransactionLog::OldValue).string_len(500).null())
                        .col(ColumnDef::new(TransactionLog::NewValue).string_len(500).null())
                        .col(
                            ColumnDef::new(TransactionLog::ModifiedBy)
                                .string_len(100)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TransactionLog::SaleTransactionId)
                                .big_integer()
                                .null(),
                        )
                        // Audit rows outlive the transaction they describe.
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_transaction_log_sale_transaction_id")
                                .from(TransactionLog::Table, TransactionLog::SaleTransactionId)
                                .to(SaleTransaction::Table, SaleTransaction::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_transaction_log_sale_transaction_id")
                        .table(TransactionLog::Table)
                        .col(TransactionLog::SaleTransactionId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(TransactionLog::Table).to_owned())
                .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ConnectOptions, Database};

    #[tokio::test]
    async fn migrations_apply_on_sqlite() {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1).sqlx_logging(false);
        let db = Database::connect(opts).await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let manager = SchemaManager::new(&db);
        for table in ["sale", "sale_transaction", "transaction_log"] {
            assert!(manager.has_table(table).await.unwrap(), "{table}");
        }

        Migrator::down(&db, None).await.unwrap();
        assert!(!manager.has_table("sale").await.unwrap());
    }
}
