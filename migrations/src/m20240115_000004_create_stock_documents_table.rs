use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StockDocuments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StockDocuments::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StockDocuments::Reference)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StockDocuments::Direction)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StockDocuments::DocumentDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StockDocuments::Status)
                            .string()
                            .not_null()
                            .default("draft"),
                    )
                    .col(ColumnDef::new(StockDocuments::SupplierId).uuid().null())
                    .col(
                        ColumnDef::new(StockDocuments::Destination)
                            .string()
                            .null(),
                    )
                    .col(ColumnDef::new(StockDocuments::Notes).text().null())
                    .col(
                        ColumnDef::new(StockDocuments::CreatedBy)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StockDocuments::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StockDocuments::UpdatedAt).timestamp().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stock_documents_supplier_id")
                            .from(StockDocuments::Table, StockDocuments::SupplierId)
                            .to(
                                super::m20240115_000002_create_suppliers_table::Suppliers::Table,
                                super::m20240115_000002_create_suppliers_table::Suppliers::Id,
                            )
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // The partial unique index is the authoritative duplicate-reference
        // guard; the advisory lookup in the service layer only warns.
        // Cancelled documents release their reference for reuse, so the
        // index covers live documents only. Same syntax on sqlite and
        // postgres; sea-query has no builder for partial indexes.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_stock_documents_reference_active \
                 ON stock_documents (reference) WHERE status <> 'cancelled'",
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stock_documents_status")
                    .table(StockDocuments::Table)
                    .col(StockDocuments::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StockDocuments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum StockDocuments {
    Table,
    Id,
    Reference,
    Direction,
    DocumentDate,
    Status,
    SupplierId,
    Destination,
    Notes,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
