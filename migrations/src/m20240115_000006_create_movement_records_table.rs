use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MovementRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MovementRecords::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MovementRecords::ProductId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MovementRecords::DocumentId).uuid().null())
                    .col(
                        ColumnDef::new(MovementRecords::Direction)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MovementRecords::Quantity)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MovementRecords::Reason).string().not_null())
                    .col(
                        ColumnDef::new(MovementRecords::CreatedBy)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MovementRecords::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movement_records_product_id")
                            .from(MovementRecords::Table, MovementRecords::ProductId)
                            .to(
                                super::m20240115_000003_create_products_table::Products::Table,
                                super::m20240115_000003_create_products_table::Products::Id,
                            )
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movement_records_document_id")
                            .from(MovementRecords::Table, MovementRecords::DocumentId)
                            .to(
                                super::m20240115_000004_create_stock_documents_table::StockDocuments::Table,
                                super::m20240115_000004_create_stock_documents_table::StockDocuments::Id,
                            )
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movement_records_product_id")
                    .table(MovementRecords::Table)
                    .col(MovementRecords::ProductId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movement_records_document_id")
                    .table(MovementRecords::Table)
                    .col(MovementRecords::DocumentId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MovementRecords::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum MovementRecords {
    Table,
    Id,
    ProductId,
    DocumentId,
    Direction,
    Quantity,
    Reason,
    CreatedBy,
    CreatedAt,
}
