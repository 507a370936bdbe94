use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DocumentLineItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DocumentLineItems::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DocumentLineItems::DocumentId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DocumentLineItems::ProductId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DocumentLineItems::LineNo)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DocumentLineItems::Quantity)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DocumentLineItems::UnitPrice)
                            .decimal_len(16, 4)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(DocumentLineItems::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_document_line_items_document_id")
                            .from(DocumentLineItems::Table, DocumentLineItems::DocumentId)
                            .to(
                                super::m20240115_000004_create_stock_documents_table::StockDocuments::Table,
                                super::m20240115_000004_create_stock_documents_table::StockDocuments::Id,
                            )
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_document_line_items_product_id")
                            .from(DocumentLineItems::Table, DocumentLineItems::ProductId)
                            .to(
                                super::m20240115_000003_create_products_table::Products::Table,
                                super::m20240115_000003_create_products_table::Products::Id,
                            )
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_document_line_items_document_id")
                    .table(DocumentLineItems::Table)
                    .col(DocumentLineItems::DocumentId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DocumentLineItems::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum DocumentLineItems {
    Table,
    Id,
    DocumentId,
    ProductId,
    LineNo,
    Quantity,
    UnitPrice,
    CreatedAt,
}
