use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HistoryEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HistoryEntries::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HistoryEntries::DocumentId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(HistoryEntries::Field).string().not_null())
                    .col(ColumnDef::new(HistoryEntries::OldValue).string().null())
                    .col(ColumnDef::new(HistoryEntries::NewValue).string().not_null())
                    .col(ColumnDef::new(HistoryEntries::Reason).text().null())
                    .col(
                        ColumnDef::new(HistoryEntries::CreatedBy)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HistoryEntries::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_history_entries_document_id")
                            .from(HistoryEntries::Table, HistoryEntries::DocumentId)
                            .to(
                                super::m20240115_000004_create_stock_documents_table::StockDocuments::Table,
                                super::m20240115_000004_create_stock_documents_table::StockDocuments::Id,
                            )
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_history_entries_document_id")
                    .table(HistoryEntries::Table)
                    .col(HistoryEntries::DocumentId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HistoryEntries::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum HistoryEntries {
    Table,
    Id,
    DocumentId,
    Field,
    OldValue,
    NewValue,
    Reason,
    CreatedBy,
    CreatedAt,
}
