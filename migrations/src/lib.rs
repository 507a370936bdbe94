pub use sea_orm_migration::prelude::*;

mod m20240115_000001_create_product_categories_table;
mod m20240115_000002_create_suppliers_table;
mod m20240115_000003_create_products_table;
mod m20240115_000004_create_stock_documents_table;
mod m20240115_000005_create_document_line_items_table;
mod m20240115_000006_create_movement_records_table;
mod m20240115_000007_create_history_entries_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240115_000001_create_product_categories_table::Migration),
            Box::new(m20240115_000002_create_suppliers_table::Migration),
            Box::new(m20240115_000003_create_products_table::Migration),
            Box::new(m20240115_000004_create_stock_documents_table::Migration),
            Box::new(m20240115_000005_create_document_line_items_table::Migration),
            Box::new(m20240115_000006_create_movement_records_table::Migration),
            Box::new(m20240115_000007_create_history_entries_table::Migration),
        ]
    }
}
