use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Catalog product. The `quantity` column is mutated exclusively by the
/// stock ledger; catalog management only ever touches the other fields.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub reference: String,
    pub name: String,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub price: Decimal,
    pub quantity: i32,
    pub min_stock: i32,
    pub category_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Model {
    /// True when the on-hand quantity covers the requested amount.
    pub fn has_sufficient_stock(&self, requested: i32) -> bool {
        self.quantity >= requested
    }

    /// True when the on-hand quantity has fallen below the minimum threshold.
    pub fn is_below_min_stock(&self) -> bool {
        self.quantity < self.min_stock
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product_category::Entity",
        from = "Column::CategoryId",
        to = "super::product_category::Column::Id"
    )]
    ProductCategory,
    #[sea_orm(has_many = "super::document_line_item::Entity")]
    DocumentLineItem,
    #[sea_orm(has_many = "super::movement_record::Entity")]
    MovementRecord,
}

impl Related<super::product_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductCategory.def()
    }
}

impl Related<super::document_line_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DocumentLineItem.def()
    }
}

impl Related<super::movement_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MovementRecord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
