use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a single stock movement.
///
/// A cancellation of a completed document records the reversal under the
/// inverted direction rather than a negative quantity, so quantities on
/// movement records are always >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementDirection {
    Entry,
    Exit,
}

impl MovementDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementDirection::Entry => "entry",
            MovementDirection::Exit => "exit",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "entry" => Some(MovementDirection::Entry),
            "exit" => Some(MovementDirection::Exit),
            _ => None,
        }
    }

    pub fn inverse(&self) -> Self {
        match self {
            MovementDirection::Entry => MovementDirection::Exit,
            MovementDirection::Exit => MovementDirection::Entry,
        }
    }
}

impl From<super::stock_document::DocumentDirection> for MovementDirection {
    fn from(direction: super::stock_document::DocumentDirection) -> Self {
        match direction {
            super::stock_document::DocumentDirection::Entry => MovementDirection::Entry,
            super::stock_document::DocumentDirection::Exit => MovementDirection::Exit,
        }
    }
}

/// Immutable proof of one quantity change. Appended once per line item per
/// successful ledger application; never updated or deleted.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "movement_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub product_id: Uuid,
    pub document_id: Option<Uuid>,
    pub direction: String, // stored as string, converted through MovementDirection
    pub quantity: i32,
    pub reason: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Model {
    pub fn direction(&self) -> Option<MovementDirection> {
        MovementDirection::from_str(&self.direction)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
    #[sea_orm(
        belongs_to = "super::stock_document::Entity",
        from = "Column::DocumentId",
        to = "super::stock_document::Column::Id"
    )]
    StockDocument,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::stock_document::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockDocument.def()
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C: ConnectionTrait>(self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active_model = self;
        if let ActiveValue::NotSet = active_model.created_at {
            active_model.created_at = Set(Utc::now());
        }
        Ok(active_model)
    }
}
