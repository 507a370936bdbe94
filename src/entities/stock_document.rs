use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle states of a stock document.
///
/// `pending` is transient: it is always traversed between `draft` and
/// `completed` so that a crash mid-validation leaves an inspectable
/// intermediate state instead of a `draft` with partial stock effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentStatus {
    Draft,
    Pending,
    Completed,
    Cancelled,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Draft => "draft",
            DocumentStatus::Pending => "pending",
            DocumentStatus::Completed => "completed",
            DocumentStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(DocumentStatus::Draft),
            "pending" => Some(DocumentStatus::Pending),
            "completed" => Some(DocumentStatus::Completed),
            "cancelled" => Some(DocumentStatus::Cancelled),
            _ => None,
        }
    }

    /// The closed transition table. Anything not listed here is rejected
    /// before any mutation happens; `cancelled` is terminal.
    pub fn can_transition(from: DocumentStatus, to: DocumentStatus) -> bool {
        use DocumentStatus::*;
        matches!(
            (from, to),
            (Draft, Pending)
                | (Pending, Completed)
                | (Draft, Cancelled)
                | (Pending, Cancelled)
                | (Completed, Cancelled)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, DocumentStatus::Cancelled)
    }
}

/// Whether a document brings stock in or moves stock out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentDirection {
    Entry,
    Exit,
}

impl DocumentDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentDirection::Entry => "entry",
            DocumentDirection::Exit => "exit",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "entry" => Some(DocumentDirection::Entry),
            "exit" => Some(DocumentDirection::Exit),
            _ => None,
        }
    }

    /// Sign applied to line quantities when the document completes.
    pub fn quantity_sign(&self) -> i32 {
        match self {
            DocumentDirection::Entry => 1,
            DocumentDirection::Exit => -1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_documents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub reference: String,
    pub direction: String, // stored as string, converted through DocumentDirection
    pub document_date: NaiveDate,
    pub status: String, // stored as string, converted through DocumentStatus
    pub supplier_id: Option<Uuid>,
    pub destination: Option<String>,
    pub notes: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Model {
    pub fn status(&self) -> Option<DocumentStatus> {
        DocumentStatus::from_str(&self.status)
    }

    pub fn direction(&self) -> Option<DocumentDirection> {
        DocumentDirection::from_str(&self.direction)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::supplier::Entity",
        from = "Column::SupplierId",
        to = "super::supplier::Column::Id"
    )]
    Supplier,
    #[sea_orm(has_many = "super::document_line_item::Entity")]
    DocumentLineItem,
    #[sea_orm(has_many = "super::history_entry::Entity")]
    HistoryEntry,
    #[sea_orm(has_many = "super::movement_record::Entity")]
    MovementRecord,
}

impl Related<super::supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplier.def()
    }
}

impl Related<super::document_line_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DocumentLineItem.def()
    }
}

impl Related<super::history_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HistoryEntry.def()
    }
}

impl Related<super::movement_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MovementRecord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
