//! History recorder: the human-readable audit trail of a stock document.
//!
//! One entry per state transition (plus line-set edits on drafts). The
//! trail is purely additive and is never read back by business logic.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::entities::history_entry::{self, Entity as HistoryEntry};
use crate::entities::stock_document::DocumentStatus;
use crate::errors::ServiceError;

const STATUS_FIELD: &str = "status";

/// Appends the audit entry for a status transition.
pub async fn record_transition<C: ConnectionTrait>(
    txn: &C,
    document_id: Uuid,
    from: DocumentStatus,
    to: DocumentStatus,
    reason: Option<String>,
    actor: Uuid,
) -> Result<history_entry::Model, ServiceError> {
    record_field_change(
        txn,
        document_id,
        STATUS_FIELD,
        Some(from.as_str().to_string()),
        to.as_str().to_string(),
        reason,
        actor,
    )
    .await
}

/// Appends an audit entry for an arbitrary field change.
pub async fn record_field_change<C: ConnectionTrait>(
    txn: &C,
    document_id: Uuid,
    field: &str,
    old_value: Option<String>,
    new_value: String,
    reason: Option<String>,
    actor: Uuid,
) -> Result<history_entry::Model, ServiceError> {
    let entry = history_entry::ActiveModel {
        id: Set(Uuid::new_v4()),
        document_id: Set(document_id),
        field: Set(field.to_string()),
        old_value: Set(old_value),
        new_value: Set(new_value),
        reason: Set(reason),
        created_by: Set(actor),
        created_at: Set(Utc::now()),
    };

    let entry = entry.insert(txn).await?;
    Ok(entry)
}

/// Full audit trail of a document, oldest first.
pub async fn history_for_document<C: ConnectionTrait>(
    db: &C,
    document_id: Uuid,
) -> Result<Vec<history_entry::Model>, ServiceError> {
    let entries = HistoryEntry::find()
        .filter(history_entry::Column::DocumentId.eq(document_id))
        .order_by_asc(history_entry::Column::CreatedAt)
        .all(db)
        .await?;
    Ok(entries)
}
