//! Movement recorder: append-only proof of every quantity change.
//!
//! Records are written in the same transaction as the ledger mutation they
//! describe, so a movement row never exists for stock that was not moved.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::entities::movement_record::{self, Entity as MovementRecord, MovementDirection};
use crate::errors::ServiceError;

/// Appends one movement record. No business validation beyond the required
/// fields; the caller is responsible for having adjusted the ledger first.
pub async fn record<C: ConnectionTrait>(
    txn: &C,
    product_id: Uuid,
    document_id: Option<Uuid>,
    direction: MovementDirection,
    quantity: i32,
    reason: impl Into<String>,
    actor: Uuid,
) -> Result<movement_record::Model, ServiceError> {
    let record = movement_record::ActiveModel {
        id: Set(Uuid::new_v4()),
        product_id: Set(product_id),
        document_id: Set(document_id),
        direction: Set(direction.as_str().to_string()),
        quantity: Set(quantity),
        reason: Set(reason.into()),
        created_by: Set(actor),
        created_at: Set(Utc::now()),
    };

    let record = record.insert(txn).await?;
    Ok(record)
}

/// Movements caused by one document, oldest first.
pub async fn movements_for_document<C: ConnectionTrait>(
    db: &C,
    document_id: Uuid,
) -> Result<Vec<movement_record::Model>, ServiceError> {
    let records = MovementRecord::find()
        .filter(movement_record::Column::DocumentId.eq(document_id))
        .order_by_asc(movement_record::Column::CreatedAt)
        .all(db)
        .await?;
    Ok(records)
}

/// Movements touching one product, oldest first.
pub async fn movements_for_product<C: ConnectionTrait>(
    db: &C,
    product_id: Uuid,
) -> Result<Vec<movement_record::Model>, ServiceError> {
    let records = MovementRecord::find()
        .filter(movement_record::Column::ProductId.eq(product_id))
        .order_by_asc(movement_record::Column::CreatedAt)
        .all(db)
        .await?;
    Ok(records)
}
