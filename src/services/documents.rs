//! Document workflow service: creation, draft edits, the validation state
//! machine, cancellation, the advisory duplicate lookup, and reads.
//!
//! Each `validate`/`cancel` call is one unit of work: the status writes,
//! every ledger adjustment, every movement record, and every history entry
//! commit together or not at all. Domain events go out only after commit.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionError,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::{
    document_line_item::{self, Entity as DocumentLineItem},
    movement_record::MovementDirection,
    stock_document::{self, DocumentDirection, DocumentStatus, Entity as StockDocument},
};
use crate::errors::{is_unique_violation, ServiceError};
use crate::events::{Event, EventSender};
use crate::services::{history, ledger, movements};

/// One product + quantity in a document creation or draft edit.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewLineItem {
    pub product_id: Uuid,
    #[validate(range(min = 1))]
    pub quantity: i32,
    /// Entry lines only: overwrites the product price at validation time.
    pub unit_price: Option<Decimal>,
}

/// Input for creating a stock document. Documents are always created as
/// drafts; stock is only touched by a later `validate_document` call.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewDocument {
    pub direction: DocumentDirection,
    #[validate(length(min = 1, max = 64))]
    pub reference: String,
    pub document_date: NaiveDate,
    /// Supplier for entry documents.
    pub supplier_id: Option<Uuid>,
    /// Free-text destination for exit documents.
    pub destination: Option<String>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
    pub created_by: Uuid,
    #[validate]
    pub lines: Vec<NewLineItem>,
}

/// A committed transition together with the ledger adjustments it caused,
/// kept so signals can be emitted after the transaction is durable.
struct TransitionOutcome {
    document: stock_document::Model,
    adjustments: Vec<ledger::LedgerAdjustment>,
}

/// Service owning the stock document lifecycle.
#[derive(Clone)]
pub struct DocumentService {
    db_pool: Arc<DbPool>,
    event_sender: EventSender,
}

impl DocumentService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Creates a draft document with its line items.
    ///
    /// The unique index on the reference column is the hard duplicate
    /// guard; a rejected insert surfaces as `ConstraintViolation`. Use
    /// `find_duplicates` beforehand for the advisory warning.
    #[instrument(skip(self, input), fields(reference = %input.reference))]
    pub async fn create_document(
        &self,
        input: NewDocument,
    ) -> Result<stock_document::Model, ServiceError> {
        input.validate()?;

        let db = self.db_pool.as_ref();
        let document = db
            .transaction::<_, stock_document::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    let document = stock_document::ActiveModel {
                        id: Set(Uuid::new_v4()),
                        reference: Set(input.reference.clone()),
                        direction: Set(input.direction.as_str().to_string()),
                        document_date: Set(input.document_date),
                        status: Set(DocumentStatus::Draft.as_str().to_string()),
                        supplier_id: Set(input.supplier_id),
                        destination: Set(input.destination.clone()),
                        notes: Set(input.notes.clone()),
                        created_by: Set(input.created_by),
                        created_at: Set(Utc::now()),
                        updated_at: Set(None),
                    };

                    let document = document.insert(txn).await.map_err(|e| {
                        if is_unique_violation(&e) {
                            ServiceError::ConstraintViolation(format!(
                                "A document with reference '{}' already exists",
                                input.reference
                            ))
                        } else {
                            ServiceError::DatabaseError(e)
                        }
                    })?;

                    insert_line_items(txn, document.id, &input.lines).await?;

                    Ok(document)
                })
            })
            .await
            .map_err(unwrap_transaction_error)?;

        info!(
            document_id = %document.id,
            reference = %document.reference,
            direction = %document.direction,
            "Stock document created"
        );
        self.send_event(Event::DocumentCreated(document.id)).await?;

        Ok(document)
    }

    /// Replaces the whole line-item set of a draft. Non-draft documents
    /// have frozen lines and are rejected with `InvalidState`.
    #[instrument(skip(self, lines))]
    pub async fn update_draft_lines(
        &self,
        document_id: Uuid,
        lines: Vec<NewLineItem>,
        actor: Uuid,
    ) -> Result<stock_document::Model, ServiceError> {
        for line in &lines {
            line.validate()?;
        }

        let db = self.db_pool.as_ref();
        let document = self.get_document(document_id).await?;
        let status = document_status(&document)?;
        if status != DocumentStatus::Draft {
            return Err(ServiceError::InvalidState {
                document_id,
                status: document.status.clone(),
                operation: "edited",
            });
        }

        let document = db
            .transaction::<_, stock_document::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    let old_count = DocumentLineItem::find()
                        .filter(document_line_item::Column::DocumentId.eq(document_id))
                        .all(txn)
                        .await?
                        .len();

                    DocumentLineItem::delete_many()
                        .filter(document_line_item::Column::DocumentId.eq(document_id))
                        .exec(txn)
                        .await?;

                    insert_line_items(txn, document_id, &lines).await?;

                    history::record_field_change(
                        txn,
                        document_id,
                        "line_items",
                        Some(format!("{} line(s)", old_count)),
                        format!("{} line(s)", lines.len()),
                        None,
                        actor,
                    )
                    .await?;

                    let mut active: stock_document::ActiveModel = document.into();
                    active.updated_at = Set(Some(Utc::now()));
                    let document = active.update(txn).await?;

                    Ok(document)
                })
            })
            .await
            .map_err(unwrap_transaction_error)?;

        Ok(document)
    }

    /// Runs the validation workflow: draft → pending → completed, applying
    /// every line item to the stock ledger on the way.
    ///
    /// Preconditions are checked before any mutation; the transition itself
    /// is one transaction, so a failure (including an insufficiency
    /// detected at the actual deduction) leaves the document in draft with
    /// no movements and no history.
    #[instrument(skip(self, note))]
    pub async fn validate_document(
        &self,
        document_id: Uuid,
        note: Option<String>,
        actor: Uuid,
    ) -> Result<stock_document::Model, ServiceError> {
        let db = self.db_pool.as_ref();

        let document = self.get_document(document_id).await?;
        let status = document_status(&document)?;
        if status != DocumentStatus::Draft {
            return Err(ServiceError::InvalidState {
                document_id,
                status: document.status.clone(),
                operation: "validated",
            });
        }

        let lines = self.get_document_lines(document_id).await?;
        if lines.is_empty() {
            return Err(ServiceError::EmptyDocument(document_id));
        }

        let today = Utc::now().date_naive();
        if document.document_date > today {
            return Err(ServiceError::FutureDate {
                document_id,
                document_date: document.document_date,
            });
        }

        let direction = document_direction(&document)?;
        if direction == DocumentDirection::Exit {
            for line in &lines {
                ledger::ensure_sufficient_stock(db, line.product_id, line.quantity).await?;
            }
        }

        let reference = document.reference.clone();
        let reason = note.unwrap_or_else(|| format!("Validation of document {}", reference));

        let outcome = db
            .transaction::<_, TransitionOutcome, ServiceError>(move |txn| {
                Box::pin(async move {
                    history::record_transition(
                        txn,
                        document_id,
                        DocumentStatus::Draft,
                        DocumentStatus::Pending,
                        Some(reason.clone()),
                        actor,
                    )
                    .await?;

                    let mut active: stock_document::ActiveModel = document.into();
                    active.status = Set(DocumentStatus::Pending.as_str().to_string());
                    active.updated_at = Set(Some(Utc::now()));
                    let document = active.update(txn).await?;

                    let mut adjustments = Vec::with_capacity(lines.len());
                    for line in &lines {
                        let delta = line.quantity * direction.quantity_sign();
                        let price = match direction {
                            DocumentDirection::Entry => line.unit_price,
                            DocumentDirection::Exit => None,
                        };
                        let adjustment =
                            ledger::adjust_quantity(txn, line.product_id, delta, price).await?;
                        movements::record(
                            txn,
                            line.product_id,
                            Some(document_id),
                            MovementDirection::from(direction),
                            line.quantity,
                            format!("Validation of document {}", document.reference),
                            actor,
                        )
                        .await?;
                        adjustments.push(adjustment);
                    }

                    history::record_transition(
                        txn,
                        document_id,
                        DocumentStatus::Pending,
                        DocumentStatus::Completed,
                        Some(reason),
                        actor,
                    )
                    .await?;

                    let mut active: stock_document::ActiveModel = document.into();
                    active.status = Set(DocumentStatus::Completed.as_str().to_string());
                    active.updated_at = Set(Some(Utc::now()));
                    let document = active.update(txn).await?;

                    Ok(TransitionOutcome {
                        document,
                        adjustments,
                    })
                })
            })
            .await
            .map_err(unwrap_transaction_error)?;

        info!(
            document_id = %document_id,
            reference = %outcome.document.reference,
            lines = outcome.adjustments.len(),
            "Stock document validated"
        );
        self.send_event(Event::DocumentValidated(document_id)).await?;
        self.emit_stock_signals(&outcome.adjustments, MovementDirection::from(direction))
            .await?;

        Ok(outcome.document)
    }

    /// Cancels a document from any non-cancelled status.
    ///
    /// A completed document has already moved stock, so every line item is
    /// reversed through the ledger first, and the reversal is recorded
    /// under the inverted movement direction. Draft and pending documents
    /// never touched stock and only get the status flip plus audit entry.
    #[instrument(skip(self, reason))]
    pub async fn cancel_document(
        &self,
        document_id: Uuid,
        reason: Option<String>,
        actor: Uuid,
    ) -> Result<stock_document::Model, ServiceError> {
        let db = self.db_pool.as_ref();

        let document = self.get_document(document_id).await?;
        let status = document_status(&document)?;
        if status == DocumentStatus::Cancelled {
            return Err(ServiceError::AlreadyCancelled(document_id));
        }

        let direction = document_direction(&document)?;
        let lines = if status == DocumentStatus::Completed {
            self.get_document_lines(document_id).await?
        } else {
            Vec::new()
        };

        let reason = reason.unwrap_or_else(|| "Document cancelled".to_string());

        let outcome = db
            .transaction::<_, TransitionOutcome, ServiceError>(move |txn| {
                Box::pin(async move {
                    let mut adjustments = Vec::with_capacity(lines.len());
                    for line in &lines {
                        let delta = -(line.quantity * direction.quantity_sign());
                        let adjustment =
                            ledger::adjust_quantity(txn, line.product_id, delta, None).await?;
                        movements::record(
                            txn,
                            line.product_id,
                            Some(document_id),
                            MovementDirection::from(direction).inverse(),
                            line.quantity,
                            format!("Cancellation of document {}", document.reference),
                            actor,
                        )
                        .await?;
                        adjustments.push(adjustment);
                    }

                    history::record_transition(
                        txn,
                        document_id,
                        status,
                        DocumentStatus::Cancelled,
                        Some(reason),
                        actor,
                    )
                    .await?;

                    let mut active: stock_document::ActiveModel = document.into();
                    active.status = Set(DocumentStatus::Cancelled.as_str().to_string());
                    active.updated_at = Set(Some(Utc::now()));
                    let document = active.update(txn).await?;

                    Ok(TransitionOutcome {
                        document,
                        adjustments,
                    })
                })
            })
            .await
            .map_err(unwrap_transaction_error)?;

        info!(
            document_id = %document_id,
            reference = %outcome.document.reference,
            reversed_lines = outcome.adjustments.len(),
            "Stock document cancelled"
        );
        self.send_event(Event::DocumentCancelled(document_id)).await?;
        self.emit_stock_signals(
            &outcome.adjustments,
            MovementDirection::from(direction).inverse(),
        )
        .await?;

        Ok(outcome.document)
    }

    /// Advisory duplicate lookup: non-cancelled documents sharing the
    /// reference, excluding the document being edited. Callers warn on a
    /// non-empty result but may proceed; the unique index decides.
    #[instrument(skip(self))]
    pub async fn find_duplicates(
        &self,
        reference: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<Vec<stock_document::Model>, ServiceError> {
        if reference.trim().is_empty() {
            return Ok(Vec::new());
        }

        let db = self.db_pool.as_ref();
        let mut query = StockDocument::find()
            .filter(stock_document::Column::Reference.eq(reference))
            .filter(stock_document::Column::Status.ne(DocumentStatus::Cancelled.as_str()));
        if let Some(id) = exclude_id {
            query = query.filter(stock_document::Column::Id.ne(id));
        }

        let documents = query.all(db).await?;
        Ok(documents)
    }

    /// Fetches a document or fails with `NotFound`.
    pub async fn get_document(
        &self,
        document_id: Uuid,
    ) -> Result<stock_document::Model, ServiceError> {
        let db = self.db_pool.as_ref();
        StockDocument::find_by_id(document_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Document {} not found", document_id)))
    }

    /// Line items of a document in input order.
    pub async fn get_document_lines(
        &self,
        document_id: Uuid,
    ) -> Result<Vec<document_line_item::Model>, ServiceError> {
        let db = self.db_pool.as_ref();
        let lines = DocumentLineItem::find()
            .filter(document_line_item::Column::DocumentId.eq(document_id))
            .order_by_asc(document_line_item::Column::LineNo)
            .all(db)
            .await?;
        Ok(lines)
    }

    /// Audit trail of a document, oldest first.
    pub async fn get_history(
        &self,
        document_id: Uuid,
    ) -> Result<Vec<crate::entities::history_entry::Model>, ServiceError> {
        let db = self.db_pool.as_ref();
        history::history_for_document(db, document_id).await
    }

    async fn send_event(&self, event: Event) -> Result<(), ServiceError> {
        self.event_sender
            .send(event)
            .await
            .map_err(ServiceError::EventError)
    }

    async fn emit_stock_signals(
        &self,
        adjustments: &[ledger::LedgerAdjustment],
        direction: MovementDirection,
    ) -> Result<(), ServiceError> {
        for adjustment in adjustments {
            self.send_event(Event::StockAdjusted {
                product_id: adjustment.product.id,
                old_quantity: adjustment.previous_quantity,
                new_quantity: adjustment.product.quantity,
                direction,
            })
            .await?;
            if adjustment.low_stock {
                self.send_event(Event::LowStock {
                    product_id: adjustment.product.id,
                    quantity: adjustment.product.quantity,
                    min_stock: adjustment.product.min_stock,
                })
                .await?;
            }
        }
        Ok(())
    }
}

async fn insert_line_items<C: sea_orm::ConnectionTrait>(
    txn: &C,
    document_id: Uuid,
    lines: &[NewLineItem],
) -> Result<(), ServiceError> {
    for (index, line) in lines.iter().enumerate() {
        let item = document_line_item::ActiveModel {
            id: Set(Uuid::new_v4()),
            document_id: Set(document_id),
            product_id: Set(line.product_id),
            line_no: Set(index as i32 + 1),
            quantity: Set(line.quantity),
            unit_price: Set(line.unit_price),
            created_at: Set(Utc::now()),
        };
        item.insert(txn).await?;
    }
    Ok(())
}

fn document_status(document: &stock_document::Model) -> Result<DocumentStatus, ServiceError> {
    document.status().ok_or_else(|| {
        ServiceError::InternalError(format!(
            "Document {} has unknown status '{}'",
            document.id, document.status
        ))
    })
}

fn document_direction(document: &stock_document::Model) -> Result<DocumentDirection, ServiceError> {
    document.direction().ok_or_else(|| {
        ServiceError::InternalError(format!(
            "Document {} has unknown direction '{}'",
            document.id, document.direction
        ))
    })
}

fn unwrap_transaction_error(e: TransactionError<ServiceError>) -> ServiceError {
    match e {
        TransactionError::Connection(db_err) => ServiceError::DatabaseError(db_err),
        TransactionError::Transaction(service_err) => service_err,
    }
}
