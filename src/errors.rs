use chrono::NaiveDate;
use sea_orm::error::DbErr;
use uuid::Uuid;

/// Error taxonomy of the stock core.
///
/// Every failure is detected synchronously and surfaces as one of these
/// variants; any failure inside a document transition rolls the whole
/// transaction back, so callers never observe a document whose status
/// disagrees with its recorded movements or history.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Document {document_id} cannot be {operation} while in status '{status}'")]
    InvalidState {
        document_id: Uuid,
        status: String,
        operation: &'static str,
    },

    #[error("Document {0} has no line items")]
    EmptyDocument(Uuid),

    #[error("Document {document_id} is dated in the future ({document_date})")]
    FutureDate {
        document_id: Uuid,
        document_date: NaiveDate,
    },

    #[error(
        "Insufficient stock for product '{name}': available {available}, requested {requested}"
    )]
    InsufficientStock {
        product_id: Uuid,
        name: String,
        available: i32,
        requested: i32,
    },

    #[error("Document {0} is already cancelled")]
    AlreadyCancelled(Uuid),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Event error: {0}")]
    EventError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

pub trait IntoDbErr {
    fn into_db_err(self) -> DbErr;
}

impl IntoDbErr for DbErr {
    fn into_db_err(self) -> DbErr {
        self
    }
}

impl IntoDbErr for String {
    fn into_db_err(self) -> DbErr {
        DbErr::Custom(self)
    }
}

impl IntoDbErr for &str {
    fn into_db_err(self) -> DbErr {
        DbErr::Custom(self.to_string())
    }
}

impl ServiceError {
    /// Generic constructor that normalizes any supported database error input.
    pub fn db_error<E: IntoDbErr>(error: E) -> Self {
        ServiceError::DatabaseError(error.into_db_err())
    }

    /// Message suitable for caller-facing surfaces. Internal errors return a
    /// generic message instead of leaking driver details.
    pub fn client_message(&self) -> String {
        match self {
            Self::DatabaseError(_) => "Database error".to_string(),
            Self::EventError(_) | Self::InternalError(_) => "Internal error".to_string(),
            _ => self.to_string(),
        }
    }
}

/// True when the driver rejected a write because of a unique index, which
/// is how a duplicate document reference surfaces from the store. The text
/// matching covers the sqlite and postgres drivers.
pub fn is_unique_violation(err: &DbErr) -> bool {
    let message = err.to_string();
    message.contains("UNIQUE constraint failed") || message.contains("duplicate key value")
}
