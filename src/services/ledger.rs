//! The stock ledger: the only code path allowed to mutate a product's
//! on-hand quantity.
//!
//! Every mutation runs inside the caller's transaction against a row
//! fetched with an exclusive lock, and the non-negativity check happens
//! at the point of the write, not only at validation time. Two concurrent
//! exit validations against the same product therefore cannot both pass
//! the sufficiency pre-check and drive the quantity negative.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QuerySelect, Set};
use tracing::warn;
use uuid::Uuid;

use crate::entities::product::{self, Entity as Product};
use crate::errors::ServiceError;

/// Result of one ledger mutation, carried back so the caller can emit
/// signals after its transaction commits.
#[derive(Debug, Clone)]
pub struct LedgerAdjustment {
    pub product: product::Model,
    pub previous_quantity: i32,
    pub low_stock: bool,
}

/// Applies a signed quantity delta to a product.
///
/// A positive delta may also carry a new unit price (entry lines declare
/// the price the goods were bought at); price is never touched on a
/// decrease. Fails with `InsufficientStock` when the delta would push the
/// quantity below zero, and with `NotFound` when the product row is gone.
pub async fn adjust_quantity<C: ConnectionTrait>(
    txn: &C,
    product_id: Uuid,
    delta: i32,
    new_unit_price: Option<Decimal>,
) -> Result<LedgerAdjustment, ServiceError> {
    let product = Product::find_by_id(product_id)
        .lock_exclusive()
        .one(txn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", product_id)))?;

    let previous_quantity = product.quantity;
    let new_quantity = previous_quantity + delta;
    if new_quantity < 0 {
        return Err(ServiceError::InsufficientStock {
            product_id: product.id,
            name: product.name.clone(),
            available: previous_quantity,
            requested: -delta,
        });
    }

    let mut active: product::ActiveModel = product.into();
    active.quantity = Set(new_quantity);
    if delta > 0 {
        if let Some(price) = new_unit_price {
            active.price = Set(price);
        }
    }
    active.updated_at = Set(Some(Utc::now()));

    let product = active.update(txn).await?;

    let low_stock = product.is_below_min_stock();
    if low_stock {
        warn!(
            product_id = %product.id,
            reference = %product.reference,
            quantity = %product.quantity,
            min_stock = %product.min_stock,
            "Product quantity fell below minimum stock threshold"
        );
    }

    Ok(LedgerAdjustment {
        product,
        previous_quantity,
        low_stock,
    })
}

/// Pure read: can the product cover the requested quantity right now?
pub async fn has_sufficient_stock<C: ConnectionTrait>(
    db: &C,
    product_id: Uuid,
    requested: i32,
) -> Result<bool, ServiceError> {
    let product = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", product_id)))?;
    Ok(product.has_sufficient_stock(requested))
}

/// Like `has_sufficient_stock`, but produces the caller-facing typed error
/// naming the product and both quantities.
pub async fn ensure_sufficient_stock<C: ConnectionTrait>(
    db: &C,
    product_id: Uuid,
    requested: i32,
) -> Result<(), ServiceError> {
    let product = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", product_id)))?;

    if product.has_sufficient_stock(requested) {
        Ok(())
    } else {
        Err(ServiceError::InsufficientStock {
            product_id: product.id,
            name: product.name.clone(),
            available: product.quantity,
            requested,
        })
    }
}
