mod common;

use assert_matches::assert_matches;
use rust_decimal_macros::dec;
use sea_orm::TransactionTrait;
use stockroom::errors::ServiceError;
use stockroom::services::ledger;

use common::*;

#[tokio::test]
async fn positive_delta_increases_quantity_and_applies_price() {
    let app = TestApp::new().await;
    let product = seed_product(&app.db, "LED-001", "Dowels", 10, 5, dec!(1.00)).await;

    let txn = app.db.begin().await.unwrap();
    let adjustment = ledger::adjust_quantity(&txn, product.id, 5, Some(dec!(1.25)))
        .await
        .expect("adjust quantity");
    txn.commit().await.unwrap();

    assert_eq!(adjustment.previous_quantity, 10);
    assert_eq!(adjustment.product.quantity, 15);
    assert!(!adjustment.low_stock);

    let product = fetch_product(&app.db, product.id).await;
    assert_eq!(product.quantity, 15);
    assert_eq!(product.price, dec!(1.25));
}

#[tokio::test]
async fn negative_delta_never_touches_the_price() {
    let app = TestApp::new().await;
    let product = seed_product(&app.db, "LED-002", "Clamps", 10, 0, dec!(14.00)).await;

    let txn = app.db.begin().await.unwrap();
    ledger::adjust_quantity(&txn, product.id, -2, Some(dec!(99.99)))
        .await
        .unwrap();
    txn.commit().await.unwrap();

    let product = fetch_product(&app.db, product.id).await;
    assert_eq!(product.quantity, 8);
    assert_eq!(product.price, dec!(14.00));
}

#[tokio::test]
async fn delta_below_zero_is_rejected_with_quantities() {
    let app = TestApp::new().await;
    let product = seed_product(&app.db, "LED-003", "Grinding discs", 3, 0, dec!(2.50)).await;

    let txn = app.db.begin().await.unwrap();
    let err = ledger::adjust_quantity(&txn, product.id, -10, None)
        .await
        .unwrap_err();
    txn.rollback().await.unwrap();

    assert_matches!(
        err,
        ServiceError::InsufficientStock {
            available: 3,
            requested: 10,
            ..
        }
    );
    assert_eq!(fetch_product(&app.db, product.id).await.quantity, 3);
}

#[tokio::test]
async fn adjustment_is_invisible_until_the_transaction_commits() {
    let app = TestApp::new().await;
    let product = seed_product(&app.db, "LED-004", "Wing nuts", 20, 0, dec!(0.30)).await;

    let txn = app.db.begin().await.unwrap();
    ledger::adjust_quantity(&txn, product.id, -5, None)
        .await
        .unwrap();
    txn.rollback().await.unwrap();

    assert_eq!(fetch_product(&app.db, product.id).await.quantity, 20);
}

#[tokio::test]
async fn low_stock_flag_trips_below_the_threshold() {
    let app = TestApp::new().await;
    let product = seed_product(&app.db, "LED-005", "Safety gloves", 10, 5, dec!(3.00)).await;

    let txn = app.db.begin().await.unwrap();
    let adjustment = ledger::adjust_quantity(&txn, product.id, -6, None)
        .await
        .unwrap();
    txn.commit().await.unwrap();
    assert!(adjustment.low_stock);
    assert_eq!(adjustment.product.quantity, 4);

    // exactly at the threshold is not low stock
    let txn = app.db.begin().await.unwrap();
    let adjustment = ledger::adjust_quantity(&txn, product.id, 1, None)
        .await
        .unwrap();
    txn.commit().await.unwrap();
    assert!(!adjustment.low_stock);
    assert_eq!(adjustment.product.quantity, 5);
}

#[tokio::test]
async fn sufficiency_checks_match_the_on_hand_quantity() {
    let app = TestApp::new().await;
    let product = seed_product(&app.db, "LED-006", "Tarpaulin", 7, 0, dec!(11.00)).await;

    assert!(ledger::has_sufficient_stock(app.db.as_ref(), product.id, 7)
        .await
        .unwrap());
    assert!(!ledger::has_sufficient_stock(app.db.as_ref(), product.id, 8)
        .await
        .unwrap());

    assert!(ledger::ensure_sufficient_stock(app.db.as_ref(), product.id, 7)
        .await
        .is_ok());
    let err = ledger::ensure_sufficient_stock(app.db.as_ref(), product.id, 8)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        ServiceError::InsufficientStock {
            available: 7,
            requested: 8,
            ..
        }
    );
}

#[tokio::test]
async fn adjusting_a_missing_product_fails_with_not_found() {
    let app = TestApp::new().await;
    let txn = app.db.begin().await.unwrap();
    let err = ledger::adjust_quantity(&txn, uuid::Uuid::new_v4(), 1, None)
        .await
        .unwrap_err();
    txn.rollback().await.unwrap();
    assert_matches!(err, ServiceError::NotFound(_));
}
