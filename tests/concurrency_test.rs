mod common;

use rust_decimal_macros::dec;
use stockroom::errors::ServiceError;

use common::*;

/// Two exit documents compete for the same product with only enough stock
/// for one of them. Whatever the interleaving, exactly one validation may
/// succeed and the on-hand quantity must never go negative: the ledger
/// re-checks sufficiency at the deduction itself, inside the transaction,
/// not only in the validation pre-check.
#[tokio::test]
async fn competing_exit_validations_never_drive_stock_negative() {
    let app = TestApp::new().await;
    let product = seed_product(&app.db, "CON-001", "Ladders", 10, 0, dec!(40.00)).await;

    let first = app
        .documents
        .create_document(exit_document(
            "EXT-2024-201",
            app.actor,
            vec![line(product.id, 7)],
        ))
        .await
        .unwrap();
    let second = app
        .documents
        .create_document(exit_document(
            "EXT-2024-202",
            app.actor,
            vec![line(product.id, 7)],
        ))
        .await
        .unwrap();

    let docs_a = app.documents.clone();
    let docs_b = app.documents.clone();
    let actor = app.actor;
    let task_a = tokio::spawn(async move { docs_a.validate_document(first.id, None, actor).await });
    let task_b =
        tokio::spawn(async move { docs_b.validate_document(second.id, None, actor).await });

    let result_a = task_a.await.unwrap();
    let result_b = task_b.await.unwrap();

    let successes = [&result_a, &result_b]
        .iter()
        .filter(|r| r.is_ok())
        .count();
    assert_eq!(successes, 1, "exactly one of the two validations may pass");

    let failure = if result_a.is_err() {
        result_a.unwrap_err()
    } else {
        result_b.unwrap_err()
    };
    assert!(matches!(
        failure,
        ServiceError::InsufficientStock { available, requested: 7, .. } if available >= 0
    ));

    let product = fetch_product(&app.db, product.id).await;
    assert_eq!(product.quantity, 3);
    assert!(product.quantity >= 0);
}
