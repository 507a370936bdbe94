mod common;

use assert_matches::assert_matches;
use rust_decimal_macros::dec;
use stockroom::errors::ServiceError;

use common::*;

#[tokio::test]
async fn detector_returns_only_non_cancelled_documents() {
    let app = TestApp::new().await;
    let product = seed_product(&app.db, "DUP-001", "Rope", 50, 0, dec!(2.00)).await;

    let first = app
        .documents
        .create_document(exit_document("REF-1", app.actor, vec![line(product.id, 1)]))
        .await
        .unwrap();
    app.documents
        .cancel_document(first.id, None, app.actor)
        .await
        .unwrap();

    // the cancelled document released its reference
    let second = app
        .documents
        .create_document(exit_document("REF-1", app.actor, vec![line(product.id, 2)]))
        .await
        .expect("reference reusable after cancellation");

    let duplicates = app.documents.find_duplicates("REF-1", None).await.unwrap();
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0].id, second.id);
}

#[tokio::test]
async fn detector_excludes_the_document_being_edited() {
    let app = TestApp::new().await;
    let product = seed_product(&app.db, "DUP-002", "Chain", 50, 0, dec!(5.00)).await;

    let doc = app
        .documents
        .create_document(exit_document("REF-2", app.actor, vec![line(product.id, 1)]))
        .await
        .unwrap();

    let duplicates = app
        .documents
        .find_duplicates("REF-2", Some(doc.id))
        .await
        .unwrap();
    assert!(duplicates.is_empty());

    let duplicates = app.documents.find_duplicates("REF-2", None).await.unwrap();
    assert_eq!(duplicates.len(), 1);
}

#[tokio::test]
async fn empty_reference_yields_no_duplicates() {
    let app = TestApp::new().await;
    assert!(app
        .documents
        .find_duplicates("", None)
        .await
        .unwrap()
        .is_empty());
    assert!(app
        .documents
        .find_duplicates("   ", None)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn unique_index_rejects_a_second_live_document_with_the_same_reference() {
    let app = TestApp::new().await;
    let product = seed_product(&app.db, "DUP-003", "Canvas", 50, 0, dec!(9.00)).await;

    app.documents
        .create_document(exit_document("REF-3", app.actor, vec![line(product.id, 1)]))
        .await
        .unwrap();

    // the advisory detector would have warned, but creation is attempted
    // anyway; the persistence layer is the hard guarantee
    let err = app
        .documents
        .create_document(exit_document("REF-3", app.actor, vec![line(product.id, 2)]))
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ConstraintViolation(_));
    assert!(err.to_string().contains("REF-3"));

    // the failed creation left no document or line items behind
    let duplicates = app.documents.find_duplicates("REF-3", None).await.unwrap();
    assert_eq!(duplicates.len(), 1);
}
