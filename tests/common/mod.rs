//! Shared harness for integration tests: an in-memory sqlite database with
//! the real migrations applied, the service graph, and seed helpers.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Set};
use tokio::sync::mpsc;
use uuid::Uuid;

use stockroom::{
    db::{establish_connection_with_config, run_migrations, DbConfig, DbPool},
    entities::{
        product, product_category,
        stock_document::DocumentDirection,
        supplier,
    },
    events::{self, Event},
    services::documents::{DocumentService, NewDocument, NewLineItem},
};

pub struct TestApp {
    pub db: Arc<DbPool>,
    pub documents: DocumentService,
    pub events: mpsc::Receiver<Event>,
    pub actor: Uuid,
}

impl TestApp {
    /// Fresh database and service graph per test. A single pooled
    /// connection keeps the sqlite in-memory database alive and attached.
    pub async fn new() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .try_init();

        let cfg = DbConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            idle_timeout: Duration::from_secs(3600),
            ..Default::default()
        };
        let db = Arc::new(
            establish_connection_with_config(&cfg)
                .await
                .expect("failed to create test database"),
        );
        run_migrations(db.as_ref())
            .await
            .expect("failed to run migrations in tests");

        let (event_sender, events) = events::channel(100);
        let documents = DocumentService::new(db.clone(), event_sender);

        Self {
            db,
            documents,
            events,
            actor: Uuid::new_v4(),
        }
    }

    /// Drains every event emitted so far.
    pub fn drain_events(&mut self) -> Vec<Event> {
        let mut drained = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            drained.push(event);
        }
        drained
    }
}

pub async fn seed_category(db: &DbPool, name: &str) -> product_category::Model {
    product_category::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        description: Set(None),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await
    .expect("failed to seed category")
}

pub async fn seed_supplier(db: &DbPool, name: &str) -> supplier::Model {
    supplier::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        email: Set(None),
        phone: Set(None),
        address: Set(None),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await
    .expect("failed to seed supplier")
}

pub async fn seed_product(
    db: &DbPool,
    reference: &str,
    name: &str,
    quantity: i32,
    min_stock: i32,
    price: Decimal,
) -> product::Model {
    let category = seed_category(db, "General").await;
    product::ActiveModel {
        id: Set(Uuid::new_v4()),
        reference: Set(reference.to_string()),
        name: Set(name.to_string()),
        price: Set(price),
        quantity: Set(quantity),
        min_stock: Set(min_stock),
        category_id: Set(Some(category.id)),
        created_at: Set(Utc::now()),
        updated_at: Set(None),
    }
    .insert(db)
    .await
    .expect("failed to seed product")
}

pub fn line(product_id: Uuid, quantity: i32) -> NewLineItem {
    NewLineItem {
        product_id,
        quantity,
        unit_price: None,
    }
}

pub fn priced_line(product_id: Uuid, quantity: i32, unit_price: Decimal) -> NewLineItem {
    NewLineItem {
        product_id,
        quantity,
        unit_price: Some(unit_price),
    }
}

pub fn entry_document(
    reference: &str,
    supplier_id: Uuid,
    actor: Uuid,
    lines: Vec<NewLineItem>,
) -> NewDocument {
    NewDocument {
        direction: DocumentDirection::Entry,
        reference: reference.to_string(),
        document_date: Utc::now().date_naive(),
        supplier_id: Some(supplier_id),
        destination: None,
        notes: None,
        created_by: actor,
        lines,
    }
}

pub fn exit_document(reference: &str, actor: Uuid, lines: Vec<NewLineItem>) -> NewDocument {
    NewDocument {
        direction: DocumentDirection::Exit,
        reference: reference.to_string(),
        document_date: Utc::now().date_naive(),
        supplier_id: None,
        destination: Some("Workshop B".to_string()),
        notes: None,
        created_by: actor,
        lines,
    }
}

/// Re-reads a product row.
pub async fn fetch_product(db: &DbPool, product_id: Uuid) -> product::Model {
    use sea_orm::EntityTrait;
    product::Entity::find_by_id(product_id)
        .one(db)
        .await
        .expect("failed to fetch product")
        .expect("product not found")
}
