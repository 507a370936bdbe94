//! Stockroom core library
//!
//! Warehouse inventory management core: entry/exit stock documents moving
//! through a draft → pending → completed / cancelled workflow, a quantity
//! ledger that is the only writer of product stock levels, append-only
//! movement records, and an audit history trail.
//!
//! Transport layers (HTTP, gRPC, CLI) are deliberately absent: embedders
//! construct an [`AppState`] and call into [`services::documents::DocumentService`].
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod services;

use sea_orm::DatabaseConnection;
use std::sync::Arc;

pub use errors::ServiceError;
pub use events::{Event, EventSender};

/// Shared application state handed to embedding transport layers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub event_sender: EventSender,
    pub documents: services::documents::DocumentService,
}

impl AppState {
    /// Wires the service graph over an established connection pool.
    pub fn new(
        db: Arc<DatabaseConnection>,
        config: config::AppConfig,
        event_sender: EventSender,
    ) -> Self {
        let documents =
            services::documents::DocumentService::new(db.clone(), event_sender.clone());
        Self {
            db,
            config,
            event_sender,
            documents,
        }
    }
}
