use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::entities::movement_record::MovementDirection;

/// Signals emitted by the core after a unit of work commits. They are
/// advisory: nothing in the core depends on a consumer draining them, and
/// they are never sent for work that rolled back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    DocumentCreated(Uuid),
    DocumentValidated(Uuid),
    DocumentCancelled(Uuid),
    StockAdjusted {
        product_id: Uuid,
        old_quantity: i32,
        new_quantity: i32,
        direction: MovementDirection,
    },
    LowStock {
        product_id: Uuid,
        quantity: i32,
        min_stock: i32,
    },
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously.
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

/// Builds an event channel pair with the given capacity.
pub fn channel(capacity: usize) -> (EventSender, mpsc::Receiver<Event>) {
    let (tx, rx) = mpsc::channel(capacity);
    (EventSender::new(tx), rx)
}
