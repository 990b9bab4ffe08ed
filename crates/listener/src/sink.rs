//! Logging sink for order-placed notifications.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::event::OrderPlacedEvent;

/// Single-state observer: it listens, logs preparation start for each
/// incoming order, and performs no persistence, acknowledgement, or
/// retry beyond what the transport guarantees.
#[derive(Default)]
pub struct OrderPlacedSink {
    processed: AtomicU64,
}

impl OrderPlacedSink {
    /// Creates a new sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events this sink has handled.
    pub fn processed(&self) -> u64 {
        self.processed.load(Ordering::Relaxed)
    }

    /// Handles one order-placed notification.
    #[tracing::instrument(skip(self, event), fields(order_id = %event.order_id))]
    pub fn handle(&self, event: &OrderPlacedEvent) {
        tracing::info!(
            restaurant_name = %event.restaurant_name,
            restaurant_id = %event.restaurant_id,
            "received order-placed event"
        );
        tracing::info!(delivery_address = %event.delivery_address, "delivery address");

        tracing::info!(order_id = %event.order_id, "starting preparation");
        for item in &event.order_items {
            tracing::info!(
                menu_item = %item.menu_item_name,
                quantity = item.quantity,
                "preparing item"
            );
        }
        tracing::info!(order_id = %event.order_id, "order preparation started");

        self.processed.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("order_events_processed").increment(1);
    }

    /// Drains the event channel until the sender side closes.
    ///
    /// Runs on its own task, independent of the request-serving path.
    pub async fn run(self: Arc<Self>, mut events: mpsc::Receiver<OrderPlacedEvent>) {
        while let Some(event) = events.recv().await {
            self.handle(&event);
        }
        tracing::info!("order event channel closed, sink stopping");
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use crate::event::OrderItemDetails;

    use super::*;

    fn sample_event() -> OrderPlacedEvent {
        OrderPlacedEvent {
            order_id: "ORD-1001".to_string(),
            user_email: "customer@example.com".to_string(),
            restaurant_id: "7f8d8f2e-95ba-4c95-9e0e-2e9e2a1d2b3c".to_string(),
            restaurant_name: "Test Restaurant".to_string(),
            total_amount: Decimal::new(2740, 2),
            delivery_address: "42 Delivery Ln".to_string(),
            order_date: NaiveDate::from_ymd_opt(2025, 6, 1)
                .unwrap()
                .and_hms_opt(12, 30, 0)
                .unwrap(),
            order_items: vec![OrderItemDetails {
                menu_item_id: "a1b2c3d4-0000-0000-0000-000000000001".to_string(),
                menu_item_name: "Margherita".to_string(),
                quantity: 2,
                price: Decimal::new(1250, 2),
            }],
        }
    }

    #[test]
    fn handle_counts_processed_events() {
        let sink = OrderPlacedSink::new();
        assert_eq!(sink.processed(), 0);

        sink.handle(&sample_event());
        sink.handle(&sample_event());
        assert_eq!(sink.processed(), 2);
    }

    #[tokio::test]
    async fn run_drains_channel_until_closed() {
        let sink = Arc::new(OrderPlacedSink::new());
        let (tx, rx) = mpsc::channel(8);

        let task = tokio::spawn(sink.clone().run(rx));

        tx.send(sample_event()).await.unwrap();
        tx.send(sample_event()).await.unwrap();
        tx.send(sample_event()).await.unwrap();
        drop(tx);

        task.await.unwrap();
        assert_eq!(sink.processed(), 3);
    }
}
