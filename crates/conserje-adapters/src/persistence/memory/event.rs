use async_trait::async_trait;
use tracing::info;

use conserje_core::events::DomainEvent;
use conserje_ports::error::PortError;
use conserje_ports::outbound::EventPublisher;

use super::{lock, MemoryStore, StoredEvent};

#[async_trait]
impl EventPublisher for MemoryStore {
    async fn publish(&self, events: Vec<DomainEvent>) -> Result<(), PortError> {
        for event in &events {
            let event_type = event.event_type();
            let payload =
                serde_json::to_string(event).map_err(|e| PortError::Persistence(e.to_string()))?;
            info!(event_type, "domain event");

            lock(&self.inner.events)?.push(StoredEvent {
                event_type: event_type.to_string(),
                payload,
                occurred_at: event.occurred_at(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conserje_core::events::{ExpensePaid, VisitorRegistered};
    use conserje_core::ids::{ExpenseId, UserId, VisitorId};

    fn ts(s: &str) -> chrono::DateTime<chrono::Utc> {
        chrono::DateTime::parse_from_rfc3339(s)
            .unwrap()
            .with_timezone(&chrono::Utc)
    }

    #[tokio::test]
    async fn publish_appends_to_the_log() {
        let store = MemoryStore::new();

        let events = vec![
            DomainEvent::VisitorRegistered(VisitorRegistered {
                visitor_id: VisitorId::new(),
                host_id: UserId::new(),
                occurred_at: ts("2025-01-15T10:00:00Z"),
            }),
            DomainEvent::ExpensePaid(ExpensePaid {
                expense_id: ExpenseId::new(),
                user_id: UserId::new(),
                amount: 85000,
                occurred_at: ts("2025-01-15T10:01:00Z"),
            }),
        ];

        store.publish(events).await.unwrap();

        let log = store.event_log().unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].event_type, "visitor.registered");
        assert_eq!(log[1].event_type, "expense.paid");
        assert!(log[1].payload.contains("85000"));
    }
}
