use crate::domain::event::{Event, EventStatus};
use crate::ledger::{EventStore, LedgerError};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Read model over the event store. Event rows change rarely and are read
/// on every booking and scan, so the full list is cached with a short TTL;
/// status writes go through here and drop the cache so an organizer's
/// toggle is visible on their next read.
#[derive(Clone)]
pub struct EventDirectory {
    store: Arc<dyn EventStore>,
    inner: Arc<RwLock<Option<(std::time::Instant, Vec<Event>)>>>,
    ttl: std::time::Duration,
}

impl EventDirectory {
    pub fn new(store: Arc<dyn EventStore>, ttl: std::time::Duration) -> Self {
        Self { store, inner: Arc::new(RwLock::new(None)), ttl }
    }

    pub async fn all(&self) -> Result<Vec<Event>, LedgerError> {
        {
            let read = self.inner.read().await;
            if let Some((loaded_at, events)) = &*read {
                if loaded_at.elapsed() <= self.ttl {
                    return Ok(events.clone());
                }
            }
        }

        let events = self.store.list().await?;
        let mut write = self.inner.write().await;
        *write = Some((std::time::Instant::now(), events.clone()));
        Ok(events)
    }

    pub async fn get(&self, id: &str) -> Result<Option<Event>, LedgerError> {
        Ok(self.all().await?.into_iter().find(|e| e.id == id))
    }

    pub async fn set_status(&self, id: &str, status: EventStatus) -> Result<Event, LedgerError> {
        let event = self.store.set_status(id, status).await?;
        self.invalidate().await;
        Ok(event)
    }

    pub async fn invalidate(&self) {
        *self.inner.write().await = None;
    }
}
