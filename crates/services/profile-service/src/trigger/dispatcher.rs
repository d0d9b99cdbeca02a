//! Delivery of profile-deletion events to their handler.
//!
//! Every event runs in its own task. The dispatcher never looks at what the
//! handler returned: a reaction is complete once the task ends.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use domain::{DeletionOutcome, ProfileDeleted};

/// Reaction to a removed profile document.
#[async_trait]
pub trait ProfileDeletedHandler: Send + Sync {
    async fn on_profile_deleted(&self, event: ProfileDeleted) -> DeletionOutcome;
}

/// Sink for profile-deletion events.
pub trait EventDispatcher: Send + Sync {
    /// Hand off one event. Must not block on the handler.
    fn dispatch(&self, event: ProfileDeleted);
}

/// Dispatcher that spawns one tokio task per event.
pub struct SpawningDispatcher {
    handler: Arc<dyn ProfileDeletedHandler>,
    in_flight: Mutex<Vec<JoinHandle<()>>>,
}

impl SpawningDispatcher {
    pub fn new(handler: Arc<dyn ProfileDeletedHandler>) -> Self {
        Self {
            handler,
            in_flight: Mutex::new(Vec::new()),
        }
    }

    /// Wait for every reaction dispatched so far to finish.
    pub async fn wait_idle(&self) {
        loop {
            let handles: Vec<JoinHandle<()>> = {
                let mut in_flight = self
                    .in_flight
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                std::mem::take(&mut *in_flight)
            };

            if handles.is_empty() {
                return;
            }

            for handle in handles {
                if let Err(e) = handle.await {
                    warn!("Deletion trigger task ended abnormally: {}", e);
                }
            }
        }
    }
}

impl EventDispatcher for SpawningDispatcher {
    fn dispatch(&self, event: ProfileDeleted) {
        let handler = Arc::clone(&self.handler);
        let handle = tokio::spawn(async move {
            let path = event.path();
            let outcome = handler.on_profile_deleted(event).await;
            debug!(path = %path, outcome = %outcome, "Deletion trigger finished");
        });

        let mut in_flight = self
            .in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        in_flight.retain(|h| !h.is_finished());
        in_flight.push(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::UserId;

    #[derive(Default)]
    struct RecordingHandler {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ProfileDeletedHandler for RecordingHandler {
        async fn on_profile_deleted(&self, event: ProfileDeleted) -> DeletionOutcome {
            self.seen.lock().unwrap().push(event.uid.to_string());
            DeletionOutcome::Deleted
        }
    }

    #[tokio::test]
    async fn test_each_event_reaches_handler_once() {
        let handler = Arc::new(RecordingHandler::default());
        let dispatcher = SpawningDispatcher::new(handler.clone());

        for raw in ["u1", "u2", "u3"] {
            dispatcher.dispatch(ProfileDeleted::new(UserId::parse(raw).unwrap()));
        }
        dispatcher.wait_idle().await;

        let mut seen = handler.seen.lock().unwrap().clone();
        seen.sort();
        assert_eq!(seen, vec!["u1", "u2", "u3"]);
    }

    #[tokio::test]
    async fn test_wait_idle_without_events_returns() {
        let dispatcher = SpawningDispatcher::new(Arc::new(RecordingHandler::default()));
        dispatcher.wait_idle().await;
    }
}
