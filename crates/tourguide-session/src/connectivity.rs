use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use tourguide_core::ports::SyncEndpoint;

pub const ONLINE_MESSAGE: &str = "Connection restored. Back online!";
pub const OFFLINE_MESSAGE: &str = "You are currently offline. Basic information is available.";

/// A payload deferred while offline
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSyncItem {
    pub payload: serde_json::Value,
    pub queued_at: DateTime<Utc>,
}

/// Outcome of one drain of the sync queue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub forwarded: usize,
    pub dropped: usize,
}

/// Online/offline state plus the FIFO of payloads waiting for the network
#[derive(Debug)]
pub struct ConnectivityMonitor {
    online: bool,
    queue: VecDeque<PendingSyncItem>,
}

impl ConnectivityMonitor {
    pub fn new(online: bool) -> Self {
        Self {
            online,
            queue: VecDeque::new(),
        }
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    pub fn pending(&self) -> impl Iterator<Item = &PendingSyncItem> {
        self.queue.iter()
    }

    pub fn pending_len(&self) -> usize {
        self.queue.len()
    }

    /// Queue a payload for the next reconnect
    pub fn enqueue(&mut self, payload: serde_json::Value) {
        self.queue.push_back(PendingSyncItem {
            payload,
            queued_at: Utc::now(),
        });
        tracing::debug!(pending = self.queue.len(), "Queued payload for sync");
    }

    /// Handle an offline signal. Returns the status line, or `None` when
    /// already offline.
    pub fn go_offline(&mut self) -> Option<&'static str> {
        if !self.online {
            return None;
        }

        self.online = false;
        tracing::info!("Connectivity lost, switching to offline knowledge");
        Some(OFFLINE_MESSAGE)
    }

    /// Handle an online signal: flip state and drain the queue.
    ///
    /// Returns `None` when already online; nothing is drained in that case.
    pub async fn go_online(
        &mut self,
        endpoint: &dyn SyncEndpoint,
    ) -> Option<(&'static str, SyncReport)> {
        if self.online {
            return None;
        }

        self.online = true;
        tracing::info!(pending = self.queue.len(), "Connectivity restored");
        let report = self.drain(endpoint).await;
        Some((ONLINE_MESSAGE, report))
    }

    /// Forward every queued item once, oldest first. Failed items are dropped;
    /// the queue is always empty afterwards.
    pub async fn drain(&mut self, endpoint: &dyn SyncEndpoint) -> SyncReport {
        let items = std::mem::take(&mut self.queue);
        let mut report = SyncReport::default();

        for item in items {
            match endpoint.sync(&item.payload).await {
                Ok(()) => report.forwarded += 1,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        queued_at = %item.queued_at,
                        "Dropping queued payload that failed to sync"
                    );
                    report.dropped += 1;
                }
            }
        }

        if report.forwarded + report.dropped > 0 {
            tracing::info!(
                forwarded = report.forwarded,
                dropped = report.dropped,
                "Sync queue drained"
            );
        }
        report
    }
}
