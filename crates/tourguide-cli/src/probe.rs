//! Periodic reachability check of the guide endpoint

use std::time::Duration;
use tokio::task::JoinHandle;
use tourguide_core::{AppEvent, EventSender};
use tourguide_remote::HttpGuideClient;

/// Poll `GET /health` every `interval` and post a connectivity signal
/// whenever reachability changes.
///
/// `assume_online` is the state the session started in; the first probe only
/// posts a signal if it disagrees.
pub fn spawn_probe(
    client: HttpGuideClient,
    interval: Duration,
    assume_online: bool,
    events: EventSender,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        let mut online = assume_online;

        loop {
            ticker.tick().await;
            let reachable = client.is_reachable().await;
            if reachable == online {
                continue;
            }

            online = reachable;
            tracing::info!(online, endpoint = client.base_url(), "Endpoint reachability changed");
            if events.send(AppEvent::Connectivity { online }).is_err() {
                break;
            }
        }
    })
}
