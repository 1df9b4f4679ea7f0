//! # Hot-plug Watcher
//!
//! Periodically re-resolves the selected remote and rescans its interfaces,
//! sending [`HotplugNotice::Watch`] whenever the result changes: an extension
//! plugged in or out, or the whole remote leaving or coming back. A remote
//! that reconnects under a new sysfs node counts as a change.
//!
//! The watcher runs as a task on the caller's runtime and stops once the
//! receiving side is dropped.

use std::path::PathBuf;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

use super::event::HotplugNotice;
use super::wiimote::{InterfaceNode, RemoteLocator};

/// Pending notices kept while the dispatch loop is busy
const NOTICE_QUEUE_DEPTH: usize = 8;

/// What one rescan found; `None` while the remote is absent
type Snapshot = Option<(PathBuf, Vec<InterfaceNode>)>;

/// Spawn a watcher for the remote picked by `locator`
///
/// # Returns
///
/// The notice receiver for the dispatch loop and the watcher task handle.
pub fn spawn_watcher(
    locator: RemoteLocator,
    period: Duration,
) -> (mpsc::Receiver<HotplugNotice>, JoinHandle<()>) {
    let (sender, receiver) = mpsc::channel(NOTICE_QUEUE_DEPTH);
    let handle = tokio::spawn(watch(locator, period, sender));
    (receiver, handle)
}

fn snapshot(locator: &RemoteLocator) -> Snapshot {
    locator.scan().ok()
}

fn interface_count(snapshot: &Snapshot) -> usize {
    snapshot.as_ref().map_or(0, |(_, nodes)| nodes.len())
}

async fn watch(locator: RemoteLocator, period: Duration, sender: mpsc::Sender<HotplugNotice>) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut last = snapshot(&locator);
    debug!("Watching remote {} ({} interfaces)", locator.selector(), interface_count(&last));

    loop {
        ticker.tick().await;
        if sender.is_closed() {
            debug!("Hot-plug receiver dropped, stopping watcher");
            return;
        }

        let current = snapshot(&locator);
        if current == last {
            continue;
        }

        debug!(
            "Remote {} changed ({} -> {} interfaces)",
            locator.selector(),
            interface_count(&last),
            interface_count(&current)
        );
        last = current;

        if sender.send(HotplugNotice::Watch).await.is_err() {
            debug!("Hot-plug receiver dropped, stopping watcher");
            return;
        }
    }
}
