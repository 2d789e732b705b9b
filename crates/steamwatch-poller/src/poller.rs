//! The poll loop.

use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use steamwatch_diff::decide;
use steamwatch_discord::{MessageChannel, NotificationSink};
use steamwatch_state::{HandleUpdate, StateStore};
use steamwatch_steam::StatusSource;

/// Summary of one poll cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Addresses queried.
    pub polled: usize,
    /// Addresses that came back unreachable.
    pub unreachable: usize,
    /// Decisions successfully shown.
    pub notified: usize,
    /// Decisions the sink failed to show.
    pub sink_failures: usize,
}

/// Polls a fixed list of servers and reports their transitions.
///
/// Owns the [`StateStore`]; nothing else mutates it.
pub struct Poller<S, C> {
    source: S,
    sink: NotificationSink<C>,
    addresses: Vec<String>,
    interval: Duration,
    store: StateStore,
}

impl<S, C> Poller<S, C>
where
    S: StatusSource,
    C: MessageChannel,
{
    pub fn new(
        source: S,
        sink: NotificationSink<C>,
        addresses: Vec<String>,
        interval: Duration,
    ) -> Self {
        let store = StateStore::with_addresses(addresses.iter().cloned());
        Self {
            source,
            sink,
            addresses,
            interval,
            store,
        }
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn sink(&self) -> &NotificationSink<C> {
        &self.sink
    }

    /// Run one cycle over every address, in configured order.
    pub async fn poll_once(&mut self) -> CycleReport {
        let mut report = CycleReport::default();
        for i in 0..self.addresses.len() {
            let address = self.addresses[i].clone();
            self.poll_address(&address, &mut report).await;
        }
        debug!(
            polled = report.polled,
            unreachable = report.unreachable,
            notified = report.notified,
            sink_failures = report.sink_failures,
            "poll cycle complete"
        );
        report
    }

    async fn poll_address(&mut self, address: &str, report: &mut CycleReport) {
        let observation = self.source.fetch(address).await;
        report.polled += 1;
        if !observation.is_reachable() {
            report.unreachable += 1;
        }

        let previous = self.store.get(address).clone();
        let decision = decide(&previous, &observation);

        let update = match decision.notification() {
            None => HandleUpdate::Keep,
            Some(n) => {
                info!(
                    %address,
                    kind = decision.kind(),
                    severity = ?n.severity,
                    title = %n.title,
                    "server transition"
                );
                match self.sink.present(&decision, previous.displayed.as_ref()).await {
                    Ok(handle) => {
                        report.notified += 1;
                        HandleUpdate::from(handle)
                    }
                    Err(e) => {
                        report.sink_failures += 1;
                        warn!(%address, error = %e, "failed to present notification");
                        HandleUpdate::Keep
                    }
                }
            }
        };

        if previous.is_unobserved() {
            debug!(%address, reachable = observation.is_reachable(), "baseline recorded");
        }
        self.store.apply(address, observation, update);
    }

    /// Poll immediately, then every `interval`, until `shutdown` turns true
    /// or its sender is dropped.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) {
        info!(
            servers = self.addresses.len(),
            interval = ?self.interval,
            "poller started"
        );

        loop {
            if *shutdown.borrow() {
                break;
            }
            self.poll_once().await;

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = shutdown.wait_for(|stop| *stop) => break,
            }
        }

        info!("poller stopped");
    }
}
