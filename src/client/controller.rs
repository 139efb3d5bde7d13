//! Timed polling of the radar API into watchable view state.
//!
//! Every timer is a [`ScheduledTask`] owned by the [`DashboardController`];
//! dropping the controller aborts them all. Each view publishes its state
//! through a `watch` channel so readers always see the latest snapshot.

use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{interval, MissedTickBehavior};

use super::fallback::static_opportunities;
use super::feed::{AlertFeed, FeedItem};
use super::watchlist::Watchlist;
use super::RadarClient;
use crate::api::types::{RecentAlertsResponse, WalletEventsResponse};
use crate::config::ClientConfig;
use crate::models::{MirrorOpportunity, NetworkStatus, Timeframe, WalletAnalysis};

/// Leaderboard size the dashboard asks for.
const OPPORTUNITY_LIMIT: usize = 10;

/// Events page fetched for each followed wallet.
const WALLET_EVENTS_LIMIT: usize = 50;

// ---------------------------------------------------------------------------
// Scheduled tasks
// ---------------------------------------------------------------------------

/// A spawned background loop that is aborted when dropped.
#[derive(Debug)]
pub struct ScheduledTask {
    name: String,
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    pub fn spawn<F>(name: impl Into<String>, fut: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let name = name.into();
        tracing::debug!(task = %name, "Scheduled task started");
        Self {
            name,
            handle: tokio::spawn(fut),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Abort the task now rather than at end of scope.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.handle.abort();
        tracing::debug!(task = %self.name, "Scheduled task cancelled");
    }
}

/// Interval that never fires faster than once a second and skips ticks it
/// missed instead of bursting.
fn poll_interval(period: Duration) -> tokio::time::Interval {
    let mut ticker = interval(period.max(Duration::from_secs(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}

// ---------------------------------------------------------------------------
// In-flight registry
// ---------------------------------------------------------------------------

/// Request keys (route plus params) with a fetch currently outstanding.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    keys: Arc<Mutex<HashSet<String>>>,
}

impl InFlight {
    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        // the set stays consistent even if a holder panicked
        self.keys.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Claim `key`, or `None` when a request for it is already running.
    pub fn try_begin(&self, key: &str) -> Option<InFlightGuard> {
        if !self.lock().insert(key.to_string()) {
            return None;
        }
        Some(InFlightGuard {
            keys: self.keys.clone(),
            key: key.to_string(),
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains(key)
    }
}

/// Releases its key when the request finishes or is aborted.
#[derive(Debug)]
pub struct InFlightGuard {
    keys: Arc<Mutex<HashSet<String>>>,
    key: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut keys = self.keys.lock().unwrap_or_else(|e| e.into_inner());
        keys.remove(&self.key);
    }
}

// ---------------------------------------------------------------------------
// View state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<T> {
    pub data: Option<T>,
    pub connected: bool,
    /// Set while `data` is the static fallback rather than a server answer.
    pub is_fallback: bool,
    pub last_updated: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            data: None,
            connected: false,
            is_fallback: false,
            last_updated: None,
            last_error: None,
        }
    }
}

impl<T> ViewState<T> {
    fn succeeded(&mut self, data: T) {
        *self = Self {
            data: Some(data),
            connected: true,
            is_fallback: false,
            last_updated: Some(Utc::now()),
            last_error: None,
        };
    }

    /// Keep whatever was shown last; only fill in `fallback` if nothing was.
    fn failed(&mut self, error: String, fallback: Option<&T>)
    where
        T: Clone,
    {
        self.connected = false;
        self.last_error = Some(error);
        if self.data.is_none() {
            if let Some(fallback) = fallback {
                self.data = Some(fallback.clone());
                self.is_fallback = true;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Pollers
// ---------------------------------------------------------------------------

/// Poll `fetch` every `period` into a watch channel.
///
/// Fetches run concurrently with the timer. A tick whose `key` is still in
/// flight in `registry` is skipped rather than stacked. Failures are logged
/// and flip `connected` off; there are no retries beyond the next tick.
pub fn spawn_poller<T, E, F, Fut>(
    key: String,
    period: Duration,
    registry: InFlight,
    fetch: F,
    fallback: Option<T>,
) -> (ScheduledTask, watch::Receiver<ViewState<T>>)
where
    T: Clone + Send + Sync + 'static,
    E: Display + Send + 'static,
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    let (tx, rx) = watch::channel(ViewState::default());
    let name = key.clone();

    let task = ScheduledTask::spawn(name, async move {
        let mut ticker = poll_interval(period);
        let mut in_flight = JoinSet::new();

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let Some(guard) = registry.try_begin(&key) else {
                        tracing::debug!(key = %key, "Poll skipped, previous request still in flight");
                        metrics::counter!("client_poll_skipped_total", "view" => key.clone()).increment(1);
                        continue;
                    };
                    let request = fetch();
                    in_flight.spawn(async move {
                        let _guard = guard;
                        request.await
                    });
                }
                Some(joined) = in_flight.join_next() => {
                    let outcome = match joined {
                        Ok(Ok(data)) => Ok(data),
                        Ok(Err(e)) => Err(e.to_string()),
                        Err(e) => Err(format!("poll task failed: {e}")),
                    };
                    match outcome {
                        Ok(data) => tx.send_modify(|state| state.succeeded(data)),
                        Err(error) => {
                            tracing::warn!(key = %key, error = %error, "Poll failed");
                            metrics::counter!("client_poll_failures_total", "view" => key.clone()).increment(1);
                            tx.send_modify(|state| state.failed(error, fallback.as_ref()));
                        }
                    }
                }
            }
        }
    });

    (task, rx)
}

/// Prepend one synthesized alert to the feed every `period`.
///
/// With `alerts`, every alert the recent-alerts poll returns that the feed
/// has not shown yet is pushed as well.
pub fn spawn_feed_injector(
    period: Duration,
    mut alerts: Option<watch::Receiver<ViewState<RecentAlertsResponse>>>,
) -> (ScheduledTask, watch::Receiver<AlertFeed>) {
    let (tx, rx) = watch::channel(AlertFeed::default());

    let task = ScheduledTask::spawn("alert-feed", async move {
        let mut rng = StdRng::from_entropy();
        let mut ticker = poll_interval(period);
        // first tick is immediate; the first injection waits a full period
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let item = FeedItem::synthesize(&mut rng, Utc::now());
                    tracing::debug!(kind = %item.kind, address = %item.address, "Feed alert injected");
                    tx.send_modify(|feed| feed.push(item));
                }
                changed = next_change(&mut alerts) => {
                    if changed.is_err() {
                        // the alerts poller is gone; keep synthesizing
                        alerts = None;
                        continue;
                    }
                    let Some(rx) = alerts.as_mut() else { continue };
                    let polled = rx
                        .borrow_and_update()
                        .data
                        .as_ref()
                        .map(|resp| resp.alerts.clone())
                        .unwrap_or_default();
                    tx.send_if_modified(|feed| feed.push_new_alerts(&polled) > 0);
                }
            }
        }
    });

    (task, rx)
}

async fn next_change<T>(rx: &mut Option<watch::Receiver<T>>) -> Result<(), watch::error::RecvError> {
    match rx {
        Some(rx) => rx.changed().await,
        None => std::future::pending().await,
    }
}

// ---------------------------------------------------------------------------
// Followed wallets
// ---------------------------------------------------------------------------

/// Analysis and recent events for one followed wallet. Polling stops when
/// the wallet is unfollowed.
pub struct WalletView {
    pub analysis: watch::Receiver<ViewState<WalletAnalysis>>,
    pub events: watch::Receiver<ViewState<WalletEventsResponse>>,
    _tasks: [ScheduledTask; 2],
}

fn watch_wallet(
    client: &RadarClient,
    registry: &InFlight,
    address: &str,
    period: Duration,
) -> WalletView {
    let analysis_client = client.clone();
    let target = address.to_string();
    let (analysis_task, analysis) = spawn_poller(
        format!("/api/wallet/{address}/analysis"),
        period,
        registry.clone(),
        move || {
            let client = analysis_client.clone();
            let address = target.clone();
            async move { client.wallet_analysis(&address).await }
        },
        None,
    );

    let events_client = client.clone();
    let target = address.to_string();
    let (events_task, events) = spawn_poller(
        format!("/api/wallet/{address}/events?limit={WALLET_EVENTS_LIMIT}&offset=0"),
        period,
        registry.clone(),
        move || {
            let client = events_client.clone();
            let address = target.clone();
            async move { client.wallet_events(&address, WALLET_EVENTS_LIMIT, 0).await }
        },
        None,
    );

    WalletView {
        analysis,
        events,
        _tasks: [analysis_task, events_task],
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Owns every dashboard timer; they stop when this is dropped.
pub struct DashboardController {
    pub alerts: watch::Receiver<ViewState<RecentAlertsResponse>>,
    pub opportunities: watch::Receiver<ViewState<Vec<MirrorOpportunity>>>,
    pub network: watch::Receiver<ViewState<NetworkStatus>>,
    pub feed: watch::Receiver<AlertFeed>,
    client: RadarClient,
    registry: InFlight,
    tasks: Vec<ScheduledTask>,
    wallet_poll: Duration,
    watchlist: Watchlist,
    /// Keyed by lowercased address, like the watchlist.
    wallets: HashMap<String, WalletView>,
}

impl DashboardController {
    pub fn start(client: RadarClient, config: &ClientConfig) -> Self {
        let registry = InFlight::default();
        let mut tasks = Vec::with_capacity(4);

        let alert_limit = config.alert_limit;
        let alerts_client = client.clone();
        let (task, alerts) = spawn_poller(
            format!("/api/alerts/recent?limit={alert_limit}"),
            Duration::from_secs(config.alert_poll_secs),
            registry.clone(),
            move || {
                let client = alerts_client.clone();
                async move { client.recent_alerts(alert_limit).await }
            },
            None,
        );
        tasks.push(task);

        let timeframe = Timeframe::default();
        let opportunities_client = client.clone();
        let (task, opportunities) = spawn_poller(
            format!("/api/opportunities/top?limit={OPPORTUNITY_LIMIT}&timeframe={timeframe}"),
            Duration::from_secs(config.opportunity_poll_secs),
            registry.clone(),
            move || {
                let client = opportunities_client.clone();
                async move {
                    client
                        .top_opportunities(OPPORTUNITY_LIMIT, timeframe)
                        .await
                        .map(|resp| resp.mirror_opportunities)
                }
            },
            Some(static_opportunities()),
        );
        tasks.push(task);

        let network_client = client.clone();
        let (task, network) = spawn_poller(
            "/api/network/status".to_string(),
            Duration::from_secs(config.network_poll_secs),
            registry.clone(),
            move || {
                let client = network_client.clone();
                async move { client.network_status().await }
            },
            None,
        );
        tasks.push(task);

        let (task, feed) = spawn_feed_injector(
            Duration::from_secs(config.alert_inject_secs),
            Some(alerts.clone()),
        );
        tasks.push(task);

        tracing::info!(
            api_url = %config.api_url,
            tasks = tasks.len(),
            "Dashboard controller started"
        );

        let mut controller = Self {
            alerts,
            opportunities,
            network,
            feed,
            client,
            registry,
            tasks,
            wallet_poll: Duration::from_secs(config.wallet_poll_secs),
            watchlist: Watchlist::default(),
            wallets: HashMap::new(),
        };
        for address in &config.watchlist {
            controller.follow(address);
        }
        controller
    }

    /// Dashboard-wide tasks; followed wallets are not included.
    pub fn task_names(&self) -> Vec<&str> {
        self.tasks.iter().map(ScheduledTask::name).collect()
    }

    /// Follow `address` and start polling its analysis and events.
    /// Returns `false` if it was already followed.
    pub fn follow(&mut self, address: &str) -> bool {
        if !self.watchlist.follow(address) {
            return false;
        }
        let view = watch_wallet(&self.client, &self.registry, address, self.wallet_poll);
        self.wallets.insert(address.to_ascii_lowercase(), view);
        tracing::info!(address, "Wallet followed");
        true
    }

    /// Stop following `address`; its pollers are aborted.
    pub fn unfollow(&mut self, address: &str) -> bool {
        if !self.watchlist.unfollow(address) {
            return false;
        }
        self.wallets.remove(&address.to_ascii_lowercase());
        tracing::info!(address, "Wallet unfollowed");
        true
    }

    /// Flip the follow flag; returns whether `address` is now followed.
    pub fn toggle_follow(&mut self, address: &str) -> bool {
        if self.unfollow(address) {
            false
        } else {
            self.follow(address)
        }
    }

    pub fn watchlist(&self) -> &Watchlist {
        &self.watchlist
    }

    pub fn wallet(&self, address: &str) -> Option<&WalletView> {
        self.wallets.get(&address.to_ascii_lowercase())
    }

    pub fn is_in_flight(&self, key: &str) -> bool {
        self.registry.contains(key)
    }
}

impl Drop for DashboardController {
    fn drop(&mut self) {
        tracing::info!(
            tasks = self.tasks.len(),
            wallets = self.wallets.len(),
            "Dashboard controller stopping"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_flight_guard_releases_key() {
        let registry = InFlight::default();
        let guard = registry.try_begin("/api/network/status").unwrap();
        assert!(registry.try_begin("/api/network/status").is_none());
        assert!(registry.try_begin("/api/alerts/recent?limit=20").is_some());
        drop(guard);
        assert!(!registry.contains("/api/network/status"));
        assert!(registry.try_begin("/api/network/status").is_some());
    }

    #[test]
    fn test_failure_keeps_previous_data() {
        let mut state = ViewState::default();
        state.succeeded(5u32);
        state.failed("boom".into(), Some(&0));
        assert_eq!(state.data, Some(5));
        assert!(!state.connected);
        assert!(!state.is_fallback);
        assert_eq!(state.last_error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_failure_without_data_uses_fallback() {
        let mut state: ViewState<u32> = ViewState::default();
        state.failed("boom".into(), Some(&7));
        assert_eq!(state.data, Some(7));
        assert!(state.is_fallback);

        state.succeeded(9);
        assert!(state.connected);
        assert!(!state.is_fallback);
        assert!(state.last_error.is_none());
    }
}
