mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;

use wallet_radar::api::types::{AlertsMetadata, RecentAlertsResponse};
use wallet_radar::client::controller::{
    spawn_feed_injector, spawn_poller, DashboardController, InFlight, ScheduledTask, ViewState,
};
use wallet_radar::client::feed::FEED_CAPACITY;
use wallet_radar::client::RadarClient;
use wallet_radar::config::ClientConfig;
use wallet_radar::mock;

const KEY: &str = "/api/network/status";
const WHALE: &str = "0x742d35Cc6634C0532925a3b8D4C9db96590c6C87";

#[tokio::test(start_paused = true)]
async fn test_success_then_failure_keeps_data() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let (_task, mut rx) = spawn_poller(
        KEY.to_string(),
        Duration::from_secs(5),
        InFlight::default(),
        move || {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    Ok(42u64)
                } else {
                    Err("connection refused")
                }
            }
        },
        None,
    );

    rx.changed().await.unwrap();
    {
        let state = rx.borrow_and_update();
        assert_eq!(state.data, Some(42));
        assert!(state.connected);
        assert!(state.last_updated.is_some());
    }

    rx.changed().await.unwrap();
    let state = rx.borrow_and_update().clone();
    assert_eq!(state.data, Some(42));
    assert!(!state.connected);
    assert_eq!(state.last_error.as_deref(), Some("connection refused"));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_failure_without_data_uses_fallback() {
    let (_task, mut rx) = spawn_poller(
        KEY.to_string(),
        Duration::from_secs(30),
        InFlight::default(),
        || async { Err::<Vec<u32>, _>("timeout") },
        Some(vec![1, 2, 3, 4]),
    );

    rx.changed().await.unwrap();
    let state = rx.borrow_and_update().clone();
    assert_eq!(state.data, Some(vec![1, 2, 3, 4]));
    assert!(state.is_fallback);
    assert!(!state.connected);
}

#[tokio::test(start_paused = true)]
async fn test_overlapping_ticks_are_skipped() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let registry = InFlight::default();

    let (_task, _rx) = spawn_poller(
        KEY.to_string(),
        Duration::from_secs(1),
        registry.clone(),
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async {
                tokio::time::sleep(Duration::from_secs(10)).await;
                Ok::<_, String>(())
            }
        },
        None,
    );

    tokio::time::sleep(Duration::from_millis(3_500)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(registry.contains(KEY));

    // the slow request finishes at t=10s; the tick at t=11s starts a new one
    tokio::time::sleep(Duration::from_secs(8)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_task_stops_polling() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let (task, _rx) = spawn_poller(
        KEY.to_string(),
        Duration::from_secs(1),
        InFlight::default(),
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, String>(()) }
        },
        None,
    );

    tokio::time::sleep(Duration::from_millis(2_500)).await;
    let seen = calls.load(Ordering::SeqCst);
    assert_eq!(seen, 3);

    task.cancel();
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(calls.load(Ordering::SeqCst), seen);
}

#[tokio::test(start_paused = true)]
async fn test_scheduled_task_aborts_on_drop() {
    let task = ScheduledTask::spawn("sleeper", async {
        tokio::time::sleep(Duration::from_secs(3_600)).await;
    });
    assert_eq!(task.name(), "sleeper");
    assert!(!task.is_finished());
    drop(task);
}

#[tokio::test(start_paused = true)]
async fn test_feed_injection_caps_at_ten() {
    let (_task, mut rx) = spawn_feed_injector(Duration::from_secs(6), None);

    // nothing before the first full period
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(rx.borrow().is_empty());

    tokio::time::sleep(Duration::from_secs(6 * 12)).await;
    rx.changed().await.unwrap();
    let feed = rx.borrow_and_update().clone();
    assert_eq!(feed.len(), FEED_CAPACITY);
    assert_eq!(feed.alerts_24h(), 12);
}

#[tokio::test(start_paused = true)]
async fn test_controller_marks_unreachable_api_disconnected() {
    let config = ClientConfig {
        api_url: "http://127.0.0.1:9".into(),
        request_timeout_ms: 200,
        ..ClientConfig::default()
    };
    let client = RadarClient::new(&config).unwrap();
    let mut controller = DashboardController::start(client, &config);
    assert_eq!(controller.task_names().len(), 4);

    controller.opportunities.changed().await.unwrap();
    let state = controller.opportunities.borrow_and_update().clone();
    assert!(!state.connected);
    assert!(state.is_fallback);
    assert_eq!(state.data.map(|d| d.len()), Some(4));
}

#[tokio::test(start_paused = true)]
async fn test_feed_picks_up_polled_alerts_once() {
    let (alerts_tx, alerts_rx) = watch::channel(ViewState::default());
    let (_task, mut rx) = spawn_feed_injector(Duration::from_secs(600), Some(alerts_rx));

    let now = Utc::now();
    let polled = RecentAlertsResponse {
        alerts: mock::generate_alerts(3, now),
        metadata: AlertsMetadata {
            total: 3,
            avg_latency: 767.0,
            last_updated: now,
            monitored_blocks: 1000,
        },
    };
    alerts_tx
        .send(ViewState {
            data: Some(polled),
            connected: true,
            ..ViewState::default()
        })
        .unwrap();

    rx.changed().await.unwrap();
    {
        let feed = rx.borrow_and_update();
        assert_eq!(feed.len(), 3);
        assert_eq!(feed.latest().map(|i| i.id.as_str()), Some("alert_0x1234_1"));
    }

    // the next poll returns the same alerts; nothing new reaches the feed
    alerts_tx.send_modify(|state| state.last_updated = Some(Utc::now()));
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(!rx.has_changed().unwrap());

    // the poller going away leaves the synthesized feed running
    drop(alerts_tx);
    tokio::time::sleep(Duration::from_secs(600)).await;
    rx.changed().await.unwrap();
    assert_eq!(rx.borrow().len(), 4);
}

#[tokio::test]
async fn test_followed_wallet_is_polled_until_unfollowed() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, common::build_test_app()).await.unwrap();
    });

    let config = ClientConfig {
        api_url: format!("http://{addr}"),
        watchlist: vec![WHALE.to_string()],
        ..ClientConfig::default()
    };
    let client = RadarClient::new(&config).unwrap();
    let mut controller = DashboardController::start(client, &config);

    assert!(controller.watchlist().is_following(WHALE));
    assert!(!controller.follow(&WHALE.to_ascii_lowercase()));

    let view = controller.wallet(WHALE).unwrap();
    let mut analysis = view.analysis.clone();
    let mut events = view.events.clone();

    analysis.changed().await.unwrap();
    let state = analysis.borrow_and_update().clone();
    assert!(state.connected);
    assert_eq!(state.data.unwrap().address, WHALE);

    events.changed().await.unwrap();
    let state = events.borrow_and_update().clone();
    assert!(state.connected);
    let page = state.data.unwrap();
    assert_eq!(page.address, WHALE);
    assert_eq!(page.pagination.limit, 50);
    assert_eq!(page.pagination.offset, 0);

    // server alerts land in the feed
    controller.feed.changed().await.unwrap();
    assert!(controller
        .feed
        .borrow()
        .items()
        .any(|item| item.id == "alert_0x1234_1"));

    assert!(!controller.toggle_follow(WHALE));
    assert!(controller.wallet(WHALE).is_none());
    assert!(controller.watchlist().is_empty());
    // the pollers are aborted, so their channels close
    assert!(analysis.changed().await.is_err());
    assert!(events.changed().await.is_err());
}
