use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Alert, EventType, TopWallet, WalletEvent};

/// Alerts delivered faster than this count as sub-second for verification.
pub const SUB_SECOND_MS: i64 = 1_000;

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub has_more: bool,
}

/// Window `items` to `[offset, offset + limit)` without touching the source.
pub fn paginate<T>(items: &[T], limit: usize, offset: usize) -> Page<'_, T> {
    let start = offset.min(items.len());
    let end = start.saturating_add(limit).min(items.len());

    Page {
        items: &items[start..end],
        has_more: offset.saturating_add(limit) < items.len(),
    }
}

// ---------------------------------------------------------------------------
// Alert statistics
// ---------------------------------------------------------------------------

/// Mean delivery latency in milliseconds; 0 when there is nothing to average.
pub fn average_latency(alerts: &[Alert]) -> f64 {
    if alerts.is_empty() {
        return 0.0;
    }
    let total: i64 = alerts.iter().map(|a| a.latency_ms).sum();
    total as f64 / alerts.len() as f64
}

/// Newest detection first. Stable, so equal timestamps keep their order.
pub fn sort_by_detected_desc(alerts: &mut [Alert]) {
    alerts.sort_by(|a, b| b.detected_at.cmp(&a.detected_at));
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationStats {
    pub total_alerts: usize,
    pub avg_latency: f64,
    pub sub1s_alerts: usize,
    /// Share of sub-second alerts, whole percent.
    pub verification_rate: u32,
}

pub fn verification_stats(alerts: &[Alert]) -> VerificationStats {
    let sub1s = alerts
        .iter()
        .filter(|a| a.latency_ms < SUB_SECOND_MS)
        .count();

    let verification_rate = if alerts.is_empty() {
        0
    } else {
        (sub1s as f64 / alerts.len() as f64 * 100.0).round() as u32
    };

    VerificationStats {
        total_alerts: alerts.len(),
        avg_latency: average_latency(alerts).round(),
        sub1s_alerts: sub1s,
        verification_rate,
    }
}

// ---------------------------------------------------------------------------
// Leaderboard
// ---------------------------------------------------------------------------

/// Rank by descending period PnL percentage. Ties fall back to address so
/// the order never depends on how the entries were produced.
pub fn rank_by_pnl(wallets: &mut [TopWallet]) {
    wallets.sort_by(|a, b| {
        b.pnl
            .percentage
            .total_cmp(&a.pnl.percentage)
            .then_with(|| a.address.cmp(&b.address))
    });
}

/// Number of swaps backing the leaderboard figures.
pub fn data_points(wallets: &[TopWallet]) -> u32 {
    wallets.iter().map(|w| w.evidence.total_swaps).sum()
}

// ---------------------------------------------------------------------------
// Wallet events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub total_events: usize,
    pub incoming_transfers: usize,
    pub outgoing_transfers: usize,
    pub last24h: usize,
}

pub fn event_summary(events: &[WalletEvent], now: DateTime<Utc>) -> EventSummary {
    let cutoff = now - Duration::hours(24);
    let count = |kind: EventType| events.iter().filter(|e| e.kind == kind).count();

    EventSummary {
        total_events: events.len(),
        incoming_transfers: count(EventType::IncomingTransfer),
        outgoing_transfers: count(EventType::OutgoingTransfer),
        last24h: events.iter().filter(|e| e.timestamp >= cutoff).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;
    use crate::models::Timeframe;

    #[test]
    fn test_paginate_window_sizes() {
        let items: Vec<u32> = (0..5).collect();

        for limit in 0..8 {
            for offset in 0..8 {
                let page = paginate(&items, limit, offset);
                let expected = limit.min(items.len().saturating_sub(offset));
                assert_eq!(page.items.len(), expected, "limit={limit} offset={offset}");
                assert_eq!(page.has_more, offset + limit < items.len());
            }
        }
    }

    #[test]
    fn test_paginate_slice_contents() {
        let items = vec!["a", "b", "c"];
        let page = paginate(&items, 1, 2);
        assert_eq!(page.items, &["c"]);
        assert!(!page.has_more);

        let page = paginate(&items, 2, 0);
        assert_eq!(page.items, &["a", "b"]);
        assert!(page.has_more);
    }

    #[test]
    fn test_paginate_huge_values_do_not_overflow() {
        let items = vec![1, 2, 3];
        let page = paginate(&items, usize::MAX, usize::MAX);
        assert!(page.items.is_empty());
        assert!(!page.has_more);
    }

    #[test]
    fn test_average_latency_empty() {
        assert_eq!(average_latency(&[]), 0.0);
    }

    #[test]
    fn test_average_latency_two_alerts() {
        let alerts = mock::generate_alerts(2, Utc::now());
        assert_eq!(alerts[0].latency_ms, 800);
        assert_eq!(alerts[1].latency_ms, 600);
        assert_eq!(average_latency(&alerts), 700.0);
    }

    #[test]
    fn test_sort_by_detected_desc() {
        let mut alerts = mock::generate_alerts(3, Utc::now());
        alerts.reverse();
        sort_by_detected_desc(&mut alerts);
        assert!(alerts
            .windows(2)
            .all(|w| w[0].detected_at >= w[1].detected_at));
    }

    #[test]
    fn test_verification_stats() {
        let alerts = mock::generate_alerts(3, Utc::now());
        let stats = verification_stats(&alerts);
        assert_eq!(stats.total_alerts, 3);
        assert_eq!(stats.sub1s_alerts, 3);
        assert_eq!(stats.verification_rate, 100);
        assert_eq!(stats.avg_latency, 767.0);

        let empty = verification_stats(&[]);
        assert_eq!(empty.verification_rate, 0);
        assert_eq!(empty.avg_latency, 0.0);
    }

    #[test]
    fn test_rank_by_pnl_ignores_input_order() {
        let mut wallets = mock::generate_top_wallets(10, Timeframe::Day);
        wallets.reverse();
        wallets[1].pnl.percentage = 15.2;
        rank_by_pnl(&mut wallets);

        assert!(wallets
            .windows(2)
            .all(|w| w[0].pnl.percentage >= w[1].pnl.percentage));
        // equal percentages are ordered by address
        let tied: Vec<&str> = wallets
            .iter()
            .filter(|w| w.pnl.percentage == 15.2)
            .map(|w| w.address.as_str())
            .collect();
        let mut sorted = tied.clone();
        sorted.sort();
        assert_eq!(tied, sorted);
    }

    #[test]
    fn test_data_points_sums_swaps() {
        let wallets = mock::generate_top_wallets(10, Timeframe::Day);
        assert_eq!(data_points(&wallets), 164);
    }

    #[test]
    fn test_event_summary() {
        let now = Utc::now();
        let events = mock::generate_wallet_events(now);
        let summary = event_summary(&events, now);
        assert_eq!(
            summary,
            EventSummary {
                total_events: 3,
                incoming_transfers: 2,
                outgoing_transfers: 1,
                last24h: 3,
            }
        );
    }
}
