use std::collections::{HashSet, VecDeque};

use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Serialize;

use crate::explorer;
use crate::models::{Alert, AlertType, Severity};

/// Items kept in the live feed; older ones fall off the end.
pub const FEED_CAPACITY: usize = 10;

const INJECTED_KINDS: [(AlertType, Severity); 5] = [
    (AlertType::LargeTransfer, Severity::Critical),
    (AlertType::NewToken, Severity::High),
    (AlertType::SmartContract, Severity::Medium),
    (AlertType::OffHours, Severity::High),
    (AlertType::MevActivity, Severity::Critical),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub id: String,
    pub kind: AlertType,
    pub severity: Severity,
    pub message: String,
    pub address: String,
    pub amount: Option<String>,
    pub detected_at: DateTime<Utc>,
    pub explorer_url: String,
}

impl FeedItem {
    pub fn from_alert(alert: &Alert) -> Self {
        Self {
            id: alert.id.clone(),
            kind: alert.kind,
            severity: alert.severity,
            message: alert.description.clone(),
            address: alert.address.clone(),
            amount: None,
            detected_at: alert.detected_at,
            explorer_url: explorer::tx_url(&alert.transaction_hash),
        }
    }

    /// A randomized alert for the demo feed. Large transfers carry an amount.
    pub fn synthesize<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> Self {
        let (kind, severity) = INJECTED_KINDS[rng.gen_range(0..INJECTED_KINDS.len())];
        let suffix: String = (0..6)
            .map(|_| char::from(rng.sample(Alphanumeric)).to_ascii_lowercase())
            .collect();
        let address = format!("sei1{suffix}");

        let amount = (kind == AlertType::LargeTransfer)
            .then(|| format!("{} SEI", rng.gen_range(10_000..60_000)));

        Self {
            id: format!("feed_{}", now.timestamp_millis()),
            kind,
            severity,
            message: format!("{} in wallet {address}", kind.title()),
            explorer_url: explorer::address_url(&address),
            address,
            amount,
            detected_at: now,
        }
    }
}

/// Newest-first feed capped at [`FEED_CAPACITY`], plus the 24h alert count.
#[derive(Debug, Clone, Default)]
pub struct AlertFeed {
    items: VecDeque<FeedItem>,
    alerts_24h: u64,
    /// Ids of server alerts already pushed.
    seen: HashSet<String>,
}

impl AlertFeed {
    pub fn push(&mut self, item: FeedItem) {
        self.items.push_front(item);
        self.items.truncate(FEED_CAPACITY);
        self.alerts_24h += 1;
    }

    /// Push the polled alerts not seen before, oldest first so the newest
    /// ends up on top. `alerts` is newest-first as the API returns it.
    /// Returns how many were added.
    pub fn push_new_alerts(&mut self, alerts: &[Alert]) -> usize {
        let mut added = 0;
        for alert in alerts.iter().rev() {
            if self.seen.insert(alert.id.clone()) {
                self.push(FeedItem::from_alert(alert));
                added += 1;
            }
        }
        added
    }

    pub fn items(&self) -> impl Iterator<Item = &FeedItem> {
        self.items.iter()
    }

    pub fn latest(&self) -> Option<&FeedItem> {
        self.items.front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn alerts_24h(&self) -> u64 {
        self.alerts_24h
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_feed_capped_newest_first() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut feed = AlertFeed::default();
        let start = Utc::now();

        for i in 0..15 {
            feed.push(FeedItem::synthesize(&mut rng, start + chrono::Duration::seconds(i)));
        }

        assert_eq!(feed.len(), FEED_CAPACITY);
        assert_eq!(feed.alerts_24h(), 15);
        let latest = feed.latest().unwrap();
        assert_eq!(latest.detected_at, start + chrono::Duration::seconds(14));
        let times: Vec<_> = feed.items().map(|i| i.detected_at).collect();
        assert!(times.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_synthesized_item() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let item = FeedItem::synthesize(&mut rng, Utc::now());
            assert!(item.address.starts_with("sei1"));
            assert_eq!(item.address.len(), 10);
            assert!(item.explorer_url.contains(&item.address));
            assert_eq!(item.amount.is_some(), item.kind == AlertType::LargeTransfer);
        }
    }

    #[test]
    fn test_from_alert_links_transaction() {
        let alert = crate::mock::generate_alerts(1, Utc::now()).remove(0);
        let item = FeedItem::from_alert(&alert);
        assert_eq!(item.explorer_url, explorer::tx_url(&alert.transaction_hash));
        assert_eq!(item.kind, alert.kind);
    }

    #[test]
    fn test_push_new_alerts_skips_seen_ids() {
        let now = Utc::now();
        let mut feed = AlertFeed::default();

        assert_eq!(feed.push_new_alerts(&crate::mock::generate_alerts(3, now)), 3);
        assert_eq!(feed.latest().map(|i| i.id.as_str()), Some("alert_0x1234_1"));

        // a later poll returns the same three plus two older ones
        assert_eq!(feed.push_new_alerts(&crate::mock::generate_alerts(5, now)), 2);
        assert_eq!(feed.len(), 5);
        assert_eq!(feed.alerts_24h(), 5);
    }
}
