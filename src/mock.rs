//! Mock data generators backing the demo endpoints.
//!
//! Everything here is reproducible: fixed seed records first, then entries
//! drawn from a `StdRng` seeded by index (alerts) or by the SHA-256 digest of
//! the wallet address (analysis).

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};

use crate::aggregate::rank_by_pnl;
use crate::explorer::{self, short_address};
use crate::models::{
    Activity, Alert, AlertDraft, AlertEvidence, AlertType, AnalysisEvidence, Balance, EventType,
    MarketInsights, NetworkMetrics, NetworkStatus, Pnl, PredictiveInsight, RiskAssessment,
    Severity, Timeframe, TopWallet, TradingPair, TransactionRef, UnusualActivity, WalletAnalysis,
    WalletEvent, WalletEvidence,
};

/// Number of fixed alerts every alert set starts with.
pub const SEED_ALERT_COUNT: usize = 3;

const SEED_BLOCK: u64 = 12_345_678;
const SEI_USD: f64 = 0.847;

// ---------------------------------------------------------------------------
// Alerts
// ---------------------------------------------------------------------------

struct SeedAlert {
    id: &'static str,
    kind: AlertType,
    severity: Severity,
    address: &'static str,
    tx_hash: &'static str,
    contract: &'static str,
    topics: [&'static str; 2],
    block_hash: &'static str,
    age_ms: i64,
    latency_ms: i64,
}

const SEED_ALERTS: [SeedAlert; SEED_ALERT_COUNT] = [
    SeedAlert {
        id: "alert_0x1234_1",
        kind: AlertType::LargeTransfer,
        severity: Severity::High,
        address: "0x742d35Cc6634C0532925a3b8D4C9db96590c6C87",
        tx_hash: "0x1234567890abcdef1234567890abcdef12345678",
        contract: "0xA0b86a33E6441e8e421c7c7c4b8b8b8b8b8b8b8b",
        topics: ["0x1234", "0x5678"],
        block_hash: "0xabcdef1234567890abcdef1234567890abcdef12",
        age_ms: 300_000,
        latency_ms: 800,
    },
    SeedAlert {
        id: "alert_0x5678_2",
        kind: AlertType::DexInteraction,
        severity: Severity::Medium,
        address: "0x8ba1f109551bD432803012645Hac136c22C177e9",
        tx_hash: "0x5678901234bcdef15678901234bcdef156789012",
        contract: "0xB1c97a44F7552f9f532d8d8d5c9c9c9c9c9c9c9c",
        topics: ["0x2345", "0x6789"],
        block_hash: "0xbcdef15678901234bcdef15678901234bcdef123",
        age_ms: 600_000,
        latency_ms: 600,
    },
    SeedAlert {
        id: "alert_0x9012_3",
        kind: AlertType::UnusualActivity,
        severity: Severity::Low,
        address: "0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984",
        tx_hash: "0x9012345678cdef129012345678cdef1290123456",
        contract: "0xC2d08b55G8663g0g643e9e9e6d0d0d0d0d0d0d0d",
        topics: ["0x3456", "0x7890"],
        block_hash: "0xcdef129012345678cdef129012345678cdef1234",
        age_ms: 900_000,
        latency_ms: 900,
    },
];

const GENERATED_KINDS: [(AlertType, Severity); 5] = [
    (AlertType::LargeTransfer, Severity::Critical),
    (AlertType::NewToken, Severity::High),
    (AlertType::SmartContract, Severity::Medium),
    (AlertType::OffHours, Severity::High),
    (AlertType::MevActivity, Severity::Critical),
];

fn describe(kind: AlertType, address: &str) -> String {
    let short = short_address(address);
    match kind {
        AlertType::LargeTransfer => format!("Large token transfer involving {short}"),
        AlertType::DexInteraction => format!("DEX swap activity detected on {short}"),
        AlertType::UnusualActivity => format!("Unusual transaction pattern detected for {short}"),
        AlertType::NewToken => format!("New token purchase by {short}"),
        AlertType::SmartContract => format!("Complex contract interaction from {short}"),
        AlertType::OffHours => format!("Off-hours transfer activity on {short}"),
        AlertType::MevActivity => format!("High-frequency arbitrage pattern from {short}"),
    }
}

fn random_hex(rng: &mut StdRng, bytes: usize) -> String {
    let mut out = String::with_capacity(2 + bytes * 2);
    out.push_str("0x");
    for _ in 0..bytes {
        out.push_str(&format!("{:02x}", rng.gen::<u8>()));
    }
    out
}

fn seed_alert(seed: &SeedAlert, now: DateTime<Utc>) -> Alert {
    let detected_at = now - Duration::milliseconds(seed.age_ms);
    let draft = AlertDraft {
        id: seed.id.to_string(),
        kind: seed.kind,
        severity: seed.severity,
        description: describe(seed.kind, seed.address),
        address: seed.address.to_string(),
        transaction_hash: seed.tx_hash.to_string(),
        block_number: SEED_BLOCK - (seed.age_ms / 300_000 - 1) as u64,
        evidence: AlertEvidence {
            contract: seed.contract.to_string(),
            topics: seed.topics.iter().map(|t| t.to_string()).collect(),
            block_hash: seed.block_hash.to_string(),
        },
    };
    Alert::new(draft, detected_at, detected_at + Duration::milliseconds(seed.latency_ms))
}

fn generated_alert(index: usize, now: DateTime<Utc>) -> Alert {
    let mut rng = StdRng::seed_from_u64(index as u64);
    let (kind, severity) = GENERATED_KINDS[rng.gen_range(0..GENERATED_KINDS.len())];
    let address = random_hex(&mut rng, 20);
    let tx_hash = random_hex(&mut rng, 32);

    let age_ms = (index as i64 + 1) * 300_000 + rng.gen_range(0..60_000);
    let latency_ms = rng.gen_range(200..1_500);
    let detected_at = now - Duration::milliseconds(age_ms);

    let draft = AlertDraft {
        id: format!("alert_{}_{}", &tx_hash[..6], index + 1),
        kind,
        severity,
        description: describe(kind, &address),
        address,
        transaction_hash: tx_hash,
        block_number: SEED_BLOCK.saturating_sub(index as u64),
        evidence: AlertEvidence {
            contract: random_hex(&mut rng, 20),
            topics: vec![random_hex(&mut rng, 2), random_hex(&mut rng, 2)],
            block_hash: random_hex(&mut rng, 32),
        },
    };
    Alert::new(draft, detected_at, detected_at + Duration::milliseconds(latency_ms))
}

/// `count` alerts relative to `now`: the fixed seed alerts, then
/// index-seeded pseudo-random ones. Same `(count, now)`, same output.
pub fn generate_alerts(count: usize, now: DateTime<Utc>) -> Vec<Alert> {
    (0..count)
        .map(|i| match SEED_ALERTS.get(i) {
            Some(seed) => seed_alert(seed, now),
            None => generated_alert(i, now),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Leaderboard
// ---------------------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
fn wallet(
    address: &str,
    label: &str,
    (absolute, percentage): (f64, f64),
    timeframe: Timeframe,
    sharpe_ratio: f64,
    volume: f64,
    win_rate: f64,
    trades: u32,
    avg_trade_size: f64,
    top_tokens: [&str; 3],
    risk_score: f64,
    profitable_trades: [&str; 3],
    total_swaps: u32,
) -> TopWallet {
    TopWallet {
        address: address.to_string(),
        label: label.to_string(),
        pnl: Pnl {
            absolute,
            percentage,
            period: timeframe.to_string(),
        },
        sharpe_ratio,
        volume,
        win_rate,
        trades,
        avg_trade_size,
        top_tokens: top_tokens.iter().map(|t| t.to_string()).collect(),
        risk_score,
        evidence: WalletEvidence {
            profitable_trades: profitable_trades.iter().map(|t| t.to_string()).collect(),
            total_swaps,
        },
    }
}

/// Full leaderboard for `timeframe`, ranked by PnL percentage.
pub fn leaderboard(timeframe: Timeframe) -> Vec<TopWallet> {
    let mut wallets = vec![
        wallet(
            "0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984",
            "DeFi Power User",
            (67_890.0, 15.2),
            timeframe,
            1.9,
            1_560_000.0,
            69.8,
            189,
            8_254.0,
            ["SEI", "USDC", "OSMO"],
            3.8,
            ["0x3456...cdef", "0x7890...ghij", "0x1234...klmn"],
            52,
        ),
        wallet(
            "0x742d35Cc6634C0532925a3b8D4C9db96590c6C87",
            "DeFi Whale",
            (156_780.0, 23.4),
            timeframe,
            2.8,
            2_340_000.0,
            78.5,
            156,
            15_000.0,
            ["SEI", "USDC", "WETH"],
            3.2,
            ["0x1234...abcd", "0x5678...efgh", "0x9012...ijkl"],
            45,
        ),
        wallet(
            "0x8ba1f109551bD432803012645Hac136c22C177e9",
            "Active Trader",
            (89_340.0, 18.7),
            timeframe,
            2.1,
            1_890_000.0,
            72.3,
            234,
            8_070.0,
            ["SEI", "USDC", "ATOM"],
            4.1,
            ["0x2345...bcde", "0x6789...fghi", "0x0123...jklm"],
            67,
        ),
    ];

    rank_by_pnl(&mut wallets);
    wallets
}

/// Top `limit` wallets of the leaderboard.
pub fn generate_top_wallets(limit: usize, timeframe: Timeframe) -> Vec<TopWallet> {
    let mut wallets = leaderboard(timeframe);
    wallets.truncate(limit);
    wallets
}

pub fn market_insights() -> MarketInsights {
    let pair = |pair: &str, volume: f64, change24h: f64| TradingPair {
        pair: pair.to_string(),
        volume,
        change24h,
    };

    MarketInsights {
        total_volume: 675_000.0,
        active_traders: 1_247,
        top_pairs: vec![
            pair("SEI/USDC", 4_500_000.0, 12.3),
            pair("SEI/WETH", 2_100_000.0, -3.4),
            pair("USDC/ATOM", 1_800_000.0, 8.7),
        ],
        trends: vec![
            "Increased DeFi activity on Sei network".to_string(),
            "Growing adoption of yield farming strategies".to_string(),
            "Rising interest in cross-chain assets".to_string(),
        ],
    }
}

// ---------------------------------------------------------------------------
// Wallet analysis
// ---------------------------------------------------------------------------

const ACTIVITY_PATTERNS: [&str; 4] = [
    "Regular, predictable",
    "Bursty, event driven",
    "Dormant with sudden spikes",
    "High-frequency automated",
];

const PREDICTIONS: [(&str, &str); 4] = [
    (
        "Likely to increase DeFi allocation by 15%",
        "High incoming transfer ratio suggests accumulation phase",
    ),
    (
        "Likely to rotate stablecoins into SEI within 48h",
        "Recent swaps mirror the wallet's pre-rally positioning",
    ),
    (
        "Likely to reduce exposure to lending protocols",
        "Collateral withdrawals outpace new deposits",
    ),
    (
        "Likely to bridge assets to a new chain",
        "Repeated approvals granted to bridge contracts",
    ),
];

fn score(rng: &mut StdRng, max: f64) -> String {
    format!("{:.1}", rng.gen_range(0.0..max))
}

fn short_hash(rng: &mut StdRng) -> String {
    let full = random_hex(rng, 32);
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}

/// Analysis for any `address`, echoed verbatim. The figures depend only on
/// the address, so repeated lookups agree.
pub fn generate_wallet_analysis(address: &str, now: DateTime<Utc>) -> WalletAnalysis {
    let digest: [u8; 32] = Sha256::digest(address.as_bytes()).into();
    let mut rng = StdRng::from_seed(digest);

    let sei: f64 = rng.gen_range(50.0..1_000.0);
    let total_transactions: u32 = rng.gen_range(5..60);
    let pattern = ACTIVITY_PATTERNS[rng.gen_range(0..ACTIVITY_PATTERNS.len())];

    let identity = rng.gen_range(0.0..40.0);
    let contract = rng.gen_range(0.0..80.0);
    let liquidity = rng.gen_range(0.0..60.0);
    let behavior = rng.gen_range(0.0..50.0);
    let overall = (identity + contract + liquidity + behavior) / 4.0;

    let base_block: u64 = rng.gen_range(10_000..13_000_000);
    let recent_transactions: Vec<TransactionRef> = (0..3)
        .map(|i| TransactionRef {
            hash: short_hash(&mut rng),
            block: (base_block + i).to_string(),
            kind: if rng.gen_bool(0.6) { "incoming" } else { "outgoing" }.to_string(),
        })
        .collect();

    let insight_count = rng.gen_range(1..=2);
    let first = rng.gen_range(0..PREDICTIONS.len());
    let predictive_insights = (0..insight_count)
        .map(|i| {
            let (prediction, reasoning) = PREDICTIONS[(first + i) % PREDICTIONS.len()];
            PredictiveInsight {
                prediction: prediction.to_string(),
                confidence: rng.gen_range(40..=95),
                evidence: recent_transactions.iter().map(|t| t.hash.clone()).collect(),
                reasoning: reasoning.to_string(),
            }
        })
        .collect();

    WalletAnalysis {
        address: address.to_string(),
        timestamp: now,
        balance: Balance {
            sei: format!("{:.1}", sei),
            usd: format!("{:.2}", sei * SEI_USD),
        },
        activity: Activity {
            total_transactions,
            last24h: total_transactions,
            avg_per_hour: format!("{:.1}", f64::from(total_transactions) / 24.0),
            pattern: pattern.to_string(),
        },
        behavior_score: score(&mut rng, 100.0),
        risk_assessment: RiskAssessment {
            overall: format!("{:.1}", overall),
            identity: format!("{:.1}", identity),
            contract: format!("{:.1}", contract),
            liquidity: format!("{:.1}", liquidity),
            behavior: format!("{:.1}", behavior),
        },
        predictive_insights,
        evidence: AnalysisEvidence { recent_transactions },
    }
}

// ---------------------------------------------------------------------------
// Wallet events
// ---------------------------------------------------------------------------

/// The three transfer events every wallet shows, newest first.
pub fn generate_wallet_events(now: DateTime<Utc>) -> Vec<WalletEvent> {
    let event = |hash: &str, block_number: u64, kind: EventType, hours: i64, contract: &str| {
        WalletEvent {
            hash: hash.to_string(),
            block_number,
            kind,
            timestamp: now - Duration::hours(hours),
            contract: contract.to_string(),
        }
    };

    vec![
        event(
            "0x1234567890abcdef1234567890abcdef12345678",
            12_345_678,
            EventType::IncomingTransfer,
            1,
            "0xA0b86a33E6441e8e421c7c7c4b8b8b8b8b8b8b8b",
        ),
        event(
            "0x2345678901bcdef12345678901bcdef123456789",
            12_345_677,
            EventType::OutgoingTransfer,
            2,
            "0xB1c97a44F7552f9f532d8d8d5c9c9c9c9c9c9c9c",
        ),
        event(
            "0x3456789012cdef123456789012cdef1234567890",
            12_345_676,
            EventType::IncomingTransfer,
            3,
            "0xC2d08b55G8663g0g643e9e9e6d0d0d0d0d0d0d0d",
        ),
    ]
}

/// Repeated inbound transfers are flagged as large-transfer activity.
pub fn unusual_activities(events: &[WalletEvent]) -> Vec<UnusualActivity> {
    let incoming = events
        .iter()
        .filter(|e| e.kind == EventType::IncomingTransfer)
        .count() as u32;

    if incoming < 2 {
        return Vec::new();
    }
    vec![UnusualActivity {
        kind: "large_transfer".to_string(),
        count: incoming,
        description: format!("{incoming} large transfers detected"),
        severity: Severity::Medium,
    }]
}

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------

pub fn generate_network_status(
    chain_id: u64,
    rpc_endpoint: &str,
    response_time: std::time::Duration,
    now: DateTime<Utc>,
) -> NetworkStatus {
    NetworkStatus {
        chain_id,
        latest_block: SEED_BLOCK,
        block_time: "400ms".to_string(),
        response_time: format!("{}ms", response_time.as_millis()),
        rpc_endpoint: rpc_endpoint.to_string(),
        explorer: explorer::EXPLORER_BASE.to_string(),
        status: "healthy".to_string(),
        timestamp: now,
        metrics: NetworkMetrics {
            avg_block_time: "400ms".to_string(),
            tps: 2_500,
            gas_price: "0.1 gwei".to_string(),
            network_load: "15.2%".to_string(),
        },
    }
}
