//! Leaderboard shown when the opportunities endpoint has never answered.

use crate::explorer;
use crate::mirror::{estimated_gas, format_gas};
use crate::models::{MirrorOpportunity, Pnl, TopWallet, WalletEvidence};

struct StaticWallet {
    address: &'static str,
    label: &'static str,
    pnl_absolute: f64,
    pnl_percentage: f64,
    sharpe_ratio: f64,
    volume: f64,
    win_rate: f64,
    trades: u32,
    avg_trade_size: f64,
    top_tokens: [&'static str; 3],
    risk_score: f64,
    confidence: f64,
    gas: Option<&'static str>,
    slippage: &'static str,
}

const STATIC_WALLETS: [StaticWallet; 4] = [
    StaticWallet {
        address: "0x742d35Cc6634C0532925a3b8D4C9db96590c6C87",
        label: "DeFi Whale",
        pnl_absolute: 245_700.0,
        pnl_percentage: 245.7,
        sharpe_ratio: 2.34,
        volume: 1_200_000.0,
        win_rate: 78.0,
        trades: 156,
        avg_trade_size: 15_000.0,
        top_tokens: ["SEI", "USDC", "WETH"],
        risk_score: 3.2,
        confidence: 94.0,
        gas: None,
        slippage: "0.5%",
    },
    StaticWallet {
        address: "0x8ba1f109551bD432803012645Hac136c22C177e9",
        label: "Active Trader",
        pnl_absolute: 189_300.0,
        pnl_percentage: 189.3,
        sharpe_ratio: 1.98,
        volume: 890_000.0,
        win_rate: 72.0,
        trades: 203,
        avg_trade_size: 8_070.0,
        top_tokens: ["SEI", "USDC", "ATOM"],
        risk_score: 4.1,
        confidence: 87.0,
        gas: None,
        slippage: "0.5%",
    },
    StaticWallet {
        address: "0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984",
        label: "DeFi Power User",
        pnl_absolute: 167_800.0,
        pnl_percentage: 167.8,
        sharpe_ratio: 2.12,
        volume: 2_100_000.0,
        win_rate: 85.0,
        trades: 89,
        avg_trade_size: 8_254.0,
        top_tokens: ["SEI", "USDC", "OSMO"],
        risk_score: 3.8,
        confidence: 91.0,
        gas: None,
        slippage: "0.3%",
    },
    StaticWallet {
        address: "0x514910771AF9Ca656af840dff83E8264EcF986CA",
        label: "Yield Farmer",
        pnl_absolute: 134_500.0,
        pnl_percentage: 134.5,
        sharpe_ratio: 1.76,
        volume: 650_000.0,
        win_rate: 69.0,
        trades: 234,
        avg_trade_size: 2_777.0,
        top_tokens: ["SEI", "USDC", "ATOM"],
        risk_score: 4.5,
        confidence: 78.0,
        gas: Some("0.002 SEI"),
        slippage: "0.8%",
    },
];

pub fn static_opportunities() -> Vec<MirrorOpportunity> {
    STATIC_WALLETS
        .iter()
        .map(|w| MirrorOpportunity {
            wallet: TopWallet {
                address: w.address.to_string(),
                label: w.label.to_string(),
                pnl: Pnl {
                    absolute: w.pnl_absolute,
                    percentage: w.pnl_percentage,
                    period: "24h".to_string(),
                },
                sharpe_ratio: w.sharpe_ratio,
                volume: w.volume,
                win_rate: w.win_rate,
                trades: w.trades,
                avg_trade_size: w.avg_trade_size,
                top_tokens: w.top_tokens.iter().map(|t| t.to_string()).collect(),
                risk_score: w.risk_score,
                evidence: WalletEvidence {
                    profitable_trades: Vec::new(),
                    total_swaps: 0,
                },
            },
            mirror_trade_url: explorer::mirror_trade_url(w.avg_trade_size, None),
            confidence: w.confidence,
            estimated_gas: w
                .gas
                .map(str::to_string)
                .unwrap_or_else(|| format_gas(estimated_gas())),
            slippage: w.slippage.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_set_is_valid_and_ranked() {
        let opps = static_opportunities();
        assert_eq!(opps.len(), 4);
        assert!(opps.iter().all(|o| o.wallet.validate().is_ok()));
        assert!(opps
            .windows(2)
            .all(|w| w[0].wallet.pnl.percentage >= w[1].wallet.pnl.percentage));
        assert_eq!(opps[3].estimated_gas, "0.002 SEI");
        assert_eq!(opps[0].estimated_gas, "0.001 SEI");
    }
}
