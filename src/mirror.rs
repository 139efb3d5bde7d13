use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::explorer;
use crate::models::{MirrorOpportunity, TopWallet};

/// Upper bound on the confidence shown for any mirror trade.
pub const MAX_CONFIDENCE: f64 = 95.0;

/// Largest amount a mirror plan is priced for: 10^12 SEI.
pub const MAX_MIRROR_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Flat gas estimate per mirrored swap, in SEI.
pub fn estimated_gas() -> Decimal {
    Decimal::new(1, 3) // 0.001
}

/// DEX fee charged on the mirrored amount.
pub fn dex_fee_rate() -> Decimal {
    Decimal::new(3, 3) // 0.3%
}

pub fn format_gas(gas: Decimal) -> String {
    format!("{} SEI", gas.normalize())
}

/// Confidence blend: `min(95, winRate + sharpe * 5)`, floored at zero.
pub fn mirror_confidence(win_rate: f64, sharpe_ratio: f64) -> f64 {
    let raw = win_rate + sharpe_ratio * 5.0;
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, MAX_CONFIDENCE)
}

// ---------------------------------------------------------------------------
// Estimated returns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatedReturns {
    pub daily: String,
    pub weekly: String,
    pub monthly: String,
}

/// Scale a period PnL percentage down to daily and weekly figures.
///
/// `monthly` is the input period relabeled, not a separate computation.
pub fn estimated_returns(pnl_percentage: f64) -> EstimatedReturns {
    EstimatedReturns {
        daily: format!("{:.2}", pnl_percentage / 30.0),
        weekly: format!("{:.2}", pnl_percentage / 4.3),
        monthly: format!("{:.2}", pnl_percentage),
    }
}

// ---------------------------------------------------------------------------
// Risk and cost
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskMetrics {
    pub volatility: f64,
    pub max_drawdown: f64,
    pub sharpe: f64,
    pub win_rate: f64,
}

pub fn risk_metrics(wallet: &TopWallet) -> RiskMetrics {
    RiskMetrics {
        volatility: wallet.risk_score * 10.0,
        max_drawdown: wallet.risk_score * 2.0,
        sharpe: wallet.sharpe_ratio,
        win_rate: wallet.win_rate,
    }
}

/// Costs of mirroring `mirror_amount` SEI, all in SEI. Amounts are strings
/// so the exact decimal survives JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub mirror_amount: String,
    pub estimated_gas: String,
    pub dex_fee: String,
    pub slippage_cost: String,
    pub total_cost: String,
}

/// Slippage is reported for information only; like the swap site, the total
/// covers the amount, gas and DEX fee.
///
/// Returns `None` if any figure overflows `Decimal`.
pub fn cost_breakdown(mirror_amount: Decimal, slippage_pct: Decimal) -> Option<CostBreakdown> {
    let gas = estimated_gas();
    let dex_fee = mirror_amount.checked_mul(dex_fee_rate())?;
    let slippage_cost = mirror_amount
        .checked_mul(slippage_pct)?
        .checked_div(Decimal::ONE_HUNDRED)?;
    let total = mirror_amount.checked_add(gas)?.checked_add(dex_fee)?;

    Some(CostBreakdown {
        mirror_amount: format!("{:.3}", mirror_amount),
        estimated_gas: format!("{:.3}", gas),
        dex_fee: format!("{:.3}", dex_fee),
        slippage_cost: format!("{:.3}", slippage_cost),
        total_cost: format!("{:.3}", total),
    })
}

// ---------------------------------------------------------------------------
// Opportunities and plans
// ---------------------------------------------------------------------------

/// Slippage shown on leaderboard cards before the user picks one.
pub const DEFAULT_SLIPPAGE: &str = "0.5%";

/// Leaderboard card: the deep link mirrors the wallet's average trade size.
pub fn opportunity(wallet: &TopWallet) -> MirrorOpportunity {
    MirrorOpportunity {
        mirror_trade_url: explorer::mirror_trade_url(wallet.avg_trade_size, None),
        confidence: mirror_confidence(wallet.win_rate, wallet.sharpe_ratio),
        estimated_gas: format_gas(estimated_gas()),
        slippage: DEFAULT_SLIPPAGE.to_string(),
        wallet: wallet.clone(),
    }
}

/// Everything the mirror-trade dialog shows for one wallet and amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MirrorPlan {
    pub wallet: TopWallet,
    pub mirror_amount: String,
    pub slippage: String,
    pub confidence: f64,
    pub estimated_returns: EstimatedReturns,
    pub risk_metrics: RiskMetrics,
    pub cost_breakdown: CostBreakdown,
    pub mirror_trade_url: String,
    pub explorer_url: String,
}

/// `None` when the amount is too large to price; callers clamp to
/// [`MAX_MIRROR_AMOUNT`] first.
pub fn plan_mirror(
    wallet: &TopWallet,
    amount: Decimal,
    slippage_pct: Decimal,
) -> Option<MirrorPlan> {
    let cost_breakdown = cost_breakdown(amount, slippage_pct)?;
    let url_amount = amount.normalize().to_f64().unwrap_or(wallet.avg_trade_size);
    let url_slippage = slippage_pct.normalize().to_f64();

    Some(MirrorPlan {
        mirror_amount: cost_breakdown.mirror_amount.clone(),
        slippage: format!("{}%", slippage_pct.normalize()),
        confidence: mirror_confidence(wallet.win_rate, wallet.sharpe_ratio),
        estimated_returns: estimated_returns(wallet.pnl.percentage),
        risk_metrics: risk_metrics(wallet),
        cost_breakdown,
        mirror_trade_url: explorer::mirror_trade_url(url_amount, url_slippage),
        explorer_url: explorer::address_url(&wallet.address),
        wallet: wallet.clone(),
    })
}
