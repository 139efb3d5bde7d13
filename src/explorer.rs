use url::Url;

pub const EXPLORER_BASE: &str = "https://seitrace.com";
pub const EXPLORER_CHAIN: &str = "pacific-1";
const SWAP_BASE: &str = "https://dragonswap.app/swap";

/// Explorer page for an account or contract address.
pub fn address_url(address: &str) -> String {
    format!("{EXPLORER_BASE}/address/{address}?chain={EXPLORER_CHAIN}")
}

/// Explorer page for a transaction hash.
pub fn tx_url(hash: &str) -> String {
    format!("{EXPLORER_BASE}/tx/{hash}?chain={EXPLORER_CHAIN}")
}

/// Swap-site deep link pre-filled with `amount` of SEI into USDC.
///
/// `slippage` is only appended when the caller picked one explicitly; the
/// leaderboard links leave it to the swap site's default.
pub fn mirror_trade_url(amount: f64, slippage: Option<f64>) -> String {
    // SWAP_BASE is a constant, so parsing cannot fail at runtime.
    let mut url = match Url::parse(SWAP_BASE) {
        Ok(url) => url,
        Err(_) => return SWAP_BASE.to_string(),
    };

    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("inputCurrency", "SEI")
            .append_pair("outputCurrency", "USDC")
            .append_pair("exactAmount", &amount.to_string());
        if let Some(slippage) = slippage {
            query.append_pair("slippage", &slippage.to_string());
        }
    }

    url.into()
}

/// Short `0x1234ab...cdef` form used in descriptions.
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 16 {
        return address.to_string();
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 8..].iter().collect();
    format!("{head}...{tail}")
}
