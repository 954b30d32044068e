//! Terminal formatting helpers
//!
//! Pure functions only - no I/O, no color. Commands layer color on top.

use crate::models::{ClaimRecord, USDC_DECIMALS};

/// Microunits per cent
const CENT: u64 = 10u64.pow(USDC_DECIMALS - 2);

/// Format a micro-USDC amount as dollars, e.g. `1250000 -> "$1.25"`.
///
/// Rounds half-up to the cent. Money stays integer all the way here.
pub fn usdc(micro: u64) -> String {
    let cents = (micro + CENT / 2) / CENT;
    format!("${}.{:02}", cents / 100, cents % 100)
}

/// Format basis points as a percentage, e.g. `2000 -> "20.00%"`.
pub fn bps(bps: u32) -> String {
    format!("{}.{:02}%", bps / 100, bps % 100)
}

/// Shorten an address for display: first 6 chars, ellipsis, last 4.
pub fn short_address(addr: &str) -> String {
    let chars: Vec<char> = addr.chars().collect();
    if chars.len() <= 11 {
        return addr.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}…{}", head, tail)
}

/// Render unix seconds as a UTC timestamp
pub fn timestamp(secs: i64) -> String {
    chrono::DateTime::from_timestamp(secs, 0)
        .map(|d| d.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// History table rows: date, amount, chain left-justified at fixed widths,
/// payout address unpadded. At most `limit` rows; a see-more hint is appended
/// when the backend reports further records.
pub fn history_rows(records: &[ClaimRecord], limit: usize, has_more: bool) -> Vec<String> {
    let mut rows: Vec<String> = records
        .iter()
        .take(limit)
        .map(|r| {
            format!(
                "{:<20} {:<12} {:<10} {}",
                timestamp(r.claimed_at),
                usdc(r.amount_uusdc),
                r.chain,
                short_address(&r.payout_address)
            )
        })
        .collect();

    if has_more {
        rows.push("…see more with --limit".to_string());
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usdc_whole_and_zero() {
        assert_eq!(usdc(1_250_000), "$1.25");
        assert_eq!(usdc(0), "$0.00");
        assert_eq!(usdc(1_000_000), "$1.00");
    }

    #[test]
    fn test_usdc_rounds_half_up() {
        assert_eq!(usdc(1_255_000), "$1.26");
        assert_eq!(usdc(1_254_999), "$1.25");
        assert_eq!(usdc(9_999), "$0.01");
        assert_eq!(usdc(4_999), "$0.00");
    }

    #[test]
    fn test_bps() {
        assert_eq!(bps(100), "1.00%");
        assert_eq!(bps(2000), "20.00%");
        assert_eq!(bps(25), "0.25%");
        assert_eq!(bps(10_000), "100.00%");
    }

    #[test]
    fn test_short_address() {
        assert_eq!(
            short_address("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"),
            "0xd8dA…6045"
        );
        // Short values pass through untouched
        assert_eq!(short_address("0xabc"), "0xabc");
    }

    #[test]
    fn test_timestamp() {
        assert_eq!(timestamp(0), "1970-01-01 00:00 UTC");
    }

    fn record(claimed_at: i64) -> ClaimRecord {
        ClaimRecord {
            claimed_at,
            amount_uusdc: 12_500_000,
            chain: "base".to_string(),
            payout_address: "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045".to_string(),
        }
    }

    #[test]
    fn test_history_rows_truncates_to_limit_and_hints() {
        let records = vec![record(300), record(200), record(100)];
        let rows = history_rows(&records, 2, true);

        assert_eq!(rows.len(), 3); // 2 rows + hint
        assert!(rows[0].starts_with("1970-01-01 00:05 UTC"));
        assert!(rows[2].contains("see more"));
    }

    #[test]
    fn test_history_rows_no_hint_when_exhausted() {
        let records = vec![record(100)];
        let rows = history_rows(&records, 10, false);

        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0],
            "1970-01-01 00:01 UTC $12.50       base       0xd8dA…6045"
        );
    }
}
