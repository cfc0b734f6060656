//! Per-category field extractors. Each is a pure function of a single line
//! and returns the first value its cascade yields, or nothing.

use common::models::Direction;

use crate::rules::{
    BUY_WORDS, EXTRACT_DIRECTION_EXCLUDES, PRICE_MAX, PRICE_MIN, PRICE_RES, RISK_REWARD_RES,
    SELL_WORDS, SYMBOL_NOISE_RE, SYMBOL_RES,
};

/// Pull a trading symbol out of a line. Marker characters and emoji are
/// stripped first; the cascade runs over the upper-cased remainder and the
/// winning token must be 3 to 8 characters long.
pub fn symbol(line: &str) -> Option<String> {
    let upper = line.to_uppercase();
    let cleaned = SYMBOL_NOISE_RE.replace_all(&upper, "");
    let cleaned = cleaned.trim();

    for re in SYMBOL_RES.iter() {
        if let Some(caps) = re.captures(cleaned) {
            let token = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            if (3..=8).contains(&token.len()) {
                return Some(token.to_string());
            }
        }
    }
    None
}

/// Read the position side from a line. Lines that look like position
/// management (close / profit / update / move / change) never yield a
/// direction, even when a buy or sell word is present.
pub fn direction(line_lower: &str) -> Option<Direction> {
    if EXTRACT_DIRECTION_EXCLUDES
        .iter()
        .any(|w| line_lower.contains(w))
    {
        return None;
    }
    if BUY_WORDS.iter().any(|w| line_lower.contains(w)) {
        return Some(Direction::Buy);
    }
    if SELL_WORDS.iter().any(|w| line_lower.contains(w)) {
        return Some(Direction::Sell);
    }
    None
}

/// Extract a price from a line, keeping the matched decimal text verbatim.
/// The cascade is ordered so labeled values beat positional ones; candidates
/// that fail to parse or fall outside [PRICE_MIN, PRICE_MAX] are skipped and
/// the cascade continues.
pub fn price(line: &str) -> Option<String> {
    let lower = line.to_lowercase();

    for re in PRICE_RES.iter() {
        if let Some(caps) = re.captures(&lower) {
            let candidate = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            if let Ok(value) = candidate.parse::<f64>() {
                if (PRICE_MIN..=PRICE_MAX).contains(&value) {
                    return Some(candidate.to_string());
                }
            }
        }
    }
    None
}

/// Extract an "N:M"-style risk/reward ratio, kept as free text since the
/// separator varies between channels.
pub fn risk_reward(line: &str) -> Option<String> {
    let lower = line.to_lowercase();

    for re in RISK_REWARD_RES.iter() {
        if let Some(caps) = re.captures(&lower) {
            return caps.get(1).map(|m| m.as_str().to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_prefers_forex_crosses() {
        assert_eq!(symbol("EURUSD"), Some("EURUSD".to_string()));
        assert_eq!(symbol("USDCAD SELL 1.37480"), Some("USDCAD".to_string()));
        assert_eq!(symbol("gbpjpy buy now"), Some("GBPJPY".to_string()));
    }

    #[test]
    fn symbol_handles_metals_and_crypto() {
        assert_eq!(symbol("GOLD BUY 3373.33"), Some("GOLD".to_string()));
        assert_eq!(symbol("XAUUSD sell"), Some("XAUUSD".to_string()));
        assert_eq!(symbol("BTCUSDT long"), Some("BTCUSDT".to_string()));
    }

    #[test]
    fn symbol_strips_markers_and_emoji() {
        assert_eq!(symbol("📊 #EURUSD"), Some("EURUSD".to_string()));
        assert_eq!(symbol("🔥 $GOLD signal"), Some("GOLD".to_string()));
    }

    #[test]
    fn symbol_rejects_overlong_tokens() {
        assert_eq!(symbol("123 456"), None);
        assert_eq!(symbol("1.2345"), None);
    }

    #[test]
    fn direction_maps_variants() {
        assert_eq!(direction("buy limit now"), Some(Direction::Buy));
        assert_eq!(direction("going long"), Some(Direction::Buy));
        assert_eq!(direction("sell!"), Some(Direction::Sell));
        assert_eq!(direction("short it"), Some(Direction::Sell));
        assert_eq!(direction("eurusd"), None);
    }

    #[test]
    fn direction_skips_management_lines() {
        assert_eq!(direction("close the buy in profit"), None);
        assert_eq!(direction("sell update"), None);
        assert_eq!(direction("move the buy stop"), None);
    }

    #[test]
    fn price_reads_labeled_values() {
        assert_eq!(price("Entry: 1.2345"), Some("1.2345".to_string()));
        assert_eq!(price("E: 1.78250"), Some("1.78250".to_string()));
        assert_eq!(price("SL: 1.2400"), Some("1.2400".to_string()));
        assert_eq!(price("TP2: 1.2250"), Some("1.2250".to_string()));
    }

    #[test]
    fn price_reads_positional_and_integer_values() {
        assert_eq!(price("GOLD BUY 3373.33"), Some("3373.33".to_string()));
        assert_eq!(price("BUY LIMIT 3350"), Some("3350".to_string()));
        assert_eq!(price("TP1: 3380"), Some("3380".to_string()));
    }

    #[test]
    fn labeled_value_wins_over_positional_on_same_line() {
        assert_eq!(price("buy 2.0000 entry: 1.5000"), Some("1.5000".to_string()));
    }

    #[test]
    fn out_of_range_candidates_are_not_prices() {
        assert_eq!(price("SL: 99999.99"), None);
        assert_eq!(price("sl 60000"), None);
    }

    #[test]
    fn risk_reward_reads_labeled_and_bare_ratios() {
        assert_eq!(risk_reward("R/R: 1:3"), Some("1:3".to_string()));
        assert_eq!(risk_reward("risk/reward 1/2"), Some("1/2".to_string()));
    }
}
