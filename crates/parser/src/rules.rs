//! The fixed rule tables the pipeline runs on: keyword lists, the curated
//! non-signal phrasings, and the ordered pattern cascades per field category.
//! Every cascade is a plain slice of pattern strings compiled once, so tests
//! can enumerate the tables independently of the code that walks them.

use once_cell::sync::Lazy;
use regex::Regex;

/// Accepted numeric range for any price candidate. Values outside it are
/// treated as non-matches and the cascade moves on.
pub const PRICE_MIN: f64 = 0.000001;
pub const PRICE_MAX: f64 = 50_000.0;

/// Minimum message length (in chars) for a plausible signal.
pub const MIN_SIGNAL_LEN: usize = 20;

/// A message must contain at least one of these (case-insensitive) to be
/// worth scanning at all.
pub const SIGNAL_KEYWORDS: &[&str] = &[
    "entry", "tp", "sl", "target", "stop", "buy", "sell", "long", "short",
];

/// Phrasings that mark a message as something other than a fresh signal:
/// position-management chatter, marketing, status notices, housekeeping.
/// Matching any of these rejects the whole message, regardless of what else
/// it contains.
pub const NEGATIVE_PATTERNS: &[&str] = &[
    r"close.*profit",
    r"move sl",
    r"change tp",
    r"\+\d+.*pips",
    r"sl reached",
    r"tp reached",
    r"break.*even",
    r"entry.*break.*even",
    r"position.*update",
    r"trade.*update",
    r"close.*position",
    r"delete",
    r"remove.*order",
    r"cancel",
    r"activated",
    r"didn.*t.*activate",
    r"subscription",
    r"upgrade",
    r"contact.*@",
    r"website",
    r"calculator",
    r"economic.*calendar",
    r"risk.*management",
    r"lot.*size",
    r"weekend",
    r"market.*close",
    r"analyze?",
    r"tradingview",
    r"screenshot",
    r"profit.*screenshot",
    r"important.*update",
    r"note.*from",
    r"apologize",
    r"transparency",
    r"support.*on",
    r"favor",
    r"energy.*flowing",
];

pub static NEGATIVE_RES: Lazy<Vec<Regex>> = Lazy::new(|| compile(NEGATIVE_PATTERNS));

/// Structural scan: does a line mention an instrument at all? Tested against
/// the upper-cased line.
pub const LINE_SYMBOL_PATTERNS: &[&str] = &[
    r"[A-Z]{3,8}USDT?",
    r"[A-Z]{3,8}BTC",
    r"[A-Z]{3,8}ETH",
    r"XAU[A-Z]*",
    r"GOLD",
    r"[A-Z]{6}",
    r"#[A-Z]{3,8}",
];

pub static LINE_SYMBOL_RES: Lazy<Vec<Regex>> = Lazy::new(|| compile(LINE_SYMBOL_PATTERNS));

pub const DIRECTION_WORDS: &[&str] = &["buy", "sell", "long", "short"];
pub const DIRECTION_EXCLUDES: &[&str] = &["close", "profit", "update"];

/// Structural scan: entry-price indicators, tested against the lower-cased
/// line. Labeled forms first, then a price riding directly on a buy/sell
/// keyword.
pub const LINE_ENTRY_PATTERNS: &[&str] = &[
    r"entry.*price.*:?\s*([\d.]+)",
    r"e:\s*([\d.]+)",
    r"entry.*:?\s*([\d.]+)",
    r"enter.*:?\s*([\d.]+)",
    r"(?:buy|sell)\s+([\d.]+)",
    r"(?:buy|sell)\s+(?:limit\s+)?(\d+)",
];

pub static LINE_ENTRY_RES: Lazy<Vec<Regex>> = Lazy::new(|| compile(LINE_ENTRY_PATTERNS));

pub const LINE_SL_PATTERNS: &[&str] = &[
    r"stop.*loss.*:?\s*([\d.]+)",
    r"sl.*:?\s*([\d.]+)",
    r"stop.*:?\s*([\d.]+)",
];

pub static LINE_SL_RES: Lazy<Vec<Regex>> = Lazy::new(|| compile(LINE_SL_PATTERNS));

pub const LINE_TP_PATTERNS: &[&str] = &[
    r"tp\d*.*:?\s*([\d.]+)",
    r"take.*profit.*:?\s*([\d.]+)",
    r"target.*:?\s*([\d.]+)",
    r"✔️.*tp\d*.*:?\s*([\d.]+)",
];

pub static LINE_TP_RES: Lazy<Vec<Regex>> = Lazy::new(|| compile(LINE_TP_PATTERNS));

/// Emoji and marker characters stripped before symbol matching.
pub static SYMBOL_NOISE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[📊🔥✅❌#$]").unwrap());

/// Symbol extraction cascade, highest priority first: forex crosses by
/// currency-code prefix, then by suffix, crypto quote suffixes, metals,
/// generic 6-letter pairs, and a generic 3-8 letter fallback.
pub const SYMBOL_PATTERNS: &[&str] = &[
    r"\b(EUR[A-Z]{3})\b",
    r"\b(GBP[A-Z]{3})\b",
    r"\b(USD[A-Z]{3})\b",
    r"\b(AUD[A-Z]{3})\b",
    r"\b(NZD[A-Z]{3})\b",
    r"\b(CAD[A-Z]{3})\b",
    r"\b(CHF[A-Z]{3})\b",
    r"\b(JPY[A-Z]{3})\b",
    r"\b([A-Z]{3}USD)\b",
    r"\b([A-Z]{3}CAD)\b",
    r"\b([A-Z]{3}AUD)\b",
    r"\b([A-Z]{3}GBP)\b",
    r"\b([A-Z]{3}EUR)\b",
    r"\b([A-Z]{3}CHF)\b",
    r"\b([A-Z]{3}JPY)\b",
    r"\b([A-Z]{3,8}USDT?)\b",
    r"\b([A-Z]{3,8}BTC)\b",
    r"\b([A-Z]{3,8}ETH)\b",
    r"\b(XAUUSD)\b",
    r"\b(GOLD)\b",
    r"\b(XAU[A-Z]*)\b",
    r"\b([A-Z]{6})\b",
    r"\b([A-Z]{3,8})\b",
];

pub static SYMBOL_RES: Lazy<Vec<Regex>> = Lazy::new(|| compile(SYMBOL_PATTERNS));

/// Price extraction cascade, tested against the lower-cased line. Labeled
/// values outrank positional ones; a bare 4+-digit integer is the last
/// resort (gold-style quotes without decimals).
pub const PRICE_PATTERNS: &[&str] = &[
    r"(?:entry|e)\s*:?\s*(\d+\.\d+)",
    r"(?:tp\d*|target)\s*:?\s*(\d+\.\d+)",
    r"(?:sl|stop)\s*:?\s*(\d+\.\d+)",
    r"entry\s*price\s*:?\s*(\d+\.?\d*)",
    r"stop\s*loss\s*:?\s*(\d+\.?\d*)",
    r"(?:buy|sell)\s+(\d+\.\d+)",
    r"(?:buy|sell)\s+(?:limit\s+)?(\d+\.?\d*)",
    r"(\d+\.\d{2,8})",
    r"\b(\d{4,})\b",
];

pub static PRICE_RES: Lazy<Vec<Regex>> = Lazy::new(|| compile(PRICE_PATTERNS));

pub const RISK_REWARD_PATTERNS: &[&str] = &[
    r"r/r[:\s]*(\d+[:\s/]\d+)",
    r"risk[:\s/]*(\d+[:\s/]\d+)",
    r"(\d+[:\s/]\d+)",
];

pub static RISK_REWARD_RES: Lazy<Vec<Regex>> = Lazy::new(|| compile(RISK_REWARD_PATTERNS));

// Per-field line gates used while accumulating fields across the message.
// These are deliberately separate from NEGATIVE_PATTERNS: the negative list
// gates the whole message, the words below only gate a single extractor on
// a single line.
pub const ENTRY_LABELS: &[&str] = &["entry", "e:"];
pub const ENTRY_EXCLUDES: &[&str] = &["tp", "sl", "stop", "target"];
pub const SL_HINTS: &[&str] = &["sl", "stop loss", "stop"];
pub const SL_EXCLUDES: &[&str] = &["move", "change", "hit", "reached"];
pub const TP_HINTS: &[&str] = &["tp", "target", "✔️"];
pub const TP_EXCLUDES: &[&str] = &["move", "change", "hit", "reached", "close"];
pub const RISK_REWARD_HINTS: &[&str] = &["r/r", "risk-reward", "risk/reward"];
pub const EXTRACT_DIRECTION_EXCLUDES: &[&str] = &["close", "profit", "update", "move", "change"];
pub const BUY_WORDS: &[&str] = &["buy", "long"];
pub const SELL_WORDS: &[&str] = &["sell", "short"];

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("rule table pattern must compile"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_compiles() {
        assert_eq!(NEGATIVE_RES.len(), NEGATIVE_PATTERNS.len());
        assert_eq!(LINE_SYMBOL_RES.len(), LINE_SYMBOL_PATTERNS.len());
        assert_eq!(LINE_ENTRY_RES.len(), LINE_ENTRY_PATTERNS.len());
        assert_eq!(LINE_SL_RES.len(), LINE_SL_PATTERNS.len());
        assert_eq!(LINE_TP_RES.len(), LINE_TP_PATTERNS.len());
        assert_eq!(SYMBOL_RES.len(), SYMBOL_PATTERNS.len());
        assert_eq!(PRICE_RES.len(), PRICE_PATTERNS.len());
        assert_eq!(RISK_REWARD_RES.len(), RISK_REWARD_PATTERNS.len());
    }

    #[test]
    fn labeled_prices_outrank_positional_ones() {
        let labeled = PRICE_PATTERNS
            .iter()
            .position(|p| p.contains("entry|e"))
            .unwrap();
        let positional = PRICE_PATTERNS
            .iter()
            .position(|p| p.contains("buy|sell"))
            .unwrap();
        assert!(labeled < positional);
    }
}
