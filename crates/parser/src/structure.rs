//! Structural validation: decide whether a message has the minimum shape of
//! a signal before any field extraction is attempted.

use crate::outcome::RejectReason;
use crate::rules::{
    DIRECTION_EXCLUDES, DIRECTION_WORDS, LINE_ENTRY_RES, LINE_SL_RES, LINE_SYMBOL_RES,
    LINE_TP_RES, MIN_SIGNAL_LEN, NEGATIVE_RES,
};

/// What the per-line component scan found across the whole message.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StructureScan {
    pub has_symbol: bool,
    pub has_direction: bool,
    pub has_entry: bool,
    pub has_sl: bool,
    pub has_tp: bool,
    /// Number of lines carrying a priced component (entry, SL or TP).
    pub price_count: usize,
}

/// The curated non-signal gate. Runs ahead of everything else, including the
/// keyword prefilter: a "just closed in profit" note is position chatter
/// whether or not it happens to carry a trading keyword.
pub fn reject_known_noise(text: &str) -> Result<(), RejectReason> {
    let lower = text.to_lowercase();
    if NEGATIVE_RES.iter().any(|re| re.is_match(&lower)) {
        Err(RejectReason::NegativePattern)
    } else {
        Ok(())
    }
}

/// Scan every non-trivial line for structural components, first matching
/// pattern per category per line.
pub fn scan(text: &str) -> StructureScan {
    let mut found = StructureScan::default();

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.chars().count() < 3 {
            continue;
        }
        let upper = line.to_uppercase();
        let lower = line.to_lowercase();

        if LINE_SYMBOL_RES.iter().any(|re| re.is_match(&upper)) {
            found.has_symbol = true;
        }

        if DIRECTION_WORDS.iter().any(|w| lower.contains(w))
            && !DIRECTION_EXCLUDES.iter().any(|w| lower.contains(w))
        {
            found.has_direction = true;
        }

        if LINE_ENTRY_RES.iter().any(|re| re.is_match(&lower)) {
            found.has_entry = true;
            found.price_count += 1;
        }

        if LINE_SL_RES.iter().any(|re| re.is_match(&lower)) {
            found.has_sl = true;
            found.price_count += 1;
        }

        if LINE_TP_RES.iter().any(|re| re.is_match(&lower)) {
            found.has_tp = true;
            found.price_count += 1;
        }
    }

    found
}

/// Accept only messages with symbol + entry + at least one exit level and at
/// least two priced components overall. A quote that names symbol and entry
/// but no exit is reported as `MissingExit` specifically; the length floor
/// only applies once no more precise cause is known.
pub fn validate(text: &str) -> Result<(), RejectReason> {
    let found = scan(text);

    if found.has_symbol && found.has_entry && !(found.has_sl || found.has_tp) {
        return Err(RejectReason::MissingExit);
    }
    if text.chars().count() < MIN_SIGNAL_LEN {
        return Err(RejectReason::TooShort);
    }
    if !(found.has_symbol
        && found.has_entry
        && (found.has_sl || found.has_tp)
        && found.price_count >= 2)
    {
        return Err(RejectReason::InsufficientStructure);
    }
    Ok(())
}
