//! Classification and extraction of trading signals from free-text chat
//! messages. The pipeline is a chain of pure functions over the message text
//! plus fixed rule tables; it performs no I/O, holds no shared state, and
//! expresses every failure as a typed [`RejectReason`], never a panic.
//!
//! Stages, in order: curated non-signal gate, keyword prefilter, per-line
//! structural validation, field extraction, final assembly. The non-signal
//! gate runs first because position-management chatter must classify as
//! such even when it carries no trading keyword.

pub mod assemble;
pub mod extract;
pub mod outcome;
pub mod prefilter;
pub mod rules;
pub mod structure;

pub use outcome::RejectReason;

use common::models::{ParsedSignal, RawMessage};

/// Run the whole pipeline over one message. Deterministic: identical text
/// yields field-for-field identical records apart from `created_at`.
pub fn parse_message(message: &RawMessage) -> Result<ParsedSignal, RejectReason> {
    let text = message.text.trim();

    structure::reject_known_noise(text)?;
    prefilter::require_keyword(text)?;
    structure::validate(text)?;
    assemble::build(text, &message.source_channel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::models::Direction;

    fn msg(text: &str) -> RawMessage {
        RawMessage {
            text: text.to_string(),
            source_channel: "-1001234".to_string(),
            received_at: Utc::now(),
        }
    }

    #[test]
    fn accepts_compact_gold_signal() {
        let signal = parse_message(&msg("GOLD BUY 3373.33\nTP1: 3380\nSL: 3365")).unwrap();
        assert_eq!(signal.symbol, "GOLD");
        assert_eq!(signal.direction, Direction::Buy);
        assert_eq!(signal.entry, "3373.33");
        assert_eq!(signal.take_profits, vec!["3380".to_string()]);
        assert_eq!(signal.stop_loss.as_deref(), Some("3365"));
        assert_eq!(signal.source_channel, "-1001234");
    }

    #[test]
    fn accepts_labeled_eurusd_signal() {
        let text = "EURUSD\nSell\nEntry: 1.2345\nSL: 1.2400\nTP1: 1.2300\nTP2: 1.2250";
        let signal = parse_message(&msg(text)).unwrap();
        assert_eq!(signal.symbol, "EURUSD");
        assert_eq!(signal.direction, Direction::Sell);
        assert_eq!(signal.entry, "1.2345");
        assert_eq!(signal.stop_loss.as_deref(), Some("1.2400"));
        assert_eq!(
            signal.take_profits,
            vec!["1.2300".to_string(), "1.2250".to_string()]
        );
    }

    #[test]
    fn rejects_profit_chatter_as_negative_pattern() {
        assert_eq!(
            parse_message(&msg("Just closed in profit, great trade!")),
            Err(RejectReason::NegativePattern)
        );
    }

    #[test]
    fn negative_pattern_outranks_full_signal_structure() {
        let text = "EURUSD trade update\nSell\nEntry: 1.2345\nSL: 1.2400\nTP1: 1.2300";
        assert_eq!(
            parse_message(&msg(text)),
            Err(RejectReason::NegativePattern)
        );
    }

    #[test]
    fn rejects_marketing_without_keywords() {
        assert_eq!(
            parse_message(&msg("Subscribe to our channel for more signals")),
            Err(RejectReason::NoKeyword)
        );
    }

    #[test]
    fn rejects_bare_quote_with_missing_exit() {
        assert_eq!(
            parse_message(&msg("USDCAD SELL 1.37480")),
            Err(RejectReason::MissingExit)
        );
    }

    #[test]
    fn parsing_is_deterministic() {
        let text = "EURUSD\nSell\nEntry: 1.2345\nSL: 1.2400\nTP1: 1.2300";
        let first = parse_message(&msg(text)).unwrap();
        let second = parse_message(&msg(text)).unwrap();
        assert_eq!(first.symbol, second.symbol);
        assert_eq!(first.direction, second.direction);
        assert_eq!(first.entry, second.entry);
        assert_eq!(first.stop_loss, second.stop_loss);
        assert_eq!(first.take_profits, second.take_profits);
        assert_eq!(first.risk_reward, second.risk_reward);
        assert_eq!(first.formatted_text, second.formatted_text);
    }

    #[test]
    fn leading_and_trailing_whitespace_is_ignored() {
        let signal =
            parse_message(&msg("\n  GOLD BUY 3373.33\nTP1: 3380\nSL: 3365  \n")).unwrap();
        assert_eq!(signal.symbol, "GOLD");
    }

    #[test]
    fn emoji_decorated_signal_still_parses() {
        let text = "📊 #XAUUSD\nBuy limit 3350\n✔️ TP1: 3360\n🚫 SL: 3340";
        let signal = parse_message(&msg(text)).unwrap();
        assert_eq!(signal.symbol, "XAUUSD");
        assert_eq!(signal.direction, Direction::Buy);
        assert_eq!(signal.entry, "3350");
        assert_eq!(signal.take_profits, vec!["3360".to_string()]);
        assert_eq!(signal.stop_loss.as_deref(), Some("3340"));
    }
}
