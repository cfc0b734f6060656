//! Field accumulation across the message body and final assembly into a
//! `ParsedSignal`. All-or-nothing: either every mandatory field is present
//! or the whole message is rejected.

use chrono::Utc;
use common::models::{Direction, ParsedSignal};

use crate::extract;
use crate::outcome::RejectReason;
use crate::rules::{
    ENTRY_EXCLUDES, ENTRY_LABELS, RISK_REWARD_HINTS, SL_EXCLUDES, SL_HINTS, TP_EXCLUDES, TP_HINTS,
};

#[derive(Debug, Default)]
struct Fields {
    symbol: Option<String>,
    direction: Option<Direction>,
    entry: Option<String>,
    stop_loss: Option<String>,
    take_profits: Vec<String>,
    risk_reward: Option<String>,
}

/// Walk the message lines and accumulate extracted fields. First found wins
/// for every field except take-profits, which collect every distinct value
/// in detection order.
fn accumulate(text: &str) -> Fields {
    let mut fields = Fields::default();
    let buy_sell_line = |lower: &str| ["buy", "sell"].iter().any(|w| lower.contains(w));

    for (idx, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.chars().count() < 3 {
            continue;
        }
        let lower = line.to_lowercase();

        if fields.symbol.is_none() {
            fields.symbol = extract::symbol(line);
        }

        if fields.direction.is_none() {
            fields.direction = extract::direction(&lower);
        }

        if fields.entry.is_none() {
            if ENTRY_LABELS.iter().any(|w| lower.contains(w)) {
                fields.entry = extract::price(line);
            } else if fields.symbol.is_some()
                && !ENTRY_EXCLUDES.iter().any(|w| lower.contains(w))
            {
                // "GOLD BUY 3373.33" style: only a price riding on a buy/sell
                // word counts as an entry here. A symbol line without one is
                // consumed by this branch and left for a later labeled line.
                if buy_sell_line(&lower) {
                    fields.entry = extract::price(line);
                }
            } else if fields.symbol.is_some() && fields.direction.is_some() && idx == 0 {
                fields.entry = extract::price(line);
            }
        }

        if fields.stop_loss.is_none()
            && SL_HINTS.iter().any(|w| lower.contains(w))
            && !SL_EXCLUDES.iter().any(|w| lower.contains(w))
        {
            fields.stop_loss = extract::price(line);
        }

        if TP_HINTS.iter().any(|w| lower.contains(w))
            && !TP_EXCLUDES.iter().any(|w| lower.contains(w))
        {
            if let Some(tp) = extract::price(line) {
                if !fields.take_profits.contains(&tp) {
                    fields.take_profits.push(tp);
                }
            }
        }

        if fields.risk_reward.is_none() && RISK_REWARD_HINTS.iter().any(|w| lower.contains(w)) {
            fields.risk_reward = extract::risk_reward(line);
        }
    }

    fields
}

/// Canonical rendering consumed downstream; the template is parsed by other
/// systems, so the exact bytes matter.
fn render(
    symbol: &str,
    direction: Direction,
    entry: &str,
    stop_loss: Option<&str>,
    take_profits: &[String],
    risk_reward: Option<&str>,
) -> String {
    let mut out = format!("📊 #{symbol}\n");
    out.push_str(&format!("📉 Position: {direction}\n"));
    if let Some(rr) = risk_reward {
        out.push_str(&format!("❗️ R/R : {rr}\n"));
    }
    out.push_str(&format!("💲 Entry Price : {entry}\n"));
    for (idx, tp) in take_profits.iter().enumerate() {
        out.push_str(&format!("✔️ TP{} : {tp}\n", idx + 1));
    }
    if let Some(sl) = stop_loss {
        out.push_str(&format!("🚫 Stop Loss : {sl}"));
    }
    out
}

/// Assemble the final record, or reject if a mandatory field never showed up.
/// A message with no directional cue anywhere defaults to BUY; that is a
/// policy, not an inference.
pub fn build(text: &str, source_channel: &str) -> Result<ParsedSignal, RejectReason> {
    let fields = accumulate(text);

    let symbol = fields.symbol.ok_or(RejectReason::MissingSymbol)?;
    let entry = fields.entry.ok_or(RejectReason::MissingEntry)?;
    if fields.stop_loss.is_none() && fields.take_profits.is_empty() {
        return Err(RejectReason::MissingExit);
    }
    let direction = fields.direction.unwrap_or(Direction::Buy);

    let formatted_text = render(
        &symbol,
        direction,
        &entry,
        fields.stop_loss.as_deref(),
        &fields.take_profits,
        fields.risk_reward.as_deref(),
    );

    Ok(ParsedSignal {
        symbol,
        direction,
        entry,
        stop_loss: fields.stop_loss,
        take_profits: fields.take_profits,
        risk_reward: fields.risk_reward,
        formatted_text,
        source_channel: source_channel.to_string(),
        original_text: text.to_string(),
        created_at: Utc::now(),
    })
}
