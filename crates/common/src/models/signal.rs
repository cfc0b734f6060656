use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Position side of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "SELL")]
    Sell,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Buy => "BUY",
            Direction::Sell => "SELL",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("invalid direction: {0}")]
pub struct DirectionParseError(String);

impl FromStr for Direction {
    type Err = DirectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUY" => Ok(Direction::Buy),
            "SELL" => Ok(Direction::Sell),
            other => Err(DirectionParseError(other.to_string())),
        }
    }
}

/// The validated record produced by the signal assembler. Built exactly once
/// per accepted message and immutable afterwards. Price fields keep the
/// decimal text exactly as it appeared in the message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedSignal {
    pub symbol: String,
    pub direction: Direction,
    pub entry: String,
    pub stop_loss: Option<String>,
    /// Distinct take-profit levels in order of first detection.
    pub take_profits: Vec<String>,
    pub risk_reward: Option<String>,
    pub formatted_text: String,
    pub source_channel: String,
    pub original_text: String,
    pub created_at: DateTime<Utc>,
}

/// A persisted signal row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    pub id: i64,
    pub symbol: String,
    pub direction: Direction,
    pub entry: String,
    pub stop_loss: Option<String>,
    pub take_profits: Vec<String>,
    pub risk_reward: Option<String>,
    pub formatted_text: String,
    pub source_channel: String,
    pub original_text: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_round_trips_through_str() {
        assert_eq!("BUY".parse::<Direction>().unwrap(), Direction::Buy);
        assert_eq!("SELL".parse::<Direction>().unwrap(), Direction::Sell);
        assert_eq!(Direction::Buy.to_string(), "BUY");
        assert!("HOLD".parse::<Direction>().is_err());
    }
}
