use serde::{Deserialize, Serialize};

/// Channel configuration for the relay. Source entries are numeric chat ids
/// or @handles; an empty list means "accept every channel the bot can see".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelayConfig {
    pub from_channels: Vec<String>,
    pub to_channel: Option<String>,
}
