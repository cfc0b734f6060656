use chrono::{DateTime, Utc};

/// A chat message as delivered by the transport. The parsing core never
/// mutates it; the text may span multiple lines and carry emoji or markup.
#[derive(Debug, Clone)]
pub struct RawMessage {
    pub text: String,
    /// Numeric chat id or textual handle, opaque to the parser.
    pub source_channel: String,
    pub received_at: DateTime<Utc>,
}
