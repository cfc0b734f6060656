pub mod config;
pub mod message;
pub mod signal;

pub use config::RelayConfig;
pub use message::RawMessage;
pub use signal::{Direction, ParsedSignal, Signal};
