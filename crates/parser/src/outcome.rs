use thiserror::Error;

/// Why a message was classified as not-a-signal. A rejection is the expected
/// outcome for most chat traffic, not a failure: callers log it at a low
/// severity and drop the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("no trading keyword present")]
    NoKeyword,
    #[error("matched a known non-signal phrasing")]
    NegativePattern,
    #[error("message too short to be a signal")]
    TooShort,
    #[error("missing structural signal components")]
    InsufficientStructure,
    #[error("no tradable symbol found")]
    MissingSymbol,
    #[error("no entry price found")]
    MissingEntry,
    #[error("neither stop loss nor take profit found")]
    MissingExit,
}
