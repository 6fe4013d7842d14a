//! Error types for the player.
//!
//! Almost nothing in the player is an error: validation rejections,
//! lookup misses, and duplicate registrations are warnings followed by a
//! no-op, because a broken slide reference must not crash a live talk.
//! Only structural misconfiguration discovered at startup surfaces here.

/// Result type alias for player operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when setting up the player.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The composed presentation contains no slides at all.
    #[error("presentation has no slides")]
    EmptyPresentation,

    /// The player configuration could not be parsed.
    #[error("failed to parse player configuration: {0}")]
    Config(#[from] toml::de::Error),
}
