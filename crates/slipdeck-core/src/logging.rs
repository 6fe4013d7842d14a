//! Logging facilities for Slipdeck.
//!
//! Slipdeck uses the `tracing` crate for instrumentation. Validation
//! rejections and lookup misses are logged as warnings rather than raised
//! as errors; the player runs inside a host page whose crash would be
//! unacceptable, so every runtime fault is resolved locally and surfaced
//! through the log instead.
//!
//! To see logs, install a subscriber in the embedding application:
//!
//! ```ignore
//! tracing_subscriber::fmt::init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem, e.g.
/// `RUST_LOG=slipdeck_core::observable=trace`.
pub mod targets {
    /// Observable value assignments and validator rejections.
    pub const OBSERVABLE: &str = "slipdeck_core::observable";
    /// Player state machine transitions.
    pub const PLAYER: &str = "slipdeck_player::player";
    /// Slide collection and lookup tables.
    pub const DECK: &str = "slipdeck_player::deck";
    /// Hierarchical numbering and table-of-contents derivation.
    pub const NUMBERING: &str = "slipdeck_player::numbering";
    /// UI mode registration.
    pub const REGISTRY: &str = "slipdeck_player::registry";
    /// Browser history synchronization.
    pub const HISTORY: &str = "slipdeck_player::history";
}
