//! Reactive core for Slipdeck.
//!
//! This crate provides the single primitive everything else in the player
//! is built from: [`ObservableValue<T>`], a reactive single-value cell with
//! a validator chain and synchronous change notification. UI plugins bind
//! callbacks to the player's observables and write to them to request state
//! transitions; the observable validates, applies, and notifies.
//!
//! # Example
//!
//! ```
//! use slipdeck_core::ObservableValue;
//!
//! let slide_number = ObservableValue::new(0usize);
//!
//! // Reject numbers outside the presentation.
//! slide_number.add_validator(|nr| *nr >= 1 && *nr <= 10);
//!
//! let id = slide_number.bind(|new, old| {
//!     println!("slide {old} -> {new}");
//! });
//!
//! assert!(slide_number.set(3));   // accepted, subscribers notified
//! assert!(!slide_number.set(99)); // rejected, value unchanged
//! assert!(!slide_number.set(3));  // no change, no notification
//!
//! slide_number.unbind(id);
//! ```

mod observable;
pub mod logging;

pub use observable::{ConnectionId, ObservableValue};
