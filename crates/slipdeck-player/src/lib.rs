//! Slide-deck player state machine.
//!
//! This crate turns an ordered list of slides into a navigable
//! presentation. It is the coordination layer between the reactive
//! primitive ([`slipdeck_core::ObservableValue`]) and the rendering
//! plugins, which stay outside this crate entirely:
//!
//! - **Deck**: the slide collection with hierarchical chapter numbers,
//!   lookup tables, and the derived table of contents.
//! - **Player**: the central state machine owning the observable state
//!   (UI mode, slide number, presentation mode, fade-out color) and its
//!   transition rules.
//! - **UiModeRegistry**: the open set of UI mode names claimed by
//!   plugins at startup.
//! - **History**: synchronization of the current slide with the
//!   browser's navigation history, behind a backend trait.
//!
//! Plugins register their UI modes, bind to the player's observables,
//! and write to them to request transitions; the player validates,
//! applies, and broadcasts. Faults at runtime are logged and absorbed;
//! a broken slide reference must not take down a live talk.

mod config;
mod deck;
mod error;
mod history;
mod numbering;
mod player;
mod registry;
mod slide;

pub use config::{Labels, PlayerConfig, PresentationMode};
pub use deck::Deck;
pub use error::{Error, Result};
pub use history::{HistoryBackend, HistoryState, NullHistory};
pub use numbering::{NumberingEngine, TocEntry, TocKind};
pub use player::Player;
pub use registry::UiModeRegistry;
pub use slide::{ChapterLevel, Slide};
