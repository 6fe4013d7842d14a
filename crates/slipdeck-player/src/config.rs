//! Player configuration.
//!
//! All values have defaults matching a plain, standalone presentation;
//! the embedding page overrides what it needs. The whole struct is
//! serde-derived so a host can keep it in a TOML block next to the
//! presentation source.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Which parts of a slide the slideshow mode shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PresentationMode {
    /// Slide content and detail text side by side.
    #[default]
    Both,
    /// Slide content only (beamer-friendly).
    SlidesOnly,
    /// Detail text only.
    TextOnly,
}

/// UI label substitutions.
///
/// The only internationalization the player offers: every built-in label
/// can be replaced wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub next: String,
    pub previous: String,
    pub goto: String,
    pub view_menu: String,
    pub overview: String,
    pub slide_view: String,
    pub print_view: String,
    pub presentation_mode: String,
    pub navigation: String,
    pub slide: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            next: "Next".into(),
            previous: "Previous".into(),
            goto: "Go to".into(),
            view_menu: "View".into(),
            overview: "Overview".into(),
            slide_view: "Slides".into(),
            print_view: "Print".into(),
            presentation_mode: "Presentation Mode".into(),
            navigation: "Navigation".into(),
            slide: "Slide".into(),
        }
    }
}

/// Configuration for a [`Player`](crate::Player).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// UI mode active at startup. Must be registered by a plugin before
    /// the player starts, or the initial mode assignment is rejected.
    pub mode: String,
    /// Slide shown at startup when no deep link overrides it.
    pub slide_number: usize,
    /// Initial presentation mode.
    pub presentation_mode: PresentationMode,
    /// Theme active at startup.
    pub theme: String,
    /// Theme names the host page ships. An empty list accepts any name.
    pub themes: Vec<String>,
    /// Embedded players leave the window title and the browser history
    /// alone.
    pub embedded: bool,
    /// UI label substitutions.
    pub labels: Labels,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            mode: "overview".into(),
            slide_number: 1,
            presentation_mode: PresentationMode::default(),
            theme: "white".into(),
            themes: vec!["white".into(), "black".into()],
            embedded: false,
            labels: Labels::default(),
        }
    }
}

impl PlayerConfig {
    /// Parse a configuration from a TOML document.
    ///
    /// Missing keys fall back to their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}
