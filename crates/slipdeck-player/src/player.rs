//! The player state machine.
//!
//! [`Player`] owns the observable values that make up the presentation
//! state and enforces valid transitions. It renders nothing itself:
//! plugins register their UI modes, bind to the observables they care
//! about, and write to them to request transitions. Mode switching is a
//! pure broadcast of the new mode name; every bound plugin decides for
//! itself whether it is now the active one. There is no paired
//! disable/enable event, which removes a whole class of "who fires
//! first" ordering bugs.
//!
//! # Lifecycle
//!
//! ```
//! use std::sync::Arc;
//! use slipdeck_player::{Deck, NullHistory, Player, PlayerConfig, Slide};
//!
//! let player = Player::new(PlayerConfig::default(), Arc::new(NullHistory));
//! player.register_ui_mode("overview");
//! player.register_ui_mode("slideshow");
//!
//! let deck = Arc::new(Deck::new("Demo", vec![Slide::new("Hello")]));
//! player.init.bind(|_, _| { /* build UI now */ });
//! player.start(deck, None).unwrap();
//! assert!(player.ready.get());
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use slipdeck_core::{ObservableValue, logging::targets};

use crate::config::{PlayerConfig, PresentationMode};
use crate::deck::Deck;
use crate::error::{Error, Result};
use crate::history::{HistoryBackend, HistoryLock, HistoryState};
use crate::numbering::TocEntry;
use crate::registry::UiModeRegistry;

/// The UI mode deep links switch to.
const SLIDESHOW_MODE: &str = "slideshow";

type DeckSlot = Arc<RwLock<Option<Arc<Deck>>>>;

/// The central state machine of a presentation.
pub struct Player {
    /// Initialization has started; plugins may build their UI now.
    pub init: ObservableValue<bool>,
    /// The presentation is fully started.
    pub ready: ObservableValue<bool>,
    /// Name of the active theme. Validated against the configured set.
    pub theme: ObservableValue<String>,
    /// Name of the active UI mode. Validated against the registry.
    pub ui_mode: ObservableValue<String>,
    /// 1-based ordinal of the current slide among enabled slides.
    /// Validated against the composed deck's bounds.
    pub slide_number: ObservableValue<usize>,
    /// Whether slideshow mode shows slides, text, or both.
    pub presentation_mode: ObservableValue<PresentationMode>,
    /// A color name while a full-screen cover is active, `None` when the
    /// content is visible. Navigation commands no-op while this is set.
    pub fade_out_color: ObservableValue<Option<String>>,

    config: PlayerConfig,
    deck: DeckSlot,
    ui_modes: Arc<UiModeRegistry>,
    history_lock: HistoryLock,
    started: AtomicBool,
}

impl Player {
    /// Create a player with the given configuration and history backend.
    ///
    /// This wires up the validators and the history binding but starts
    /// nothing; call [`start`](Self::start) once the slide list is
    /// composed.
    pub fn new(config: PlayerConfig, history: Arc<dyn HistoryBackend>) -> Self {
        let deck: DeckSlot = Arc::new(RwLock::new(None));
        let ui_modes = Arc::new(UiModeRegistry::new());
        let history_lock = HistoryLock::new();

        let ui_mode = ObservableValue::new(String::new());
        let registered = Arc::clone(&ui_modes);
        ui_mode.add_validator(move |name: &String| {
            if registered.contains(name) {
                true
            } else {
                tracing::warn!(target: targets::PLAYER, mode = %name, "unknown UI mode");
                false
            }
        });

        let theme = ObservableValue::new(String::new());
        let known_themes = config.themes.clone();
        theme.add_validator(move |name: &String| {
            if known_themes.is_empty() || known_themes.iter().any(|known| known == name) {
                true
            } else {
                tracing::warn!(target: targets::PLAYER, theme = %name, "unknown theme");
                false
            }
        });

        let slide_number = ObservableValue::new(0usize);
        let deck_for_validation = Arc::clone(&deck);
        slide_number.add_validator(move |nr: &usize| {
            let slot = deck_for_validation.read();
            let Some(deck) = slot.as_ref() else {
                tracing::warn!(target: targets::PLAYER, "no presentation composed yet");
                return false;
            };
            let amount = deck.amount_visible.get();
            if *nr >= 1 && *nr <= amount {
                true
            } else {
                tracing::warn!(
                    target: targets::PLAYER,
                    slide = nr,
                    amount,
                    "slide number out of range"
                );
                false
            }
        });

        if !config.embedded {
            let deck_for_history = Arc::clone(&deck);
            let lock = history_lock.clone();
            slide_number.bind(move |new, old| {
                if lock.is_held() {
                    return;
                }
                let Some(deck) = deck_for_history.read().as_ref().cloned() else {
                    return;
                };
                let Some(slide) = deck.slide_at(*new) else {
                    return;
                };
                let key = slide.id.clone().unwrap_or_else(|| slide.number.clone());
                let state = HistoryState {
                    slide_id: key.clone(),
                }
                .to_json();
                let url = format!("#{key}");
                tracing::debug!(target: targets::HISTORY, slide = %key, first = *old == 0, "writing history");
                if *old == 0 {
                    history.replace_state(&state, &url);
                } else {
                    history.push_state(&state, &url);
                }
            });
        }

        Self {
            init: ObservableValue::new(false),
            ready: ObservableValue::new(false),
            theme,
            ui_mode,
            slide_number,
            presentation_mode: ObservableValue::default(),
            fade_out_color: ObservableValue::new(None),
            config,
            deck,
            ui_modes,
            history_lock,
            started: AtomicBool::new(false),
        }
    }

    /// The configuration this player was built with.
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// The composed deck, once [`start`](Self::start) has run.
    pub fn deck(&self) -> Option<Arc<Deck>> {
        self.deck.read().clone()
    }

    /// Register a UI mode on behalf of a plugin.
    ///
    /// Returns `false` if the name is already owned by another plugin,
    /// which must then skip its own setup.
    pub fn register_ui_mode(&self, name: &str) -> bool {
        self.ui_modes.register(name)
    }

    /// Run the presentation.
    ///
    /// `fragment` is the document's location fragment without the `#`;
    /// when it names a slide (hierarchical number or id), that slide
    /// wins over the configured start slide.
    ///
    /// The only hard stop: a deck without slides is structural
    /// misconfiguration and playback does not proceed. Everything after
    /// that point degrades with warnings instead of failing.
    pub fn start(&self, deck: Arc<Deck>, fragment: Option<&str>) -> Result<()> {
        if deck.amount_all.get() == 0 {
            return Err(Error::EmptyPresentation);
        }

        if !self.started.swap(true, Ordering::SeqCst) {
            *self.deck.write() = Some(Arc::clone(&deck));

            self.init.set(true);
            self.theme.set(self.config.theme.clone());
            self.ui_mode.set(self.config.mode.clone());

            let initial = fragment
                .filter(|f| !f.is_empty())
                .and_then(|f| deck.resolve(f))
                .unwrap_or(self.config.slide_number);
            self.slide_number.set(initial);
            self.presentation_mode.set(self.config.presentation_mode);

            tracing::debug!(
                target: targets::PLAYER,
                slides = deck.amount_visible.get(),
                initial,
                "presentation initialized"
            );
        }

        self.ready.set(true);
        Ok(())
    }

    /// Jump to a slide by hierarchical number, ordinal, or stable id.
    ///
    /// Returns `true` if the slide was found (even when it is already
    /// the current one, in which case nothing is broadcast). A miss is
    /// logged by the deck and left at that.
    pub fn goto_slide(&self, key: &str) -> bool {
        let Some(deck) = self.deck() else {
            tracing::warn!(target: targets::PLAYER, "goto before presentation composed");
            return false;
        };
        match deck.resolve(key) {
            Some(ordinal) => {
                self.slide_number.set(ordinal);
                true
            }
            None => false,
        }
    }

    /// Advance to the next slide. No-op during a fade-out or at the end.
    pub fn next_slide(&self) {
        if self.fade_blocked() {
            return;
        }
        let Some(deck) = self.deck() else { return };
        let current = self.slide_number.get();
        if current < deck.amount_visible.get() {
            self.slide_number.set(current + 1);
        }
    }

    /// Go back to the previous slide. No-op during a fade-out or at the
    /// beginning.
    pub fn previous_slide(&self) {
        if self.fade_blocked() {
            return;
        }
        let current = self.slide_number.get();
        if current > 1 {
            self.slide_number.set(current - 1);
        }
    }

    /// Toggle between showing slides with and without detail text.
    /// No-op during a fade-out.
    pub fn toggle_presentation_mode(&self) {
        if self.fade_blocked() {
            return;
        }
        let next = match self.presentation_mode.get() {
            PresentationMode::Both => PresentationMode::SlidesOnly,
            PresentationMode::SlidesOnly | PresentationMode::TextOnly => PresentationMode::Both,
        };
        self.presentation_mode.set(next);
    }

    /// Fade the content out behind a full-screen cover of the given
    /// color, or fade back in when that color is already covering.
    ///
    /// Requesting a different color while covered simply restarts the
    /// transition with the new color.
    pub fn toggle_fade_out(&self, color: &str) {
        let covered = self
            .fade_out_color
            .with(|current| current.as_deref() == Some(color));
        if covered {
            self.fade_out_color.set(None);
        } else {
            self.fade_out_color.set(Some(color.to_string()));
        }
    }

    /// Handle a browser-driven history change (back/forward).
    ///
    /// The target slide comes from the entry's serialized state, or the
    /// current location fragment, or falls back to the first slide. The
    /// assignment runs with the re-entrancy guard held so it does not
    /// push a duplicate entry, and following a deep link always lands in
    /// slideshow mode.
    pub fn on_history_changed(&self, state: Option<&str>, fragment: Option<&str>) {
        let target = state
            .and_then(HistoryState::parse)
            .map(|state| state.slide_id)
            .or_else(|| {
                fragment
                    .filter(|f| !f.is_empty())
                    .map(|f| f.to_string())
            });

        {
            let _guard = self.history_lock.acquire();
            match target {
                Some(target) => {
                    self.goto_slide(&target);
                }
                // An entry without state on a fragmentless URL: back at
                // the presentation's starting point.
                None => {
                    self.slide_number.set(1);
                }
            }
        }

        if self.ui_mode.get() != SLIDESHOW_MODE {
            self.ui_mode.set(SLIDESHOW_MODE.to_string());
        }
    }

    /// Handle a click on an in-page `#…` link: jump to the named slide
    /// and switch into slideshow mode.
    pub fn on_link_clicked(&self, fragment: &str) {
        if fragment.is_empty() {
            return;
        }
        self.goto_slide(fragment);
        if self.ui_mode.get() != SLIDESHOW_MODE {
            self.ui_mode.set(SLIDESHOW_MODE.to_string());
        }
    }

    /// Disable a slide, removing it from navigation.
    ///
    /// When the current slide is disabled, the next enabled slide takes
    /// its place; if it was the last one, the player steps back instead.
    pub fn disable_slide(&self, key: &str) {
        let Some(deck) = self.deck() else { return };
        let current = self.slide_number.get();
        let current_index = deck.slide_at(current).map(|slide| slide.index);
        let target_index = deck.get(key).map(|slide| slide.index);

        if !deck.set_enabled(key, false) {
            return;
        }

        if current_index.is_some() && current_index == target_index {
            let amount = deck.amount_visible.get();
            if current > amount {
                // The disabled slide was the last one.
                self.slide_number.set(amount);
            }
            // Otherwise its successor moved into the current ordinal;
            // plugins re-render off the amount_visible broadcast.
        } else if let Some(index) = current_index {
            // Keep pointing at the same slide if its ordinal shifted.
            if let Some(ordinal) = deck.ordinal_of_index(index) {
                if ordinal != current {
                    self.slide_number.set_silent(ordinal);
                }
            }
        }
    }

    /// Re-enable a previously disabled slide.
    pub fn enable_slide(&self, key: &str) {
        let Some(deck) = self.deck() else { return };
        let current = self.slide_number.get();
        let current_index = deck.slide_at(current).map(|slide| slide.index);

        if !deck.set_enabled(key, true) {
            return;
        }

        // The current slide's ordinal may have shifted up.
        if let Some(index) = current_index {
            if let Some(ordinal) = deck.ordinal_of_index(index) {
                if ordinal != current {
                    self.slide_number.set_silent(ordinal);
                }
            }
        }
    }

    /// The table of contents of the composed deck, for overview and
    /// print plugins.
    pub fn table_of_contents(&self) -> Vec<TocEntry> {
        match self.deck() {
            Some(deck) => deck.table_of_contents(),
            None => {
                tracing::warn!(target: targets::PLAYER, "table of contents before presentation composed");
                Vec::new()
            }
        }
    }

    fn fade_blocked(&self) -> bool {
        self.fade_out_color.with(|color| color.is_some())
    }
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("ui_mode", &self.ui_mode.get())
            .field("slide_number", &self.slide_number.get())
            .field("ready", &self.ready.get())
            .finish()
    }
}
