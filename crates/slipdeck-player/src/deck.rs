//! The slide collection.
//!
//! A [`Deck`] owns the ordered slide list of one presentation, the
//! derived lookup tables (hierarchical number → slide, id → slide), and
//! the table of contents. Slides are addressed three ways:
//!
//! - by hierarchical number ("2.1"),
//! - by positional ordinal (1-based position among enabled slides),
//! - by stable id.
//!
//! Hierarchical numbers are assigned once at composition time and never
//! recomputed; disabling a slide removes it from the ordinal sequence
//! and the lookup tables but leaves a gap in the numbering. Ordinals, by
//! contrast, always shift to stay dense over the enabled slides.

use std::collections::HashMap;

use parking_lot::RwLock;
use slipdeck_core::{ObservableValue, logging::targets};

use crate::numbering::{self, TocEntry};
use crate::slide::Slide;

/// A collection of slides with observable counts and derived lookups.
pub struct Deck {
    /// Presentation title.
    pub title: ObservableValue<String>,
    /// Total amount of slides, enabled or not.
    pub amount_all: ObservableValue<usize>,
    /// Amount of enabled slides; re-derived on every enable/disable.
    pub amount_visible: ObservableValue<usize>,

    slides: RwLock<Vec<Slide>>,
    /// Source indices of enabled slides, in order. Ordinal n is entry n-1.
    enabled: RwLock<Vec<usize>>,
    /// Enabled slides only; a disabled slide's id resolves to nothing.
    by_id: RwLock<HashMap<String, usize>>,
    by_number: RwLock<HashMap<String, usize>>,
    toc: RwLock<Vec<TocEntry>>,
}

impl Deck {
    /// Compose a deck from slides in source order.
    ///
    /// Assigns source indices and hierarchical numbers (including to
    /// slides that start out disabled, so enabling them later never
    /// renumbers anything) and builds the lookup tables.
    pub fn new(title: impl Into<String>, mut slides: Vec<Slide>) -> Self {
        numbering::assign_numbers(&mut slides);

        let deck = Self {
            title: ObservableValue::new(title.into()),
            amount_all: ObservableValue::new(0),
            amount_visible: ObservableValue::new(0),
            slides: RwLock::new(slides),
            enabled: RwLock::new(Vec::new()),
            by_id: RwLock::new(HashMap::new()),
            by_number: RwLock::new(HashMap::new()),
            toc: RwLock::new(Vec::new()),
        };
        deck.update_slide_list();
        deck
    }

    /// Resolve a slide key to its 1-based ordinal among enabled slides.
    ///
    /// Keys are tried as exact hierarchical number, then as a plain
    /// ordinal, then as a stable id. Returns `None` (after a warning)
    /// when nothing matches or the match is out of range.
    pub fn resolve(&self, key: &str) -> Option<usize> {
        if let Some(&index) = self.by_number.read().get(key) {
            return self.ordinal_of_index(index);
        }
        if let Ok(ordinal) = key.parse::<usize>() {
            if ordinal >= 1 && ordinal <= self.enabled.read().len() {
                return Some(ordinal);
            }
            tracing::warn!(target: targets::DECK, key, "slide ordinal out of range");
            return None;
        }
        if let Some(&index) = self.by_id.read().get(key) {
            return self.ordinal_of_index(index);
        }
        tracing::warn!(target: targets::DECK, key, "no slide with this number or id");
        None
    }

    /// Get a copy of the slide a key resolves to.
    pub fn get(&self, key: &str) -> Option<Slide> {
        self.resolve(key).and_then(|ordinal| self.slide_at(ordinal))
    }

    /// Get a copy of the enabled slide at the given 1-based ordinal.
    pub fn slide_at(&self, ordinal: usize) -> Option<Slide> {
        let index = *self.enabled.read().get(ordinal.checked_sub(1)?)?;
        self.slides.read().get(index).cloned()
    }

    /// Get the 1-based ordinal of a slide by its source index, or `None`
    /// if the slide is disabled.
    pub fn ordinal_of_index(&self, index: usize) -> Option<usize> {
        self.enabled
            .read()
            .iter()
            .position(|&other| other == index)
            .map(|position| position + 1)
    }

    /// Enable or disable a slide, recomputing ordinals and lookups.
    ///
    /// Unlike [`resolve`](Self::resolve), the key here is also matched
    /// against disabled slides (by number or id), since a disabled slide
    /// could otherwise never be re-enabled. Returns `true` if a slide
    /// was found and its state actually changed.
    pub fn set_enabled(&self, key: &str, enabled: bool) -> bool {
        let Some(index) = self.find_any(key) else {
            tracing::warn!(target: targets::DECK, key, "cannot toggle unknown slide");
            return false;
        };

        {
            let mut slides = self.slides.write();
            let slide = &mut slides[index];
            if slide.enabled == enabled {
                return false;
            }
            slide.enabled = enabled;
            tracing::debug!(
                target: targets::DECK,
                index,
                number = %slide.number,
                enabled,
                "toggled slide"
            );
        }

        self.update_slide_list();
        true
    }

    /// The table of contents over the enabled slides.
    pub fn table_of_contents(&self) -> Vec<TocEntry> {
        self.toc.read().clone()
    }

    /// Search all slides, enabled or not, by number, ordinal, or id.
    fn find_any(&self, key: &str) -> Option<usize> {
        let slides = self.slides.read();
        if let Some(slide) = slides.iter().find(|s| s.number == key) {
            return Some(slide.index);
        }
        drop(slides);

        if let Ok(ordinal) = key.parse::<usize>() {
            return self.enabled.read().get(ordinal.checked_sub(1)?).copied();
        }

        self.slides
            .read()
            .iter()
            .find(|s| s.id.as_deref() == Some(key))
            .map(|s| s.index)
    }

    /// Re-derive the enabled list, the lookup tables, the table of
    /// contents, and the observable counts.
    fn update_slide_list(&self) {
        let slides = self.slides.read();

        let enabled: Vec<usize> = slides
            .iter()
            .filter(|slide| slide.enabled)
            .map(|slide| slide.index)
            .collect();

        let mut by_id = HashMap::new();
        let mut by_number = HashMap::new();
        for &index in &enabled {
            let slide = &slides[index];
            if let Some(id) = &slide.id {
                if by_id.insert(id.clone(), index).is_some() {
                    tracing::warn!(target: targets::DECK, id = %id, "duplicate slide id, keeping last");
                }
            }
            if by_number.contains_key(&slide.number) {
                tracing::warn!(
                    target: targets::DECK,
                    number = %slide.number,
                    "duplicate slide number, keeping first"
                );
            } else {
                by_number.insert(slide.number.clone(), index);
            }
        }

        let toc = numbering::build_toc(&slides, &enabled);

        let amount_all = slides.len();
        let amount_visible = enabled.len();
        drop(slides);

        *self.enabled.write() = enabled;
        *self.by_id.write() = by_id;
        *self.by_number.write() = by_number;
        *self.toc.write() = toc;

        self.amount_all.set(amount_all);
        self.amount_visible.set(amount_visible);
    }
}

impl std::fmt::Debug for Deck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deck")
            .field("title", &self.title.get())
            .field("amount_all", &self.amount_all.get())
            .field("amount_visible", &self.amount_visible.get())
            .finish()
    }
}
