//! UI mode registration.
//!
//! UI modes are an open set of names claimed at runtime by whichever
//! plugins happen to load, not a compile-time enum. The registry is a
//! write-once-per-name table: re-registration is rejected so that a
//! plugin loaded twice can notice the name is already owned and skip its
//! own setup.

use std::collections::HashSet;

use parking_lot::Mutex;
use slipdeck_core::logging::targets;

/// Name table for registered UI modes.
#[derive(Debug, Default)]
pub struct UiModeRegistry {
    modes: Mutex<HashSet<String>>,
}

impl UiModeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a UI mode name.
    ///
    /// Returns `true` on success. A name that is already registered is
    /// reported and left untouched; the caller receives `false` and must
    /// handle it gracefully.
    pub fn register(&self, name: &str) -> bool {
        let mut modes = self.modes.lock();
        if modes.contains(name) {
            tracing::warn!(target: targets::REGISTRY, mode = name, "UI mode already registered");
            return false;
        }
        modes.insert(name.to_string());
        tracing::debug!(target: targets::REGISTRY, mode = name, "registered UI mode");
        true
    }

    /// Check whether a mode name has been registered.
    pub fn contains(&self, name: &str) -> bool {
        self.modes.lock().contains(name)
    }

    /// Get the number of registered modes.
    pub fn len(&self) -> usize {
        self.modes.lock().len()
    }

    /// Check whether no mode has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.modes.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_new_modes() {
        let registry = UiModeRegistry::new();
        assert!(registry.register("overview"));
        assert!(registry.register("slideshow"));
        assert!(registry.contains("overview"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let registry = UiModeRegistry::new();
        assert!(registry.register("print"));
        assert!(!registry.register("print"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unknown_modes_are_not_contained() {
        let registry = UiModeRegistry::new();
        assert!(registry.is_empty());
        assert!(!registry.contains("slideshow"));
    }
}
