//! Interactive view state that survives re-rendering.

use folio_types::ConfigKey;
use std::collections::{HashMap, HashSet};

/// Which boolean config labels show their "off" variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigToggles {
    flipped: HashSet<ConfigKey>,
}

impl ConfigToggles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches `key` between its two labels.
    pub fn toggle(&mut self, key: &ConfigKey) {
        if !self.flipped.remove(key) {
            self.flipped.insert(key.clone());
        }
    }

    /// 0 for the "on" label, 1 for "off".
    pub fn option(&self, key: &ConfigKey) -> usize {
        usize::from(self.flipped.contains(key))
    }
}

/// Per-entry view state: config toggles and the visible recipe of each carousel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub toggles: ConfigToggles,
    carousels: HashMap<String, usize>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn carousel(&self, key: &str) -> usize {
        self.carousels.get(key).copied().unwrap_or(0)
    }

    /// Moves the carousel under `key` one step, staying within `len` items.
    pub fn step_carousel(&mut self, key: &str, forward: bool, len: usize) {
        let current = self.carousel(key);
        let next = if forward {
            (current + 1).min(len.saturating_sub(1))
        } else {
            current.saturating_sub(1)
        };
        self.carousels.insert(key.to_string(), next);
    }
}
