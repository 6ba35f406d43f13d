//! Statistics table keyed by position identity.
//!
//! The table replaces an explicit tree: a node "exists" once its key has an
//! entry, and transpositions share one entry.

use crate::stats::Stats;
use mnk_core::{Mark, PositionKey};
use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
pub struct StatsTable {
    entries: HashMap<PositionKey, Stats>,
}

impl StatsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &PositionKey) -> Option<&Stats> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &PositionKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Entry for `key`, created as `(0, 0, 0)` if missing.
    pub fn ensure(&mut self, key: &PositionKey) -> &mut Stats {
        self.entries.entry(key.clone()).or_default()
    }

    /// Count one playout through `key`.
    pub fn record(&mut self, key: &PositionKey, winner: Option<Mark>, root_player: Mark) {
        self.ensure(key).record(winner, root_player);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PositionKey, &Stats)> {
        self.entries.iter()
    }
}
