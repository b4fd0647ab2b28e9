//! The set of selected leaf ids.
//!
//! The store is the source of truth for what is selected. Every mutation also
//! writes the `selected` flag on the affected catalog items so the two never
//! disagree. Categories are never members.

use std::collections::HashSet;

use tracing::debug;

use crate::menu::aggregate::selectable_leaves;
use crate::menu::model::Catalog;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SelectionStore {
    selected: HashSet<String>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected ids in catalog order.
    pub fn ordered_ids(&self, catalog: &Catalog) -> Vec<String> {
        catalog
            .iter()
            .filter(|item| self.contains(&item.id))
            .map(|item| item.id.clone())
            .collect()
    }

    /// Flip a single leaf. Returns the new state, or `None` when `id` is a
    /// category or unknown.
    pub fn toggle(&mut self, catalog: &mut Catalog, id: &str) -> Option<bool> {
        let target = !self.contains(id);
        self.set(catalog, id, target).then_some(target)
    }

    /// Select every leaf under `id`, or clear them all if they already are.
    ///
    /// Returns the state applied, or `None` when there is nothing selectable
    /// under `id`.
    pub fn toggle_category(&mut self, catalog: &mut Catalog, id: &str) -> Option<bool> {
        let leaves = selectable_leaves(catalog, id);
        if leaves.is_empty() {
            return None;
        }
        let all_selected = leaves.iter().all(|leaf| self.contains(leaf));
        let target = !all_selected;
        for leaf in &leaves {
            self.set(catalog, leaf, target);
        }
        debug!(category = id, selected = target, leaves = leaves.len(), "category toggled");
        Some(target)
    }

    /// Set every leaf under `scope` to `value`. Returns how many changed.
    pub fn select_all(&mut self, catalog: &mut Catalog, scope: &str, value: bool) -> usize {
        let changed = selectable_leaves(catalog, scope)
            .iter()
            .filter(|leaf| self.contains(leaf) != value)
            .cloned()
            .collect::<Vec<_>>();
        for leaf in &changed {
            self.set(catalog, leaf, value);
        }
        changed.len()
    }

    /// Add every item marked `default`. Leaves existing selections alone.
    pub fn apply_defaults(&mut self, catalog: &mut Catalog) {
        let defaults: Vec<String> = catalog
            .iter()
            .filter(|item| item.default && item.is_selectable())
            .map(|item| item.id.clone())
            .collect();
        for id in &defaults {
            self.set(catalog, id, true);
        }
    }

    /// Clear everything, then select exactly the defaults.
    pub fn reset_all_selections(&mut self, catalog: &mut Catalog) {
        self.clear(catalog);
        self.apply_defaults(catalog);
    }

    pub fn clear(&mut self, catalog: &mut Catalog) {
        for id in self.selected.drain() {
            if let Some(item) = catalog.get_mut(&id) {
                item.selected = false;
            }
        }
    }

    /// Select `id` if it is a selectable leaf. Returns whether it was accepted.
    pub fn insert(&mut self, catalog: &mut Catalog, id: &str) -> bool {
        self.set(catalog, id, true)
    }

    /// True when every catalog item's `selected` flag matches membership.
    pub fn mirrors(&self, catalog: &Catalog) -> bool {
        catalog
            .iter()
            .all(|item| item.selected == self.contains(&item.id))
            && self
                .selected
                .iter()
                .all(|id| catalog.get(id).is_some_and(|item| item.is_selectable()))
    }

    /// Apply `value` to one leaf and its mirror flag.
    ///
    /// Ignores categories and unknown ids. Returns whether `id` was a leaf.
    fn set(&mut self, catalog: &mut Catalog, id: &str, value: bool) -> bool {
        let Some(item) = catalog.get_mut(id) else {
            return false;
        };
        if !item.is_selectable() {
            return false;
        }
        item.selected = value;
        if value {
            self.selected.insert(item.id.clone());
        } else {
            self.selected.remove(id);
        }
        true
    }
}
