//! Selection status of categories, computed from their leaf descendants.
//!
//! Everything here is recomputed from the store on every call. Nothing is
//! cached, so a status can never lag behind a mutation.

use std::collections::HashSet;

use crate::menu::model::Catalog;
use crate::menu::selection::SelectionStore;

/// How many selectable leaves under a node are selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStatus {
    /// None selected, or nothing selectable at all.
    Empty,
    Partial,
    Full,
}

impl SelectionStatus {
    pub fn glyph(self) -> char {
        match self {
            Self::Empty => '○',
            Self::Partial => '◐',
            Self::Full => '●',
        }
    }
}

/// Every leaf reachable from `id` through `children`, in display order.
///
/// Descends through nested categories of any depth. A leaf id yields itself.
/// Unknown ids yield nothing. Items shared between branches are listed once,
/// and a loop in the data is cut at the point it closes.
pub fn selectable_leaves(catalog: &Catalog, id: &str) -> Vec<String> {
    let mut leaves = Vec::new();
    let mut seen = HashSet::new();
    let mut path = HashSet::new();
    collect(catalog, id, &mut path, &mut seen, &mut leaves);
    leaves
}

fn collect<'a>(
    catalog: &'a Catalog,
    id: &'a str,
    path: &mut HashSet<&'a str>,
    seen: &mut HashSet<&'a str>,
    leaves: &mut Vec<String>,
) {
    let Some(item) = catalog.get(id) else {
        return;
    };
    if !item.is_category {
        if seen.insert(&item.id) {
            leaves.push(item.id.clone());
        }
        return;
    }
    if !path.insert(&item.id) {
        return;
    }
    for child in &item.children {
        collect(catalog, child, path, seen, leaves);
    }
    path.remove(item.id.as_str());
}

/// `(selected, total)` over the selectable leaves under `id`.
pub fn counts(catalog: &Catalog, store: &SelectionStore, id: &str) -> (usize, usize) {
    let leaves = selectable_leaves(catalog, id);
    let selected = leaves.iter().filter(|leaf| store.contains(leaf)).count();
    (selected, leaves.len())
}

/// Tri-state summary of [`counts`].
///
/// A node with no selectable leaves is `Empty`, never vacuously `Full`.
pub fn status(catalog: &Catalog, store: &SelectionStore, id: &str) -> SelectionStatus {
    match counts(catalog, store, id) {
        (_, 0) | (0, _) => SelectionStatus::Empty,
        (selected, total) if selected == total => SelectionStatus::Full,
        _ => SelectionStatus::Partial,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::catalog;
    use crate::menu::model::{MenuItem, ROOT_ID};
    use crate::menu::seed::SeedEntry;

    const DEV: &[SeedEntry] = &[
        SeedEntry::category("development", ROOT_ID, "Development", ""),
        SeedEntry::item("python", "development", "Python", "").on(),
        SeedEntry::item("docker", "development", "Docker", ""),
        SeedEntry::category("system", ROOT_ID, "System", ""),
        SeedEntry::category("system-perf", "system", "Performance", ""),
        SeedEntry::item("swappiness", "system-perf", "Swappiness", "").slider(0, 100, 5, 60, ""),
        SeedEntry::category("hollow", ROOT_ID, "Hollow", ""),
        SeedEntry::category("hollow-inner", "hollow", "Hollow inner", ""),
    ];

    fn setup() -> (Catalog, SelectionStore) {
        (catalog::build(DEV).unwrap(), SelectionStore::new())
    }

    #[test]
    fn defaults_leave_development_partial() {
        let (mut catalog, mut store) = setup();
        store.apply_defaults(&mut catalog);
        assert_eq!(status(&catalog, &store, "development"), SelectionStatus::Partial);
        assert_eq!(counts(&catalog, &store, "development"), (1, 2));
    }

    #[test]
    fn toggling_remaining_leaf_makes_category_full_then_category_toggle_clears() {
        let (mut catalog, mut store) = setup();
        store.apply_defaults(&mut catalog);
        store.toggle(&mut catalog, "docker");
        assert_eq!(status(&catalog, &store, "development"), SelectionStatus::Full);
        assert_eq!(counts(&catalog, &store, "development"), (2, 2));

        store.toggle_category(&mut catalog, "development");
        assert_eq!(status(&catalog, &store, "development"), SelectionStatus::Empty);
        assert!(!store.contains("python"));
        assert!(!store.contains("docker"));
    }

    #[test]
    fn leaves_are_collected_through_nested_categories() {
        let (catalog, _) = setup();
        assert_eq!(selectable_leaves(&catalog, "system"), vec!["swappiness"]);
        assert_eq!(
            selectable_leaves(&catalog, ROOT_ID),
            vec!["python", "docker", "swappiness"]
        );
    }

    #[test]
    fn category_without_leaves_is_empty_not_full() {
        let (catalog, store) = setup();
        assert!(selectable_leaves(&catalog, "hollow").is_empty());
        assert_eq!(counts(&catalog, &store, "hollow"), (0, 0));
        assert_eq!(status(&catalog, &store, "hollow"), SelectionStatus::Empty);
    }

    #[test]
    fn unknown_id_is_empty() {
        let (catalog, store) = setup();
        assert!(selectable_leaves(&catalog, "nope").is_empty());
        assert_eq!(status(&catalog, &store, "nope"), SelectionStatus::Empty);
    }

    #[test]
    fn leaf_status_reflects_its_own_selection() {
        let (mut catalog, mut store) = setup();
        assert_eq!(status(&catalog, &store, "docker"), SelectionStatus::Empty);
        store.toggle(&mut catalog, "docker");
        assert_eq!(status(&catalog, &store, "docker"), SelectionStatus::Full);
        assert_eq!(counts(&catalog, &store, "docker"), (1, 1));
    }

    #[test]
    fn status_matches_counts_for_every_category() {
        let (mut catalog, mut store) = setup();
        store.apply_defaults(&mut catalog);
        store.toggle(&mut catalog, "swappiness");
        let categories: Vec<String> = catalog
            .iter()
            .filter(|item| item.is_category)
            .map(|item| item.id.clone())
            .collect();
        for id in categories {
            let (selected, total) = counts(&catalog, &store, &id);
            let expected = if selected == 0 {
                SelectionStatus::Empty
            } else if selected == total {
                SelectionStatus::Full
            } else {
                SelectionStatus::Partial
            };
            assert_eq!(status(&catalog, &store, &id), expected, "{id}");
        }
    }

    #[test]
    fn collection_survives_a_children_loop() {
        let mut catalog = Catalog::new();
        let mut root = MenuItem::category(ROOT_ID, "Main Menu");
        root.children = vec!["a".into()];
        let mut a = MenuItem::category("a", "A");
        a.parent = Some(ROOT_ID.into());
        a.children = vec!["b".into(), "leaf".into()];
        let mut b = MenuItem::category("b", "B");
        b.parent = Some("a".into());
        b.children = vec!["a".into(), "leaf".into()];
        let mut leaf = MenuItem::leaf("leaf", "Leaf");
        leaf.parent = Some("a".into());
        catalog.insert(root).unwrap();
        catalog.insert(a).unwrap();
        catalog.insert(b).unwrap();
        catalog.insert(leaf).unwrap();

        assert_eq!(selectable_leaves(&catalog, ROOT_ID), vec!["leaf"]);
    }
}
