use std::collections::HashMap;

use crate::menu::error::StructuralError;
use crate::menu::value::{ConfigSpec, ConfigValue};

/// Id of the synthetic top-level category.
pub const ROOT_ID: &str = "root";

/// Spec, current value and seed value of a configurable leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configurable {
    pub spec: ConfigSpec,
    pub value: ConfigValue,
    /// Value restored by a reset.
    pub default: ConfigValue,
}

/// A node in the catalog tree: either a category or a leaf.
///
/// Categories only contain other items and are never selected themselves.
/// Leaves are selectable; configurable leaves also carry a [`Configurable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub id: String,
    pub label: String,
    pub description: String,
    /// `None` only for the root.
    pub parent: Option<String>,
    /// Child ids in display order.
    pub children: Vec<String>,
    pub is_category: bool,
    /// Mirror of membership in the selection store. The store is canonical.
    pub selected: bool,
    /// Selected at first run and after a reset.
    pub default: bool,
    pub config: Option<Configurable>,
    /// Variable name the provisioning engine reads this item's value from.
    pub ansible_var: Option<String>,
}

impl MenuItem {
    pub fn category(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: String::new(),
            parent: None,
            children: Vec::new(),
            is_category: true,
            selected: false,
            default: false,
            config: None,
            ansible_var: None,
        }
    }

    pub fn leaf(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            is_category: false,
            ..Self::category(id, label)
        }
    }

    pub fn is_configurable(&self) -> bool {
        self.config.is_some()
    }

    /// True for anything that can be a member of the selection store.
    pub fn is_selectable(&self) -> bool {
        !self.is_category
    }
}

/// Every menu item keyed by id, plus the order items were added in.
///
/// The order is only used to make whole-catalog walks deterministic; display
/// order within a category comes from `children`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Catalog {
    items: HashMap<String, MenuItem>,
    order: Vec<String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&MenuItem> {
        self.items.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut MenuItem> {
        self.items.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn root(&self) -> Option<&MenuItem> {
        self.get(ROOT_ID)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Add an item as-is, without wiring it into its parent.
    pub(crate) fn insert(&mut self, item: MenuItem) -> Result<(), StructuralError> {
        if self.contains(&item.id) {
            return Err(StructuralError::DuplicateId { id: item.id });
        }
        self.order.push(item.id.clone());
        self.items.insert(item.id.clone(), item);
        Ok(())
    }

    /// All items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &MenuItem> {
        self.order.iter().filter_map(|id| self.items.get(id))
    }

    /// Resolve the children of `id` to items, in display order.
    ///
    /// Unknown ids, and child ids that do not resolve, are skipped.
    pub fn children_of(&self, id: &str) -> Vec<&MenuItem> {
        self.get(id)
            .map(|item| {
                item.children
                    .iter()
                    .filter_map(|child| self.get(child))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Labels from the root down to `id`, inclusive.
    ///
    /// Walks `parent` links, so it describes ancestry rather than the route the
    /// user took. Stops early if a parent is missing or a loop is found.
    pub fn ancestry_labels(&self, id: &str) -> Vec<String> {
        let mut labels = Vec::new();
        let mut seen = Vec::new();
        let mut cursor = self.get(id);
        while let Some(item) = cursor {
            if seen.contains(&item.id.as_str()) {
                break;
            }
            seen.push(item.id.as_str());
            labels.push(item.label.clone());
            cursor = item.parent.as_deref().and_then(|parent| self.get(parent));
        }
        labels.reverse();
        labels
    }
}
