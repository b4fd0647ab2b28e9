//! Position in the menu tree and the history needed to go back.
//!
//! The breadcrumb *stack* records where the user came from, cursor and scroll
//! included, so `back` lands exactly where they left. It is unrelated to the
//! breadcrumb *path* shown in the header, which is plain tree ancestry
//! (see [`Catalog::ancestry_labels`]).

use crate::menu::error::NavigationError;
use crate::menu::model::{Catalog, ROOT_ID};

/// A saved `(menu, cursor, scroll)` position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub menu: String,
    pub item: usize,
    pub scroll: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    pub current_menu: String,
    pub current_item: usize,
    pub scroll_offset: usize,
    stack: Vec<Crumb>,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            current_menu: ROOT_ID.to_string(),
            current_item: 0,
            scroll_offset: 0,
            stack: Vec::new(),
        }
    }
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at_root(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn position(&self) -> Crumb {
        Crumb {
            menu: self.current_menu.clone(),
            item: self.current_item,
            scroll: self.scroll_offset,
        }
    }

    /// Descend into `id`, remembering the current position.
    ///
    /// Fails without changing anything if `id` is unknown or is not a
    /// category.
    pub fn enter(&mut self, catalog: &Catalog, id: &str) -> Result<(), NavigationError> {
        let item = catalog.get(id).ok_or_else(|| NavigationError::UnknownItem {
            id: id.to_string(),
        })?;
        if !item.is_category {
            return Err(NavigationError::NotACategory { id: id.to_string() });
        }
        self.stack.push(self.position());
        self.current_menu = item.id.clone();
        self.current_item = 0;
        self.scroll_offset = 0;
        Ok(())
    }

    /// Return to the previous position. `false` when already at the bottom of
    /// the stack.
    pub fn back(&mut self) -> bool {
        let Some(crumb) = self.stack.pop() else {
            return false;
        };
        self.current_menu = crumb.menu;
        self.current_item = crumb.item;
        self.scroll_offset = crumb.scroll;
        true
    }

    pub fn reset_to_root(&mut self) {
        *self = Self::default();
    }

    /// Move the cursor by `delta`, clamped to a menu of `len` items.
    pub fn move_cursor(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.current_item = 0;
            return;
        }
        let next = self.current_item.saturating_add_signed(delta);
        self.current_item = next.min(len - 1);
    }

    /// Keep the cursor inside a viewport of `rows` lines.
    pub fn ensure_visible(&mut self, rows: usize) {
        if rows == 0 {
            return;
        }
        if self.current_item < self.scroll_offset {
            self.scroll_offset = self.current_item;
        } else if self.current_item >= self.scroll_offset + rows {
            self.scroll_offset = self.current_item + 1 - rows;
        }
    }
}
