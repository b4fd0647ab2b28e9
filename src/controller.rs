//! The operations a frontend drives: navigate, toggle, configure, save, load.
//!
//! `MenuController` owns the catalog, the selection store and the navigation
//! state for one session. Read-only queries absorb unknown ids; `enter` and
//! the value setters report them.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::menu::aggregate::{self, SelectionStatus};
use crate::menu::error::{NavigationError, ValueError};
use crate::menu::model::{Catalog, MenuItem};
use crate::menu::navigation::NavigationState;
use crate::menu::selection::SelectionStore;
use crate::menu::value::ConfigValue;
use crate::profile::{self, PersistenceError};

/// What activating a row did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    Entered(String),
    Toggled { id: String, selected: bool },
    /// A configurable leaf: the frontend should open its value editor.
    Configure(String),
    /// Cursor was past the end of the menu.
    Nothing,
}

/// How a loaded profile combines with the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyMode {
    /// Clear selections and values first.
    Replace,
    /// Add to what is already selected.
    Merge,
}

/// What happened while applying a profile.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub applied: usize,
    /// Ids that are unknown or are categories.
    pub skipped: Vec<String>,
    /// Values the catalog no longer accepts, with the reason.
    pub rejected: Vec<(String, ValueError)>,
    /// When the profile was written, as recorded in its metadata.
    pub created: Option<String>,
}

#[derive(Debug)]
pub struct MenuController {
    catalog: Catalog,
    store: SelectionStore,
    nav: NavigationState,
    profile_path: PathBuf,
    dirty: bool,
}

impl MenuController {
    /// A session with nothing selected yet.
    pub fn new(catalog: Catalog, profile_path: PathBuf) -> Self {
        Self {
            catalog,
            store: SelectionStore::new(),
            nav: NavigationState::new(),
            profile_path,
            dirty: false,
        }
    }

    /// A first-run session: defaults applied.
    pub fn with_defaults(catalog: Catalog, profile_path: PathBuf) -> Self {
        let mut controller = Self::new(catalog, profile_path);
        controller.store.apply_defaults(&mut controller.catalog);
        controller
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &SelectionStore {
        &self.store
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.nav
    }

    pub fn profile_path(&self) -> &Path {
        &self.profile_path
    }

    /// Unsaved changes since the last save or load.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // -- queries ------------------------------------------------------------

    /// Items of the menu being shown, in display order.
    pub fn get_current_items(&self) -> Vec<&MenuItem> {
        self.catalog.children_of(&self.nav.current_menu)
    }

    pub fn current_menu(&self) -> Option<&MenuItem> {
        self.catalog.get(&self.nav.current_menu)
    }

    /// Item under the cursor.
    pub fn focused_item(&self) -> Option<&MenuItem> {
        self.get_current_items()
            .get(self.nav.current_item)
            .copied()
    }

    pub fn status_of(&self, id: &str) -> SelectionStatus {
        aggregate::status(&self.catalog, &self.store, id)
    }

    pub fn counts_of(&self, id: &str) -> (usize, usize) {
        aggregate::counts(&self.catalog, &self.store, id)
    }

    /// Labels from the root to the current menu.
    pub fn breadcrumb_path(&self) -> Vec<String> {
        self.catalog.ancestry_labels(&self.nav.current_menu)
    }

    // -- navigation ---------------------------------------------------------

    pub fn enter(&mut self, id: &str) -> Result<(), NavigationError> {
        self.nav.enter(&self.catalog, id)
    }

    /// `false` at the top level, where a further back means quit.
    pub fn back(&mut self) -> bool {
        self.nav.back()
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.get_current_items().len();
        self.nav.move_cursor(delta, len);
    }

    pub fn ensure_visible(&mut self, rows: usize) {
        self.nav.ensure_visible(rows);
    }

    /// Open a category, ask for a value, or flip a plain leaf.
    pub fn enter_or_toggle(&mut self, index: usize) -> Result<Activation, NavigationError> {
        let Some((id, is_category, is_configurable)) = self
            .get_current_items()
            .get(index)
            .map(|item| (item.id.clone(), item.is_category, item.is_configurable()))
        else {
            return Ok(Activation::Nothing);
        };
        if is_category {
            self.enter(&id)?;
            return Ok(Activation::Entered(id));
        }
        if is_configurable {
            return Ok(Activation::Configure(id));
        }
        let selected = self.toggle(&id).unwrap_or(false);
        Ok(Activation::Toggled { id, selected })
    }

    // -- selection ----------------------------------------------------------

    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let result = self.store.toggle(&mut self.catalog, id);
        self.dirty |= result.is_some();
        result
    }

    pub fn toggle_category(&mut self, id: &str) -> Option<bool> {
        let result = self.store.toggle_category(&mut self.catalog, id);
        self.dirty |= result.is_some();
        result
    }

    /// Toggle whatever is under the cursor, category or leaf.
    pub fn toggle_focused(&mut self) -> Option<bool> {
        let (id, is_category) = self
            .focused_item()
            .map(|item| (item.id.clone(), item.is_category))?;
        if is_category {
            self.toggle_category(&id)
        } else {
            self.toggle(&id)
        }
    }

    pub fn select_all(&mut self, id: &str, value: bool) -> usize {
        let changed = self.store.select_all(&mut self.catalog, id, value);
        self.dirty |= changed > 0;
        changed
    }

    /// Select or clear everything in the menu being shown.
    pub fn select_all_here(&mut self, value: bool) -> usize {
        let menu = self.nav.current_menu.clone();
        self.select_all(&menu, value)
    }

    /// Store a value for a configurable leaf and select it.
    pub fn set_config_value(&mut self, id: &str, value: ConfigValue) -> Result<(), ValueError> {
        let item = self
            .catalog
            .get_mut(id)
            .ok_or_else(|| ValueError::UnknownItem { id: id.to_string() })?;
        let config = item
            .config
            .as_mut()
            .ok_or_else(|| ValueError::NotConfigurable { id: id.to_string() })?;
        config.spec.check(&value)?;
        config.value = value;
        self.store.insert(&mut self.catalog, id);
        self.dirty = true;
        debug!(id, "config value set");
        Ok(())
    }

    /// Defaults only, seed values restored, back at the top level.
    pub fn reset(&mut self) {
        self.store.reset_all_selections(&mut self.catalog);
        self.restore_default_values();
        self.nav.reset_to_root();
        self.dirty = true;
        debug_assert!(self.store.mirrors(&self.catalog));
    }

    fn restore_default_values(&mut self) {
        let ids: Vec<String> = self
            .catalog
            .iter()
            .filter(|item| item.is_configurable())
            .map(|item| item.id.clone())
            .collect();
        for id in ids {
            if let Some(config) = self.catalog.get_mut(&id).and_then(|item| item.config.as_mut()) {
                config.value = config.default.clone();
            }
        }
    }

    // -- persistence --------------------------------------------------------

    /// Save to the session's profile path and return to the top level.
    pub fn save(&mut self) -> Result<(), PersistenceError> {
        let path = self.profile_path.clone();
        self.save_to(&path)
    }

    pub fn save_to(&mut self, path: &Path) -> Result<(), PersistenceError> {
        profile::save(&self.catalog, &self.store, path)?;
        self.dirty = false;
        self.nav.reset_to_root();
        Ok(())
    }

    /// Read a profile and apply it. The session is untouched if reading fails.
    pub fn load(&mut self, path: &Path, mode: ApplyMode) -> Result<LoadReport, PersistenceError> {
        let parsed = profile::load(path)?;
        if mode == ApplyMode::Replace {
            self.store.clear(&mut self.catalog);
            self.restore_default_values();
        }

        let mut report = LoadReport {
            created: parsed.created,
            ..LoadReport::default()
        };
        for id in &parsed.selected {
            if self.store.insert(&mut self.catalog, id) {
                report.applied += 1;
            } else {
                warn!(id = %id, "profile selects an item the catalog does not offer");
                report.skipped.push(id.clone());
            }
        }
        for (id, value) in parsed.values {
            let Some(config) = self
                .catalog
                .get_mut(&id)
                .and_then(|item| item.config.as_mut())
            else {
                warn!(id = %id, "profile sets a value for an item that is not configurable");
                report.rejected.push((id.clone(), ValueError::NotConfigurable { id }));
                continue;
            };
            match config.spec.check(&value) {
                Ok(()) => config.value = value,
                Err(err) => {
                    warn!(id = %id, %err, "profile value rejected");
                    report.rejected.push((id, err));
                }
            }
        }

        debug_assert!(self.store.mirrors(&self.catalog));
        self.dirty = false;
        self.nav.reset_to_root();
        Ok(report)
    }
}
