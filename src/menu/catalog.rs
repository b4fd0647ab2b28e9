//! Catalog construction from declarative seed tables, and structural checks.
//!
//! `build` wires `parent`/`children` in both directions and refuses seed data
//! that cannot form a tree. `validate` is non-destructive and can be pointed
//! at any catalog, including hand-assembled ones.

use std::collections::HashSet;
use std::fmt;

use tracing::{debug, warn};

use crate::menu::error::StructuralError;
use crate::menu::model::{Catalog, Configurable, MenuItem, ROOT_ID};
use crate::menu::seed::{self, SeedEntry};

/// Label of the synthetic root category.
pub const ROOT_LABEL: &str = "Main Menu";

/// A structural problem found by [`validate`] or [`validate_seed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    MissingRoot,
    /// Id appears more than once in the seed tables.
    DuplicateId { id: String },
    /// Non-root item without a parent.
    Detached { id: String },
    /// Parent id does not exist.
    Orphaned { id: String, parent: String },
    /// Parent exists but does not list the item among its children.
    Asymmetric { id: String, parent: String },
    /// A `children` entry that does not resolve.
    DanglingChild { parent: String, child: String },
    /// Same child listed twice under one parent.
    DuplicateChild { parent: String, child: String },
    /// Item reachable from itself through `children`.
    Cycle { id: String },
    EmptyCategory { id: String },
    /// Seed data the builder refused outright.
    Build { reason: String },
}

impl Issue {
    /// Issues that make the catalog unusable, as opposed to ones worth a warning.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::EmptyCategory { .. })
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRoot => write!(f, "catalog has no '{ROOT_ID}' item"),
            Self::DuplicateId { id } => write!(f, "duplicate id '{id}'"),
            Self::Detached { id } => write!(f, "'{id}' has no parent"),
            Self::Orphaned { id, parent } => {
                write!(f, "'{id}' references missing parent '{parent}'")
            }
            Self::Asymmetric { id, parent } => {
                write!(f, "'{parent}' does not list its child '{id}'")
            }
            Self::DanglingChild { parent, child } => {
                write!(f, "'{parent}' lists missing child '{child}'")
            }
            Self::DuplicateChild { parent, child } => {
                write!(f, "'{parent}' lists child '{child}' more than once")
            }
            Self::Cycle { id } => write!(f, "'{id}' is its own ancestor"),
            Self::EmptyCategory { id } => write!(f, "category '{id}' has no children"),
            Self::Build { reason } => f.write_str(reason),
        }
    }
}

/// Build the catalog shipped with the binary.
pub fn builtin() -> Result<Catalog, StructuralError> {
    build(seed::ENTRIES)
}

/// Build a catalog from seed entries.
///
/// A synthetic root is always created; entries whose parent is [`ROOT_ID`]
/// hang directly off it. Parents may be declared after their children.
/// Children are listed in seed order.
pub fn build(entries: &[SeedEntry]) -> Result<Catalog, StructuralError> {
    let mut catalog = Catalog::new();
    catalog.insert(MenuItem::category(ROOT_ID, ROOT_LABEL))?;
    for entry in entries {
        catalog.insert(item_from_seed(entry))?;
    }

    for entry in entries {
        let Some(parent) = catalog.get_mut(entry.parent) else {
            return Err(StructuralError::UndefinedParent {
                id: entry.id.to_string(),
                parent: entry.parent.to_string(),
            });
        };
        if !parent.is_category {
            return Err(StructuralError::ParentNotCategory {
                id: entry.id.to_string(),
                parent: entry.parent.to_string(),
            });
        }
        parent.children.push(entry.id.to_string());
    }

    for issue in validate(&catalog) {
        match issue {
            Issue::Cycle { id } => return Err(StructuralError::Cycle { id }),
            other => warn!(%other, "catalog issue"),
        }
    }

    debug!(items = catalog.len(), "catalog built");
    Ok(catalog)
}

fn item_from_seed(entry: &SeedEntry) -> MenuItem {
    let mut item = if entry.is_category() {
        MenuItem::category(entry.id, entry.label)
    } else {
        MenuItem::leaf(entry.id, entry.label)
    };
    item.description = entry.description.to_string();
    item.parent = Some(entry.parent.to_string());
    item.default = entry.default;
    item.ansible_var = entry.ansible_var.map(ToString::to_string);
    item.config = entry
        .config()
        .map(|(spec, value)| Configurable {
            spec,
            default: value.clone(),
            value,
        });
    item
}

/// Report duplicate ids in raw seed tables.
///
/// Runs on the tables rather than a catalog because a catalog cannot hold two
/// items with the same id.
pub fn validate_seed(entries: &[SeedEntry]) -> Vec<Issue> {
    let mut seen: HashSet<&str> = HashSet::from([ROOT_ID]);
    let mut reported: HashSet<&str> = HashSet::new();
    let mut issues = Vec::new();
    for entry in entries {
        if !seen.insert(entry.id) && reported.insert(entry.id) {
            issues.push(Issue::DuplicateId {
                id: entry.id.to_string(),
            });
        }
    }
    issues
}

/// Check parent/child consistency and look for cycles.
///
/// Returns every issue found, in catalog order. An empty list means the
/// catalog is a well-formed tree.
pub fn validate(catalog: &Catalog) -> Vec<Issue> {
    let mut issues = Vec::new();

    if catalog.root().is_none() {
        issues.push(Issue::MissingRoot);
    }

    for item in catalog.iter() {
        match &item.parent {
            None if item.id != ROOT_ID => issues.push(Issue::Detached {
                id: item.id.clone(),
            }),
            None => {}
            Some(parent_id) => match catalog.get(parent_id) {
                None => issues.push(Issue::Orphaned {
                    id: item.id.clone(),
                    parent: parent_id.clone(),
                }),
                Some(parent) if !parent.children.contains(&item.id) => {
                    issues.push(Issue::Asymmetric {
                        id: item.id.clone(),
                        parent: parent_id.clone(),
                    })
                }
                Some(_) => {}
            },
        }

        let mut listed = HashSet::new();
        for child in &item.children {
            if !catalog.contains(child) {
                issues.push(Issue::DanglingChild {
                    parent: item.id.clone(),
                    child: child.clone(),
                });
            }
            if !listed.insert(child.as_str()) {
                issues.push(Issue::DuplicateChild {
                    parent: item.id.clone(),
                    child: child.clone(),
                });
            }
        }

        if item.is_category && item.children.is_empty() {
            issues.push(Issue::EmptyCategory {
                id: item.id.clone(),
            });
        }
    }

    issues.extend(
        find_cycles(catalog)
            .into_iter()
            .map(|id| Issue::Cycle { id }),
    );
    issues
}

/// Ids where a `children` walk loops back onto the current path.
fn find_cycles(catalog: &Catalog) -> Vec<String> {
    let mut done: HashSet<&str> = HashSet::new();
    let mut flagged: Vec<String> = Vec::new();

    for item in catalog.iter() {
        let mut path: HashSet<&str> = HashSet::new();
        visit(catalog, &item.id, &mut path, &mut done, &mut flagged);
    }
    flagged
}

fn visit<'a>(
    catalog: &'a Catalog,
    id: &'a str,
    path: &mut HashSet<&'a str>,
    done: &mut HashSet<&'a str>,
    flagged: &mut Vec<String>,
) {
    if done.contains(id) {
        return;
    }
    if path.contains(id) {
        if !flagged.iter().any(|f| f == id) {
            flagged.push(id.to_string());
        }
        return;
    }
    let Some(item) = catalog.get(id) else {
        return;
    };
    path.insert(id);
    for child in &item.children {
        visit(catalog, child, path, done, flagged);
    }
    path.remove(id);
    done.insert(id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::value::{ConfigSpec, ConfigValue};

    const SMALL: &[SeedEntry] = &[
        SeedEntry::category("development", ROOT_ID, "Development", ""),
        SeedEntry::item("python", "development", "Python", "").on(),
        SeedEntry::item("docker", "development", "Docker", "").var("install_docker"),
        SeedEntry::category("system", ROOT_ID, "System", ""),
        SeedEntry::category("system-perf", "system", "Performance", ""),
        SeedEntry::item("swappiness", "system-perf", "Swappiness", "").slider(0, 100, 5, 60, "%"),
    ];

    #[test]
    fn build_wires_parent_and_children_both_ways() {
        let catalog = build(SMALL).unwrap();
        let root = catalog.root().unwrap();
        assert_eq!(root.children, vec!["development", "system"]);
        assert_eq!(
            catalog.get("development").unwrap().children,
            vec!["python", "docker"]
        );
        assert_eq!(
            catalog.get("swappiness").unwrap().parent.as_deref(),
            Some("system-perf")
        );
        assert!(validate(&catalog).is_empty());
    }

    #[test]
    fn build_carries_defaults_vars_and_config() {
        let catalog = build(SMALL).unwrap();
        assert!(catalog.get("python").unwrap().default);
        assert_eq!(
            catalog.get("docker").unwrap().ansible_var.as_deref(),
            Some("install_docker")
        );
        let swappiness = catalog.get("swappiness").unwrap();
        let config = swappiness.config.as_ref().unwrap();
        assert_eq!(config.value, ConfigValue::Slider(60));
        assert!(matches!(config.spec, ConfigSpec::Slider { min: 0, max: 100, .. }));
    }

    #[test]
    fn build_accepts_parent_declared_after_child() {
        let entries = [
            SeedEntry::item("vim", "editors", "Vim", ""),
            SeedEntry::category("editors", ROOT_ID, "Editors", ""),
        ];
        let catalog = build(&entries).unwrap();
        assert_eq!(catalog.get("editors").unwrap().children, vec!["vim"]);
    }

    #[test]
    fn build_fails_on_undefined_parent() {
        let entries = [SeedEntry::item("vim", "editors", "Vim", "")];
        assert_eq!(
            build(&entries),
            Err(StructuralError::UndefinedParent {
                id: "vim".into(),
                parent: "editors".into()
            })
        );
    }

    #[test]
    fn build_fails_on_duplicate_id() {
        let entries = [
            SeedEntry::category("editors", ROOT_ID, "Editors", ""),
            SeedEntry::item("vim", "editors", "Vim", ""),
            SeedEntry::item("vim", "editors", "Vim (copy)", ""),
        ];
        assert_eq!(
            build(&entries),
            Err(StructuralError::DuplicateId { id: "vim".into() })
        );
    }

    #[test]
    fn build_fails_on_leaf_parent() {
        let entries = [
            SeedEntry::item("vim", ROOT_ID, "Vim", ""),
            SeedEntry::item("vim-plug", "vim", "vim-plug", ""),
        ];
        assert!(matches!(
            build(&entries),
            Err(StructuralError::ParentNotCategory { .. })
        ));
    }

    #[test]
    fn build_fails_on_parent_loop() {
        let entries = [
            SeedEntry::category("a", "b", "A", ""),
            SeedEntry::category("b", "a", "B", ""),
        ];
        assert!(matches!(build(&entries), Err(StructuralError::Cycle { .. })));
    }

    #[test]
    fn validate_seed_reports_each_duplicate_once() {
        let entries = [
            SeedEntry::item("vim", ROOT_ID, "Vim", ""),
            SeedEntry::item("vim", ROOT_ID, "Vim", ""),
            SeedEntry::item("vim", ROOT_ID, "Vim", ""),
            SeedEntry::item(ROOT_ID, ROOT_ID, "Root again", ""),
        ];
        assert_eq!(
            validate_seed(&entries),
            vec![
                Issue::DuplicateId { id: "vim".into() },
                Issue::DuplicateId { id: ROOT_ID.into() },
            ]
        );
    }

    #[test]
    fn validate_flags_orphans_dangling_and_asymmetric_links() {
        let mut catalog = Catalog::new();
        let mut root = MenuItem::category(ROOT_ID, ROOT_LABEL);
        root.children = vec!["tools".into(), "ghost".into()];
        let mut tools = MenuItem::category("tools", "Tools");
        tools.parent = Some(ROOT_ID.into());
        let mut git = MenuItem::leaf("git", "Git");
        git.parent = Some("tools".into());
        let mut stray = MenuItem::leaf("stray", "Stray");
        stray.parent = Some("nowhere".into());
        catalog.insert(root).unwrap();
        catalog.insert(tools).unwrap();
        catalog.insert(git).unwrap();
        catalog.insert(stray).unwrap();

        let issues = validate(&catalog);
        assert!(issues.contains(&Issue::DanglingChild {
            parent: ROOT_ID.into(),
            child: "ghost".into()
        }));
        assert!(issues.contains(&Issue::Asymmetric {
            id: "git".into(),
            parent: "tools".into()
        }));
        assert!(issues.contains(&Issue::Orphaned {
            id: "stray".into(),
            parent: "nowhere".into()
        }));
        assert!(issues.contains(&Issue::EmptyCategory { id: "tools".into() }));
    }

    #[test]
    fn validate_flags_children_cycle() {
        let mut catalog = Catalog::new();
        let mut root = MenuItem::category(ROOT_ID, ROOT_LABEL);
        root.children = vec!["a".into()];
        let mut a = MenuItem::category("a", "A");
        a.parent = Some(ROOT_ID.into());
        a.children = vec!["b".into()];
        let mut b = MenuItem::category("b", "B");
        b.parent = Some("a".into());
        b.children = vec!["a".into()];
        catalog.insert(root).unwrap();
        catalog.insert(a).unwrap();
        catalog.insert(b).unwrap();

        let cycles: Vec<Issue> = validate(&catalog)
            .into_iter()
            .filter(|issue| matches!(issue, Issue::Cycle { .. }))
            .collect();
        assert_eq!(cycles, vec![Issue::Cycle { id: "a".into() }]);
    }

    #[test]
    fn validate_reports_missing_root_and_detached_items() {
        let mut catalog = Catalog::new();
        catalog.insert(MenuItem::leaf("lonely", "Lonely")).unwrap();
        let issues = validate(&catalog);
        assert!(issues.contains(&Issue::MissingRoot));
        assert!(issues.contains(&Issue::Detached { id: "lonely".into() }));
    }

    #[test]
    fn builtin_catalog_is_a_clean_tree() {
        assert!(validate_seed(seed::ENTRIES).is_empty());
        let catalog = builtin().expect("builtin seed must build");
        let issues = validate(&catalog);
        assert!(issues.is_empty(), "builtin catalog issues: {issues:?}");
    }

    #[test]
    fn builtin_parent_links_are_symmetric() {
        let catalog = builtin().unwrap();
        for item in catalog.iter() {
            if let Some(parent) = &item.parent {
                let parent = catalog.get(parent).expect("parent must exist");
                assert!(parent.children.contains(&item.id), "{}", item.id);
            }
        }
    }
}
