//! `setupmenu tree`: print the catalog with selection status per category.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Result;
use crossterm::style::Stylize;

use crate::commands::{fresh_session, load_session};
use crate::controller::MenuController;
use crate::menu::model::ROOT_ID;

pub fn run(profile: &Path, all: bool) -> Result<()> {
    let controller = match load_session(profile)? {
        Some((controller, _)) => controller,
        None => {
            println!(
                "  {} no profile at {}; showing defaults",
                "Note".yellow().bold(),
                profile.display()
            );
            fresh_session(profile)?
        }
    };
    for line in tree_lines(&controller, all) {
        println!("  {}", line);
    }
    let (selected, total) = controller.counts_of(ROOT_ID);
    println!(
        "\n  {} of {} items selected",
        selected.to_string().green().bold(),
        total
    );
    Ok(())
}

fn tree_lines(controller: &MenuController, all: bool) -> Vec<String> {
    let mut lines = Vec::new();
    let mut seen = HashSet::new();
    walk(controller, ROOT_ID, 0, all, &mut seen, &mut lines);
    lines
}

fn walk(
    controller: &MenuController,
    id: &str,
    depth: usize,
    all: bool,
    seen: &mut HashSet<String>,
    lines: &mut Vec<String>,
) {
    if !seen.insert(id.to_string()) {
        return;
    }
    let indent = "  ".repeat(depth);
    for child in controller.catalog().children_of(id) {
        if child.is_category {
            let (selected, total) = controller.counts_of(&child.id);
            lines.push(format!(
                "{indent}{} {} ({selected}/{total})",
                controller.status_of(&child.id).glyph(),
                child.label
            ));
            walk(controller, &child.id, depth + 1, all, seen, lines);
        } else if all {
            let check = if controller.store().contains(&child.id) {
                "[x]"
            } else {
                "[ ]"
            };
            let value = child
                .config
                .as_ref()
                .map(|config| format!(" = {}", config.spec.display(&config.value)))
                .unwrap_or_default();
            lines.push(format!("{indent}{check} {}{value}", child.label));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::catalog;
    use crate::menu::seed::SeedEntry;
    use std::path::PathBuf;

    const ENTRIES: &[SeedEntry] = &[
        SeedEntry::category("development", ROOT_ID, "Development", ""),
        SeedEntry::category("dev-languages", "development", "Languages", ""),
        SeedEntry::item("python", "dev-languages", "Python", "").on(),
        SeedEntry::item("rust", "dev-languages", "Rust", ""),
        SeedEntry::category("dev-tools", "development", "Tools", ""),
        SeedEntry::item("git", "dev-tools", "Git", "").on(),
        SeedEntry::category("system", ROOT_ID, "System", ""),
        SeedEntry::item("swappiness", "system", "Swappiness", "").slider(0, 100, 5, 60, ""),
    ];

    fn controller() -> MenuController {
        MenuController::with_defaults(catalog::build(ENTRIES).unwrap(), PathBuf::from("unused.yml"))
    }

    #[test]
    fn categories_only_by_default() {
        assert_eq!(
            tree_lines(&controller(), false),
            vec![
                "◐ Development (2/3)",
                "  ◐ Languages (1/2)",
                "  ● Tools (1/1)",
                "○ System (0/1)",
            ]
        );
    }

    #[test]
    fn all_lists_leaves_with_values() {
        let lines = tree_lines(&controller(), true);
        assert!(lines.contains(&"    [x] Python".to_string()));
        assert!(lines.contains(&"    [ ] Rust".to_string()));
        assert!(lines.contains(&"  [ ] Swappiness = 60".to_string()));
        assert_eq!(lines.len(), 8);
    }
}
