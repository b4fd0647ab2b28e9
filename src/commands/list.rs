//! `setupmenu list`: print a saved profile's selection, grouped by category.

use std::path::Path;

use anyhow::{Result, bail};
use crossterm::style::Stylize;

use crate::commands::{ignored_summary, load_session};
use crate::menu::model::Catalog;
use crate::menu::selection::SelectionStore;

/// A category heading and the selected items filed directly under it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Group {
    heading: String,
    entries: Vec<String>,
}

pub fn run(profile: &Path) -> Result<()> {
    let Some((controller, report)) = load_session(profile)? else {
        bail!(
            "no profile at {}. Run `setupmenu init` or `setupmenu view` first.",
            profile.display()
        );
    };

    let created = report.created.as_deref().unwrap_or("unknown date");
    println!(
        "  {} {} {}",
        "Profile".cyan().bold(),
        profile.display(),
        format!("(saved {created})").dark_grey()
    );
    if let Some(summary) = ignored_summary(&report) {
        println!("  {} {}", "Warning".yellow().bold(), summary);
    }

    if controller.store().is_empty() {
        println!("  Nothing selected.");
        return Ok(());
    }
    for group in list_groups(controller.catalog(), controller.store()) {
        println!();
        println!("  {}", group.heading.bold());
        for entry in group.entries {
            println!("    {}", entry);
        }
    }
    Ok(())
}

/// Selected items grouped under their parent, in catalog order.
///
/// Headings are the parent's ancestry below the root, joined with `/`.
/// Configurable items show their current value.
fn list_groups(catalog: &Catalog, store: &SelectionStore) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    let mut parents: Vec<String> = Vec::new();

    for id in store.ordered_ids(catalog) {
        let Some(item) = catalog.get(&id) else {
            continue;
        };
        let parent = item.parent.clone().unwrap_or_default();
        let entry = match &item.config {
            Some(config) => format!("{} = {}", item.label, config.spec.display(&config.value)),
            None => item.label.clone(),
        };

        match parents.iter().position(|p| *p == parent) {
            Some(idx) => groups[idx].entries.push(entry),
            None => {
                let heading = catalog
                    .ancestry_labels(&parent)
                    .into_iter()
                    .skip(1)
                    .collect::<Vec<_>>()
                    .join(" / ");
                parents.push(parent);
                groups.push(Group {
                    heading,
                    entries: vec![entry],
                });
            }
        }
    }
    groups
}
