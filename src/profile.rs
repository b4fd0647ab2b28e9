//! Profile documents: the YAML file the provisioning engine reads.
//!
//! Top-level keys are `selected_items`, `configurable_items`,
//! `ansible_variables`, `categories` and `metadata`. Adding keys is safe;
//! renaming or removing one breaks the engine's variable lookups.
//!
//! Only the selection and configurable values survive a round trip. The
//! variable and category sections are derived views written for the engine.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::menu::model::Catalog;
use crate::menu::selection::SelectionStore;
use crate::menu::value::{ConfigKind, ConfigValue, Scalar};

pub const FORMAT_VERSION: &str = "1";

/// Variables whose name starts with the prefix are nested under the group
/// key instead of sitting at the top of `ansible_variables`.
pub const VARIABLE_GROUPS: &[(&str, &str)] = &[("desktop_", "desktop_environment")];

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("no profile at {}", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("profile at {} is malformed: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode profile: {0}")]
    Encode(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileDocument {
    pub selected_items: Vec<String>,
    #[serde(default)]
    pub configurable_items: BTreeMap<String, ConfigEntry>,
    #[serde(default)]
    pub ansible_variables: BTreeMap<String, Variable>,
    #[serde(default)]
    pub categories: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub metadata: Metadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    pub value: Scalar,
    #[serde(rename = "type")]
    pub kind: ConfigKind,
    #[serde(default)]
    pub unit: String,
}

/// A variable value, or a named group of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Variable {
    Value(Scalar),
    Group(BTreeMap<String, Scalar>),
}

/// The sections of a profile that are read back.
///
/// The engine owns everything else in the file, so other keys are ignored
/// whatever shape they take.
#[derive(Debug, Deserialize)]
struct StoredProfile {
    selected_items: Vec<String>,
    #[serde(default)]
    configurable_items: BTreeMap<String, ConfigEntry>,
    #[serde(default)]
    metadata: Metadata,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub created: String,
}

/// What a loaded profile asks for. Not yet checked against any catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedProfile {
    pub selected: Vec<String>,
    pub values: BTreeMap<String, ConfigValue>,
    pub created: Option<String>,
}

/// Build the document for the current selection.
pub fn document(catalog: &Catalog, store: &SelectionStore) -> ProfileDocument {
    let selected_items = store.ordered_ids(catalog);
    let mut configurable_items = BTreeMap::new();
    let mut ansible_variables: BTreeMap<String, Variable> = BTreeMap::new();
    let mut categories: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for id in &selected_items {
        let Some(item) = catalog.get(id) else {
            continue;
        };

        let effective = match &item.config {
            Some(config) => {
                let value = config.value.to_scalar();
                configurable_items.insert(
                    id.clone(),
                    ConfigEntry {
                        value: value.clone(),
                        kind: config.spec.kind(),
                        unit: config.spec.unit().to_string(),
                    },
                );
                value
            }
            None => Scalar::Bool(true),
        };

        if let Some(var) = &item.ansible_var {
            insert_variable(&mut ansible_variables, var, effective);
        }

        if let Some(parent) = &item.parent {
            categories
                .entry(parent.clone())
                .or_default()
                .push(id.clone());
        }
    }

    ProfileDocument {
        selected_items,
        configurable_items,
        ansible_variables,
        categories,
        metadata: Metadata {
            version: FORMAT_VERSION.to_string(),
            created: chrono::Utc::now().to_rfc3339(),
        },
    }
}

fn insert_variable(variables: &mut BTreeMap<String, Variable>, name: &str, value: Scalar) {
    let group = VARIABLE_GROUPS
        .iter()
        .find(|(prefix, _)| name.starts_with(prefix))
        .map(|(_, group)| *group);
    match group {
        Some(group) => {
            let slot = variables
                .entry(group.to_string())
                .or_insert_with(|| Variable::Group(BTreeMap::new()));
            if let Variable::Group(members) = slot {
                members.insert(name.to_string(), value);
            }
        }
        None => {
            variables.insert(name.to_string(), Variable::Value(value));
        }
    }
}

pub fn serialize(doc: &ProfileDocument) -> Result<String, PersistenceError> {
    Ok(serde_yaml::to_string(doc)?)
}

/// Write the current selection to `path`.
///
/// The document goes to a temporary file beside `path` that is then renamed
/// over it, so a failed save leaves any previous profile intact. Missing
/// parent directories are created.
pub fn save(catalog: &Catalog, store: &SelectionStore, path: &Path) -> Result<(), PersistenceError> {
    let text = serialize(&document(catalog, store))?;
    write_atomic(path, text.as_bytes())?;
    info!(path = %path.display(), items = store.len(), "profile saved");
    Ok(())
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), PersistenceError> {
    let write_err = |source: io::Error| PersistenceError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(write_err)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(bytes).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|err| write_err(err.error))?;
    Ok(())
}

/// Read a profile back.
///
/// A missing file and unreadable content are reported as different errors so
/// the caller can offer a fresh start for the former.
pub fn load(path: &Path) -> Result<ParsedProfile, PersistenceError> {
    let text = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            PersistenceError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            PersistenceError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    let profile = parse(&text, path)?;
    debug!(path = %path.display(), items = profile.selected.len(), "profile loaded");
    Ok(profile)
}

/// Parse profile text. `path` is only used in error messages.
pub fn parse(text: &str, path: &Path) -> Result<ParsedProfile, PersistenceError> {
    let malformed = |reason: String| PersistenceError::Malformed {
        path: path.to_path_buf(),
        reason,
    };
    let doc: StoredProfile = serde_yaml::from_str(text).map_err(|err| malformed(err.to_string()))?;

    if !doc.metadata.version.is_empty() && doc.metadata.version != FORMAT_VERSION {
        return Err(malformed(format!(
            "unsupported format version '{}'",
            doc.metadata.version
        )));
    }

    let mut values = BTreeMap::new();
    for (id, entry) in &doc.configurable_items {
        let value = ConfigValue::from_scalar(entry.kind, &entry.value).ok_or_else(|| {
            malformed(format!(
                "value '{}' of '{}' is not a valid {} value",
                entry.value, id, entry.kind
            ))
        })?;
        values.insert(id.clone(), value);
    }

    Ok(ParsedProfile {
        selected: doc.selected_items,
        values,
        created: Some(doc.metadata.created).filter(|created| !created.is_empty()),
    })
}
