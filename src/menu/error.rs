//! Error types for the menu engine.
//!
//! Structural errors are fatal at startup. Navigation errors mean the caller
//! passed an id it never got from the catalog. Value errors are returned when
//! a configurable item is handed a value its spec does not accept.

use thiserror::Error;

use crate::menu::value::ConfigKind;

/// Malformed seed data found while building the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("item '{id}' references undefined parent '{parent}'")]
    UndefinedParent { id: String, parent: String },
    #[error("item '{id}' has parent '{parent}', which is not a category")]
    ParentNotCategory { id: String, parent: String },
    #[error("duplicate item id '{id}' in seed data")]
    DuplicateId { id: String },
    #[error("circular reference through '{id}'")]
    Cycle { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("no menu item with id '{id}'")]
    UnknownItem { id: String },
    #[error("'{id}' is not a category")]
    NotACategory { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("no menu item with id '{id}'")]
    UnknownItem { id: String },
    #[error("'{id}' does not carry a configurable value")]
    NotConfigurable { id: String },
    #[error("expected a {expected} value, got a {found} value")]
    KindMismatch {
        expected: ConfigKind,
        found: ConfigKind,
    },
    #[error("{value} is outside the range {min}..={max}")]
    OutOfRange { value: i64, min: i64, max: i64 },
    #[error("'{value}' is not one of the available options")]
    UnknownOption { value: String },
}
