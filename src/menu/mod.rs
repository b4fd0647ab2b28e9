//! The menu engine: catalog tree, selection store, status aggregation and
//! navigation state. No terminal code lives here.

pub mod aggregate;
pub mod catalog;
pub mod error;
pub mod model;
pub mod navigation;
pub mod seed;
pub mod selection;
pub mod value;
