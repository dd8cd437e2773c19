//! Electronics Knowledge Base
//!
//! A small, read-only catalog of hobby electronics parts plus the two ways
//! of querying it:
//!
//! - [`resolver`]: free text to at most one component, through an ordered
//!   cascade of matching tiers (exact id, exact name, substring, words in
//!   the description).
//! - [`search`]: category and/or keyword filtering that keeps catalog order.
//!
//! # Usage
//!
//! ```rust
//! use clitronic::knowledge::{builtin_catalog, SearchQuery, Category};
//!
//! let catalog = builtin_catalog();
//! let led = catalog.resolve("red led").unwrap();
//! assert_eq!(led.id, "led");
//!
//! let passives = catalog.search(&SearchQuery::in_category(Category::Passive));
//! assert!(passives.iter().all(|c| c.category == Category::Passive));
//! ```

pub mod builtin;
pub mod catalog;
pub mod resolver;
pub mod schema;
pub mod search;

pub use builtin::builtin_catalog;
pub use catalog::{Catalog, CatalogError};
pub use schema::*;
pub use search::SearchQuery;
