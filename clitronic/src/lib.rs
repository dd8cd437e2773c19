//! Clitronic - electronics reference and calculation library
//!
//! The core of a hobby-electronics companion: a built-in knowledge base of
//! common parts, free-text lookup and search over it, the everyday circuit
//! calculations, and the client side of the streaming chat protocol used to
//! ask a language model about anything else.
//!
//! # Quick Start
//!
//! ```rust
//! use clitronic::calc::{led_resistor, CalculationResult};
//! use clitronic::knowledge::builtin_catalog;
//!
//! let led = builtin_catalog().resolve("led").unwrap();
//! println!("{}: {}", led.name, led.description);
//!
//! match led_resistor(5.0, Some(2.0), Some(20.0)) {
//!     CalculationResult::LedResistor(r) => assert_eq!(r.nearest_standard_ohms, 150),
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```
//!
//! # Features
//!
//! - **Knowledge base**: 16 built-in components, or your own JSON catalog
//! - **Resolver and search**: tiered free-text matching, category/keyword filters
//! - **Calculations**: LED resistor, voltage divider, pull-up, Ohm's law
//! - **Chat client**: streamed answers from the Clitronic chat endpoint

pub mod ai;
pub mod calc;
pub mod command;
pub mod config;
pub mod core;
pub mod knowledge;

// Re-export main types
pub use crate::core::{ClitronicCore, ClitronicError, ImageFile};
pub use ai::{AIError, ChatClient, ToolError, ToolRegistry};
pub use calc::CalculationResult;
pub use command::TerminalCommand;
pub use config::ClientConfig;
pub use knowledge::{builtin_catalog, Catalog, CatalogError, Category, Component, SearchQuery};

/// Resolve a query against the built-in catalog (convenience wrapper).
pub fn lookup(query: &str) -> Option<&'static Component> {
    builtin_catalog().resolve(query)
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        builtin_catalog, CalculationResult, Catalog, Category, ClitronicCore, ClitronicError,
        Component, SearchQuery,
    };
}
