//! Built-in Component Catalog
//!
//! The catalog shipped with the product is compiled into the binary as
//! JSON and parsed once, on first use. A different catalog can be loaded
//! from disk with [`Catalog::load_from_file`]; either way the catalog is
//! never mutated after it is built.

use crate::knowledge::catalog::Catalog;
use once_cell::sync::Lazy;

const EMBEDDED_COMPONENTS: &str = include_str!("../../data/components.json");

static BUILTIN: Lazy<Catalog> = Lazy::new(|| match Catalog::from_json_str(EMBEDDED_COMPONENTS) {
    Ok(catalog) => {
        tracing::info!("Loaded {} built-in components", catalog.len());
        catalog
    }
    Err(e) => {
        tracing::warn!("Failed to parse embedded component catalog: {}", e);
        Catalog::default()
    }
});

/// The process-wide built-in catalog
pub fn builtin_catalog() -> &'static Catalog {
    &BUILTIN
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::schema::Category;

    #[test]
    fn test_embedded_catalog_parses() {
        // a parse failure would silently yield an empty catalog
        assert!(Catalog::from_json_str(EMBEDDED_COMPONENTS).is_ok());
        assert_eq!(builtin_catalog().len(), 16);
    }

    #[test]
    fn test_builtin_ids() {
        let ids: Vec<&str> = builtin_catalog().ids().collect();
        assert_eq!(
            ids,
            vec![
                "resistor",
                "led",
                "button",
                "speaker",
                "capacitor",
                "potentiometer",
                "diode",
                "transistor",
                "servo",
                "dc-motor",
                "photoresistor",
                "temp-sensor",
                "ultrasonic",
                "lcd",
                "relay",
                "rgb-led",
            ]
        );
    }

    #[test]
    fn test_every_category_is_populated() {
        for category in Category::ALL {
            assert!(
                builtin_catalog().iter().any(|c| c.category == category),
                "no {} components",
                category
            );
        }
    }
}
