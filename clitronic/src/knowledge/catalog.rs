//! Component Catalog
//!
//! Immutable, ordered table of components addressable by id. Catalog order
//! is significant: the resolver breaks ties by it and listings group by
//! category in the order categories first appear.

use crate::knowledge::resolver;
use crate::knowledge::schema::Component;
use crate::knowledge::search::{self, SearchQuery};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Duplicate component id: {0}")]
    DuplicateId(String),
    #[error("Invalid component id {0:?}: ids must be lowercase slugs (a-z, 0-9, '-')")]
    InvalidId(String),
    #[error("Component {0:?} has an empty name")]
    EmptyName(String),
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    components: Vec<Component>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, checking that every id is a unique lowercase slug
    pub fn from_components(components: Vec<Component>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(components.len());

        for (position, component) in components.iter().enumerate() {
            if !is_slug(&component.id) {
                return Err(CatalogError::InvalidId(component.id.clone()));
            }
            if component.name.trim().is_empty() {
                return Err(CatalogError::EmptyName(component.id.clone()));
            }
            if index.insert(component.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId(component.id.clone()));
            }
        }

        Ok(Self { components, index })
    }

    /// Parse a JSON array of components
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let components: Vec<Component> = serde_json::from_str(json)?;
        Self::from_components(components)
    }

    /// Load a catalog from a JSON file on disk
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&content)?;
        tracing::info!("Loaded {} components from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    pub fn get(&self, id: &str) -> Option<&Component> {
        self.index.get(id).map(|&i| &self.components[i])
    }

    /// Components in catalog order
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(|c| c.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Map a free-text query to at most one component
    pub fn resolve(&self, query: &str) -> Option<&Component> {
        resolver::resolve(&self.components, query)
    }

    /// Filter by category and/or keyword, keeping catalog order
    pub fn search(&self, query: &SearchQuery) -> Vec<&Component> {
        search::search(&self.components, query)
    }
}

fn is_slug(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::schema::Category;

    fn part(id: &str, name: &str) -> Component {
        Component {
            id: id.to_string(),
            name: name.to_string(),
            category: Category::Passive,
            description: String::new(),
            specs: vec![],
            circuit_example: String::new(),
            datasheet_info: None,
        }
    }

    #[test]
    fn test_get_by_id() {
        let catalog =
            Catalog::from_components(vec![part("fuse", "Fuse"), part("inductor", "Inductor")])
                .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("inductor").unwrap().name, "Inductor");
        assert!(catalog.get("Inductor").is_none());
        assert_eq!(catalog.ids().collect::<Vec<_>>(), vec!["fuse", "inductor"]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = Catalog::from_components(vec![part("fuse", "Fuse"), part("fuse", "Fuse 2")]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id == "fuse"));
    }

    #[test]
    fn test_invalid_ids_rejected() {
        for bad in ["", "Fuse", "big fuse", "fuse_1"] {
            let result = Catalog::from_components(vec![part(bad, "Fuse")]);
            assert!(
                matches!(result, Err(CatalogError::InvalidId(_))),
                "{:?} should be rejected",
                bad
            );
        }
        assert!(Catalog::from_components(vec![part("dc-motor-2", "Motor")]).is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = Catalog::from_components(vec![part("fuse", "  ")]);
        assert!(matches!(result, Err(CatalogError::EmptyName(_))));
    }

    #[test]
    fn test_from_json_str_reports_parse_errors() {
        assert!(matches!(
            Catalog::from_json_str("{ not json"),
            Err(CatalogError::Parse(_))
        ));
        let catalog = Catalog::from_json_str("[]").unwrap();
        assert!(catalog.is_empty());
    }
}
