//! Core lookup logic shared by the library API and the CLI.
//! No terminal or network dependencies.

use std::borrow::Cow;
use std::path::Path;

use crate::ai::provider::media_type_for_extension;
use crate::knowledge::{
    builtin_catalog, Catalog, CatalogError, Category, Component, ParseCategoryError, SearchQuery,
};

#[derive(Debug, thiserror::Error)]
pub enum ClitronicError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("{0}")]
    UnknownCategory(#[from] ParseCategoryError),
    #[error("{0}")]
    Other(String),
}

/// An image read from disk, ready to attach to a chat message
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub bytes: Vec<u8>,
    pub media_type: &'static str,
}

/// Core lookup API used by the CLI.
pub struct ClitronicCore;

impl ClitronicCore {
    /// The catalog at `path`, or the built-in one
    pub fn load_catalog(path: Option<&Path>) -> Result<Cow<'static, Catalog>, ClitronicError> {
        match path {
            Some(path) => Ok(Cow::Owned(Catalog::load_from_file(path)?)),
            None => Ok(Cow::Borrowed(builtin_catalog())),
        }
    }

    /// Resolve a free-text component query
    pub fn info<'a>(catalog: &'a Catalog, query: &str) -> Option<&'a Component> {
        catalog.resolve(query)
    }

    /// Components in one category, or all of them. A blank category
    /// means no filter.
    pub fn list<'a>(
        catalog: &'a Catalog,
        category: Option<&str>,
    ) -> Result<Vec<&'a Component>, ClitronicError> {
        let category = category
            .filter(|c| !c.trim().is_empty())
            .map(str::parse::<Category>)
            .transpose()?;

        let query = SearchQuery {
            category,
            keyword: None,
        };
        Ok(catalog.search(&query))
    }

    /// Group components by category, in the order categories first appear
    pub fn group_by_category<'a>(
        components: &[&'a Component],
    ) -> Vec<(Category, Vec<&'a Component>)> {
        let mut groups: Vec<(Category, Vec<&'a Component>)> = Vec::new();
        for &component in components {
            match groups.iter_mut().find(|(c, _)| *c == component.category) {
                Some((_, items)) => items.push(component),
                None => groups.push((component.category, vec![component])),
            }
        }
        groups
    }

    pub fn read_image(path: &Path) -> Result<ImageFile, ClitronicError> {
        if !path.is_file() {
            return Err(ClitronicError::Other(format!(
                "File not found: {}",
                path.display()
            )));
        }
        let bytes = std::fs::read(path)?;
        let media_type = media_type_for_extension(path.extension().and_then(|e| e.to_str()));
        tracing::debug!("Read {} bytes of {} from {:?}", bytes.len(), media_type, path);
        Ok(ImageFile { bytes, media_type })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_all_and_by_category() {
        let catalog = builtin_catalog();
        assert_eq!(ClitronicCore::list(catalog, None).unwrap().len(), 16);
        assert_eq!(ClitronicCore::list(catalog, Some("  ")).unwrap().len(), 16);

        let ids: Vec<&str> = ClitronicCore::list(catalog, Some("Passive"))
            .unwrap()
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["resistor", "capacitor"]);
    }

    #[test]
    fn test_list_unknown_category() {
        let err = ClitronicCore::list(builtin_catalog(), Some("magnetic")).unwrap_err();
        assert!(matches!(err, ClitronicError::UnknownCategory(_)));
    }

    #[test]
    fn test_group_by_category_keeps_first_seen_order() {
        let all = ClitronicCore::list(builtin_catalog(), None).unwrap();
        let groups = ClitronicCore::group_by_category(&all);
        let order: Vec<Category> = groups.iter().map(|(c, _)| *c).collect();
        // resistor (passive), led (output), button (input), diode (active)
        assert_eq!(
            order,
            vec![
                Category::Passive,
                Category::Output,
                Category::Input,
                Category::Active
            ]
        );
        let total: usize = groups.iter().map(|(_, items)| items.len()).sum();
        assert_eq!(total, 16);
    }

    #[test]
    fn test_load_catalog_defaults_to_builtin() {
        let catalog = ClitronicCore::load_catalog(None).unwrap();
        assert!(matches!(catalog, Cow::Borrowed(_)));
        assert_eq!(catalog.len(), 16);
    }

    #[test]
    fn test_read_image_missing_file() {
        let err = ClitronicCore::read_image(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(err.to_string().starts_with("File not found"));
    }

    #[test]
    fn test_read_image_media_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("part.PNG");
        std::fs::write(&path, b"\x89PNG").unwrap();
        let image = ClitronicCore::read_image(&path).unwrap();
        assert_eq!(image.media_type, "image/png");
        assert_eq!(image.bytes.len(), 4);
    }
}
