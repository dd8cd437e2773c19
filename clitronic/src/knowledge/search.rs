//! Catalog Search
//!
//! Category and keyword filtering. Results keep catalog order and an empty
//! result is a normal outcome.

use crate::knowledge::schema::{Category, Component};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Exact category match
    #[serde(default)]
    pub category: Option<Category>,

    /// Case-insensitive substring of name, description or id
    #[serde(default)]
    pub keyword: Option<String>,
}

impl SearchQuery {
    /// Query with no filters (the whole catalog)
    pub fn all() -> Self {
        Self::default()
    }

    pub fn in_category(category: Category) -> Self {
        Self {
            category: Some(category),
            keyword: None,
        }
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }
}

pub fn search<'a>(components: &'a [Component], query: &SearchQuery) -> Vec<&'a Component> {
    let keyword = query.keyword.as_deref().map(str::to_lowercase);

    components
        .iter()
        .filter(|c| query.category.map_or(true, |category| c.category == category))
        .filter(|c| match &keyword {
            Some(kw) => {
                c.name.to_lowercase().contains(kw.as_str())
                    || c.description.to_lowercase().contains(kw.as_str())
                    || c.id.contains(kw.as_str())
            }
            None => true,
        })
        .collect()
}
