//! Component Record Schema
//!
//! Data structures for one entry of the electronics knowledge base. The
//! JSON field names follow the shape the chat front-end and the language
//! model already consume (`circuitExample`, `datasheetInfo`, ...), so a
//! component can be relayed to either one verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One entry in the component catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    /// Short lowercase slug, unique within a catalog (e.g. "led", "dc-motor")
    pub id: String,

    /// Display name
    pub name: String,

    pub category: Category,

    /// Free text, also used by the fuzzy resolver tier
    pub description: String,

    /// Ordered label/value pairs
    #[serde(default)]
    pub specs: Vec<Spec>,

    pub circuit_example: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datasheet_info: Option<DatasheetInfo>,
}

/// Closed set of component categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Passive,
    Active,
    Input,
    Output,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Passive,
        Category::Active,
        Category::Input,
        Category::Output,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Passive => "passive",
            Category::Active => "active",
            Category::Input => "input",
            Category::Output => "output",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category {0:?} (valid categories: passive, active, input, output)")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spec {
    pub label: String,
    pub value: String,
}

/// Datasheet excerpt attached to the better documented parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasheetInfo {
    pub pinout: String,

    #[serde(default)]
    pub max_ratings: Vec<MaxRating>,

    #[serde(default)]
    pub characteristics: Vec<Characteristic>,

    #[serde(default)]
    pub part_numbers: Vec<String>,

    pub tips: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxRating {
    pub parameter: String,
    pub value: String,
}

/// One row of an electrical characteristics table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Characteristic {
    pub parameter: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typical: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
    pub unit: String,
}

impl Characteristic {
    /// Render as "min / typ / max unit", with "-" for missing columns
    pub fn display_range(&self) -> String {
        let col = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
        let range = format!(
            "{} / {} / {}",
            col(&self.min),
            col(&self.typical),
            col(&self.max)
        );
        if self.unit.is_empty() {
            range
        } else {
            format!("{} {}", range, self.unit)
        }
    }
}
